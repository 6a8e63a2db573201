// site/src/web/handlers/mod.rs

pub mod analytics_handlers;
pub mod auth_handlers;
pub mod booking_handlers;
pub mod catalog_handlers;
pub mod order_handlers;
pub mod pricing_handlers;
