// site/src/services/mod.rs

pub mod auth_service;
pub mod session;
pub mod webhook;

pub use session::{AdminSession, SessionRegistry};
pub use webhook::WebhookNotifier;
