// core/src/manage/mod.rs

pub mod analytics;
pub mod orders;
pub mod pricing;

pub use analytics::{summarize, DashboardSummary, LabeledCount, MonthlyFigure};
pub use orders::{filter_orders, OrderFilter, OrderManager, StatusAction, StatusCounts};
pub use pricing::PricingEditor;
