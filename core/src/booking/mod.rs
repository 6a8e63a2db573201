// core/src/booking/mod.rs

pub mod duplicate;
pub mod notifier;
pub mod submission;

pub use duplicate::{DuplicateCheck, DuplicateChecker};
pub use notifier::{NotificationPolicy, OrderNotification, OrderNotifier};
pub use submission::{SubmissionCtx, SubmissionOutcome, SubmissionService};
