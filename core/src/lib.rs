// src/lib.rs

//! Pharaoh: the booking domain behind the Pharaoh Tours site.
//!
//! The crate covers:
//!  - Order submission as a named-step [`Flow`]: validate, duplicate check,
//!    store, relay to the order-notification endpoint.
//!  - A fail-open duplicate checker backed by the store's uniqueness constraint.
//!  - Back-office order management, pricing-tier editing and dashboard figures.
//!  - Read access to the published catalog.
//!  - Arabic and English rendering of every user-facing outcome.
//!
//! Storage and notification are traits ([`store`], [`OrderNotifier`]); the web
//! crate supplies Postgres and HTTP implementations, and [`MemoryStore`] backs
//! tests and local runs.

pub mod booking;
pub mod catalog;
pub mod error;
pub mod flow;
pub mod locale;
pub mod manage;
pub mod model;
pub mod money;
pub mod store;

pub use crate::booking::{
  DuplicateCheck, DuplicateChecker, NotificationPolicy, OrderNotification, OrderNotifier, SubmissionOutcome,
  SubmissionService,
};
pub use crate::catalog::CatalogReader;
pub use crate::error::{BookingError, DeliveryFailure, FlowError, ServiceError, StoreError, StoreResult};
pub use crate::flow::{Flow, FlowControl, FlowData, FlowOutcome};
pub use crate::locale::Locale;
pub use crate::manage::{OrderFilter, OrderManager, PricingEditor, StatusAction};
pub use crate::store::{AccountStore, CatalogStore, MemoryStore, OrderStore, PricingTierStore};
