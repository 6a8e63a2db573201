// core/src/error.rs

//! Error types for the booking domain.
//!
//! Store collaborators report [`StoreError`], whose `Conflict` variant is the
//! typed signal for a violated uniqueness constraint. The submission flow turns
//! those into the closed [`BookingError`] taxonomy, which carries structured
//! fields so the presentation layer can localize without parsing strings.

use crate::model::{DuplicateKey, ExistingOrder};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Misconfiguration detected while running a [`Flow`](crate::flow::Flow).
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for required step: {step_name}")]
  HandlerMissing { step_name: String },
}

/// Failure reported by a store collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
  /// A uniqueness constraint rejected the write.
  #[error("unique constraint violated: {constraint}")]
  Conflict { constraint: String },

  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("permission denied: {0}")]
  PermissionDenied(String),

  #[error("store unavailable: {detail}")]
  Unavailable { timed_out: bool, detail: String },

  #[error("{0}")]
  Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Why relaying an order to the notification endpoint failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryFailure {
  /// The endpoint answered with a non-2xx status.
  Status { code: u16, text: String },
  /// No response was received.
  Transport { timed_out: bool, detail: String },
}

impl fmt::Display for DeliveryFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DeliveryFailure::Status { code, text } => write!(f, "{}: {}", code, text),
      DeliveryFailure::Transport { timed_out: true, detail } => write!(f, "timed out: {}", detail),
      DeliveryFailure::Transport { timed_out: false, detail } => write!(f, "transport error: {}", detail),
    }
  }
}

/// Every way an order submission can fail.
#[derive(Debug, Error)]
pub enum BookingError {
  #[error("invalid booking: {0}")]
  Validation(String),

  /// A booking with the same natural key already exists. `existing` is `None`
  /// when the store reported a conflict but the follow-up lookup found nothing.
  #[error("duplicate booking for {key}")]
  DuplicateConflict {
    key: DuplicateKey,
    existing: Option<ExistingOrder>,
  },

  #[error("database error: {0}")]
  Persistence(#[source] StoreError),

  /// The order row exists, but the notification endpoint did not accept it.
  #[error("notification for order {order_id} failed: {failure}")]
  Delivery { order_id: Uuid, failure: DeliveryFailure },

  #[error("unexpected error: {0}")]
  Unknown(#[source] anyhow::Error),
}

impl From<FlowError> for BookingError {
  fn from(err: FlowError) -> Self {
    BookingError::Unknown(anyhow::Error::new(err))
  }
}

/// Failures of the read and admin services (catalog, order management, pricing).
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("invalid input: {0}")]
  Invalid(String),

  #[error("failed to load {entity}")]
  Load {
    entity: &'static str,
    #[source]
    source: StoreError,
  },

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl ServiceError {
  pub(crate) fn load(entity: &'static str) -> impl FnOnce(StoreError) -> ServiceError {
    move |source| ServiceError::Load { entity, source }
  }
}
