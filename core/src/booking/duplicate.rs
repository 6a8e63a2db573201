// core/src/booking/duplicate.rs

use crate::model::{DuplicateKey, ExistingOrder};
use crate::store::OrderStore;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Result of looking up a natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCheck {
  pub is_duplicate: bool,
  pub existing: Option<ExistingOrder>,
}

impl DuplicateCheck {
  fn none() -> Self {
    Self {
      is_duplicate: false,
      existing: None,
    }
  }
}

/// Advisory pre-insert lookup for an existing order with the same key.
///
/// The check fails open: if the store cannot be queried the submission is
/// allowed to proceed, and the store's uniqueness constraint stays the
/// authoritative guard.
#[derive(Clone)]
pub struct DuplicateChecker {
  orders: Arc<dyn OrderStore>,
}

impl DuplicateChecker {
  pub fn new(orders: Arc<dyn OrderStore>) -> Self {
    Self { orders }
  }

  #[instrument(name = "DuplicateChecker::check", skip(self, key), fields(key = %key))]
  pub async fn check(&self, key: &DuplicateKey) -> DuplicateCheck {
    match self.orders.latest_by_key(key).await {
      Ok(Some(existing)) => DuplicateCheck {
        is_duplicate: true,
        existing: Some(existing),
      },
      Ok(None) => DuplicateCheck::none(),
      Err(e) => {
        warn!(error = %e, "Duplicate lookup failed; allowing submission.");
        DuplicateCheck::none()
      }
    }
  }
}
