// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use pharaoh::error::{DeliveryFailure, StoreError, StoreResult};
use pharaoh::model::{DuplicateKey, ExistingOrder, Order, OrderDraft, OrderStatus, SourcePage};
use pharaoh::{MemoryStore, OrderNotification, OrderNotifier, OrderStore};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Drafts ---
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A package booking for two on 2025-03-10.
pub fn package_draft() -> OrderDraft {
  OrderDraft {
    name: "Ahmed Hassan".to_string(),
    email: "a@x.com".to_string(),
    phone: "+20 100 123 4567".to_string(),
    address: None,
    notes: Some("Vegetarian meals please".to_string()),
    date: date(2025, 3, 10),
    people: 2,
    source_page: SourcePage::Package,
    source_id: "pkg-7".to_string(),
    source_name: "Nile Cruise".to_string(),
    price: Some(1200.0),
  }
}

pub fn experience_draft(email: &str) -> OrderDraft {
  OrderDraft {
    email: email.to_string(),
    source_page: SourcePage::Experience,
    source_id: "exp-1".to_string(),
    source_name: "Felucca at Sunset".to_string(),
    price: Some(45.0),
    ..package_draft()
  }
}

// --- Notifiers ---
#[derive(Default)]
pub struct RecordingNotifier {
  pub sent: Mutex<Vec<OrderNotification>>,
}

impl RecordingNotifier {
  pub fn sent(&self) -> Vec<OrderNotification> {
    self.sent.lock().clone()
  }
}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
  async fn notify(&self, notification: &OrderNotification) -> Result<(), DeliveryFailure> {
    self.sent.lock().push(notification.clone());
    Ok(())
  }
}

/// Rejects every notification with a fixed failure.
pub struct FailingNotifier(pub DeliveryFailure);

impl FailingNotifier {
  pub fn status(code: u16, text: &str) -> Self {
    FailingNotifier(DeliveryFailure::Status {
      code,
      text: text.to_string(),
    })
  }
}

#[async_trait]
impl OrderNotifier for FailingNotifier {
  async fn notify(&self, _notification: &OrderNotification) -> Result<(), DeliveryFailure> {
    Err(self.0.clone())
  }
}

// --- Fault-injecting order store ---

/// How [`FaultyOrders`] answers duplicate lookups.
#[derive(Clone, Debug)]
pub enum LookupMode {
  Normal,
  /// Every lookup fails with this error.
  Fail(StoreError),
  /// Lookups report nothing, as if the prior order were not visible yet.
  Blind,
  /// Only the first lookup is blind; later ones see the store.
  BlindFirst,
}

/// Wraps a [`MemoryStore`] and injects lookup or insert failures.
pub struct FaultyOrders {
  pub inner: Arc<MemoryStore>,
  pub lookup: Mutex<LookupMode>,
  pub insert_error: Mutex<Option<StoreError>>,
  pub lookups: Mutex<usize>,
}

impl FaultyOrders {
  pub fn new(inner: Arc<MemoryStore>) -> Self {
    Self {
      inner,
      lookup: Mutex::new(LookupMode::Normal),
      insert_error: Mutex::new(None),
      lookups: Mutex::new(0),
    }
  }

  pub fn with_lookup(self, mode: LookupMode) -> Self {
    *self.lookup.lock() = mode;
    self
  }

  pub fn with_insert_error(self, err: StoreError) -> Self {
    *self.insert_error.lock() = Some(err);
    self
  }

  pub fn lookup_count(&self) -> usize {
    *self.lookups.lock()
  }
}

#[async_trait]
impl OrderStore for FaultyOrders {
  async fn latest_by_key(&self, key: &DuplicateKey) -> StoreResult<Option<ExistingOrder>> {
    let seen = {
      let mut lookups = self.lookups.lock();
      *lookups += 1;
      *lookups
    };
    let mode = self.lookup.lock().clone();
    match mode {
      LookupMode::Normal => self.inner.latest_by_key(key).await,
      LookupMode::Fail(err) => Err(err),
      LookupMode::Blind => Ok(None),
      LookupMode::BlindFirst if seen == 1 => Ok(None),
      LookupMode::BlindFirst => self.inner.latest_by_key(key).await,
    }
  }

  async fn insert(&self, draft: &OrderDraft, status: OrderStatus) -> StoreResult<Order> {
    let injected = self.insert_error.lock().clone();
    match injected {
      Some(err) => Err(err),
      None => self.inner.insert(draft, status).await,
    }
  }

  async fn list(&self) -> StoreResult<Vec<Order>> {
    self.inner.list().await
  }

  async fn get(&self, id: Uuid) -> StoreResult<Option<Order>> {
    self.inner.get(id).await
  }

  async fn set_status(&self, id: Uuid, status: OrderStatus) -> StoreResult<Option<Order>> {
    self.inner.set_status(id, status).await
  }
}
