// tests/order_management_tests.rs
mod common;
use chrono::{Duration, TimeZone, Utc};
use common::*;
use pharaoh::error::ServiceError;
use pharaoh::model::{OrderStatus, SourcePage};
use pharaoh::{MemoryStore, OrderFilter, OrderManager, StatusAction};
use serial_test::serial;
use std::sync::Arc;
use uuid::Uuid;

fn seeded() -> (Arc<MemoryStore>, OrderManager) {
  let store = Arc::new(MemoryStore::new());
  let base = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
  store.seed_order(package_draft(), OrderStatus::Pending, base);
  store.seed_order(experience_draft("mona@x.com"), OrderStatus::Confirmed, base + Duration::hours(1));
  let mut trip = package_draft();
  trip.email = "omar@x.com".to_string();
  trip.source_page = SourcePage::Trip;
  trip.source_name = "White Desert".to_string();
  trip.price = None;
  store.seed_order(trip, OrderStatus::Cancelled, base + Duration::hours(2));
  let manager = OrderManager::new(store.clone());
  (store, manager)
}

#[tokio::test]
#[serial]
async fn list_is_newest_first() {
  setup_tracing();
  let (_, manager) = seeded();
  let orders = manager.list().await.unwrap();
  let emails: Vec<&str> = orders.iter().map(|o| o.details.email.as_str()).collect();
  assert_eq!(emails, ["omar@x.com", "mona@x.com", "a@x.com"]);
}

#[tokio::test]
#[serial]
async fn filtered_list_applies_search_status_and_type() {
  setup_tracing();
  let (_, manager) = seeded();

  let by_name = OrderFilter {
    search: "DESERT".to_string(),
    ..Default::default()
  };
  let hits = manager.list_filtered(&by_name).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].details.source_page, SourcePage::Trip);

  let by_price = OrderFilter {
    search: "1200".to_string(),
    ..Default::default()
  };
  assert_eq!(manager.list_filtered(&by_price).await.unwrap().len(), 1);

  let confirmed_experiences = OrderFilter {
    status: Some(OrderStatus::Confirmed),
    source_page: Some(SourcePage::Experience),
    ..Default::default()
  };
  let hits = manager.list_filtered(&confirmed_experiences).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].details.email, "mona@x.com");

  assert_eq!(manager.list_filtered(&OrderFilter::default()).await.unwrap().len(), 3);
}

#[tokio::test]
#[serial]
async fn transitions_are_unconditional_between_managed_statuses() {
  setup_tracing();
  let (_, manager) = seeded();
  let id = manager.list().await.unwrap()[0].id;

  let restored = manager.transition(id, StatusAction::Restore).await.unwrap();
  assert_eq!(restored.status, OrderStatus::Pending);
  let confirmed = manager.transition(id, StatusAction::Confirm).await.unwrap();
  assert_eq!(confirmed.status, OrderStatus::Confirmed);
  let cancelled = manager.transition(id, StatusAction::Cancel).await.unwrap();
  assert_eq!(cancelled.status, OrderStatus::Cancelled);
  let again = manager.set_status(id, OrderStatus::Cancelled).await.unwrap();
  assert_eq!(again.status, OrderStatus::Cancelled);

  assert_eq!(manager.get(id).await.unwrap().status, OrderStatus::Cancelled);
}

#[tokio::test]
#[serial]
async fn status_change_leaves_other_fields_untouched() {
  setup_tracing();
  let (_, manager) = seeded();
  let before = manager.list().await.unwrap().pop().unwrap();

  let after = manager.transition(before.id, StatusAction::Confirm).await.unwrap();

  assert_eq!(after.details, before.details);
  assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
#[serial]
async fn legacy_statuses_are_not_valid_targets() {
  setup_tracing();
  let (_, manager) = seeded();
  let id = manager.list().await.unwrap()[0].id;

  let err = manager.set_status(id, OrderStatus::Approved).await.unwrap_err();
  assert!(matches!(err, ServiceError::Invalid(_)));
  assert_eq!(manager.get(id).await.unwrap().status, OrderStatus::Cancelled);
}

#[tokio::test]
#[serial]
async fn unknown_order_is_not_found() {
  setup_tracing();
  let (_, manager) = seeded();
  let missing = Uuid::new_v4();

  assert!(matches!(manager.get(missing).await, Err(ServiceError::NotFound { entity: "order", .. })));
  assert!(matches!(
    manager.transition(missing, StatusAction::Confirm).await,
    Err(ServiceError::NotFound { .. })
  ));
}

#[tokio::test]
#[serial]
async fn counts_per_tab() {
  setup_tracing();
  let (_, manager) = seeded();
  let counts = manager.status_counts().await.unwrap();
  assert_eq!((counts.all, counts.pending, counts.confirmed, counts.cancelled), (3, 1, 1, 1));
}
