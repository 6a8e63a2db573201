// tests/pricing_editor_tests.rs
mod common;
use chrono::Utc;
use common::setup_tracing;
use pharaoh::error::ServiceError;
use pharaoh::model::{NewPricingTier, PricingTarget, PricingTier, TierPatch};
use pharaoh::{MemoryStore, PricingEditor};
use serial_test::serial;
use std::sync::Arc;
use uuid::Uuid;

fn tier(target: &PricingTarget, people_count: u32, price: f64, sort_order: i32) -> PricingTier {
  PricingTier {
    id: Uuid::new_v4(),
    target: target.clone(),
    people_count,
    price,
    currency: "USD".to_string(),
    sort_order,
    created_at: Utc::now(),
  }
}

fn new_tier(people_count: u32, price: Option<f64>) -> NewPricingTier {
  NewPricingTier {
    people_count,
    price,
    ..Default::default()
  }
}

#[tokio::test]
#[serial]
async fn tiers_come_back_in_sort_order() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let exp = PricingTarget::Experience("exp-1".to_string());
  store.seed_tier(tier(&exp, 4, 160.0, 2));
  store.seed_tier(tier(&exp, 1, 50.0, 1));
  store.seed_tier(tier(&PricingTarget::Trip(9), 1, 70.0, 0));
  let editor = PricingEditor::new(store);

  let tiers = editor.tiers(&exp).await.unwrap();

  let people: Vec<u32> = tiers.iter().map(|t| t.people_count).collect();
  assert_eq!(people, [1, 4]);
  assert_eq!(PricingEditor::next_sort_order(&tiers), 3);
}

#[test]
fn next_sort_order_starts_at_one() {
  assert_eq!(PricingEditor::next_sort_order(&[]), 1);
}

#[tokio::test]
#[serial]
async fn add_appends_after_the_last_tier() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let trip = PricingTarget::Trip(12);
  let editor = PricingEditor::new(store);

  let first = editor.add(trip.clone(), new_tier(1, Some(80.0))).await.unwrap();
  let second = editor.add(trip.clone(), new_tier(2, Some(150.0))).await.unwrap();

  assert_eq!(first.sort_order, 1);
  assert_eq!(second.sort_order, 2);
  assert_eq!(second.currency, "USD");
  assert_eq!(second.target, trip);
}

#[tokio::test]
#[serial]
async fn add_rejects_missing_price_and_empty_group() {
  setup_tracing();
  let editor = PricingEditor::new(Arc::new(MemoryStore::new()));
  let exp = PricingTarget::Experience("exp-2".to_string());

  assert!(matches!(editor.add(exp.clone(), new_tier(0, Some(10.0))).await, Err(ServiceError::Invalid(_))));
  assert!(matches!(editor.add(exp.clone(), new_tier(2, None)).await, Err(ServiceError::Invalid(_))));
  assert!(editor.tiers(&exp).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn update_and_remove() {
  setup_tracing();
  let editor = PricingEditor::new(Arc::new(MemoryStore::new()));
  let exp = PricingTarget::Experience("exp-3".to_string());
  let created = editor.add(exp.clone(), new_tier(2, Some(90.0))).await.unwrap();

  let patch = TierPatch {
    price: Some(95.0),
    ..Default::default()
  };
  let updated = editor.update(created.id, patch).await.unwrap();
  assert_eq!(updated.price, 95.0);
  assert_eq!(updated.people_count, 2);

  editor.remove(created.id).await.unwrap();
  assert!(editor.tiers(&exp).await.unwrap().is_empty());
  assert!(matches!(editor.remove(created.id).await, Err(ServiceError::NotFound { .. })));
}

#[test]
fn target_requires_exactly_one_id() {
  assert_eq!(PricingTarget::from_parts(Some(3), None), Some(PricingTarget::Trip(3)));
  assert_eq!(
    PricingTarget::from_parts(None, Some("exp-1".to_string())),
    Some(PricingTarget::Experience("exp-1".to_string()))
  );
  assert_eq!(PricingTarget::from_parts(Some(3), Some("exp-1".to_string())), None);
  assert_eq!(PricingTarget::from_parts(None, Some(String::new())), None);
  assert_eq!(PricingTarget::from_parts(None, None), None);
}

#[test]
fn tier_json_uses_id_columns() {
  let t = tier(&PricingTarget::Trip(5), 2, 120.0, 1);
  let json = serde_json::to_value(&t).unwrap();
  assert_eq!(json["trip_id"], 5);
  assert!(json["experience_id"].is_null());

  let back: PricingTier = serde_json::from_value(json).unwrap();
  assert_eq!(back.target, PricingTarget::Trip(5));
}
