// core/src/store/memory.rs

//! An in-process store implementing every storage trait. Locks are released
//! before each method returns, so nothing is held across an `.await`.

use super::{AccountStore, CatalogStore, OrderStore, PricingTierStore};
use crate::error::{StoreError, StoreResult};
use crate::model::{
  AdminAccount, Destination, DuplicateKey, ExistingOrder, Experience, HeroImage, Order, OrderDraft, OrderStatus,
  Package, PricingTarget, PricingTier, Testimonial, TierPatch, TierRecord, Trip,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Name reported in [`StoreError::Conflict`] for the order natural key.
pub const ORDER_KEY_CONSTRAINT: &str = "users_booking_key";

#[derive(Default)]
struct Tables {
  // Insertion sequence breaks ties between equal timestamps.
  orders: Vec<(u64, Order)>,
  next_seq: u64,
  destinations: Vec<Destination>,
  packages: Vec<Package>,
  experiences: Vec<Experience>,
  trips: Vec<Trip>,
  testimonials: Vec<Testimonial>,
  hero_images: Vec<HeroImage>,
  tiers: Vec<PricingTier>,
  accounts: HashMap<String, AdminAccount>,
}

impl Tables {
  fn push_order(&mut self, order: Order) -> Order {
    self.next_seq += 1;
    self.orders.push((self.next_seq, order.clone()));
    order
  }
}

/// Thread-safe in-memory implementation of the store traits.
#[derive(Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts an order as-is, bypassing the natural-key constraint. Useful for
  /// reproducing rows written before the constraint existed.
  pub fn seed_order(&self, draft: OrderDraft, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    let order = Order {
      id: Uuid::new_v4(),
      details: draft,
      status,
      created_at,
    };
    self.tables.write().push_order(order)
  }

  pub fn seed_destination(&self, destination: Destination) {
    self.tables.write().destinations.push(destination);
  }

  pub fn seed_package(&self, package: Package) {
    self.tables.write().packages.push(package);
  }

  pub fn seed_experience(&self, experience: Experience) {
    self.tables.write().experiences.push(experience);
  }

  pub fn seed_trip(&self, trip: Trip) {
    self.tables.write().trips.push(trip);
  }

  pub fn seed_testimonial(&self, testimonial: Testimonial) {
    self.tables.write().testimonials.push(testimonial);
  }

  pub fn seed_hero_image(&self, image: HeroImage) {
    self.tables.write().hero_images.push(image);
  }

  pub fn seed_tier(&self, tier: PricingTier) {
    self.tables.write().tiers.push(tier);
  }

  pub fn order_count(&self) -> usize {
    self.tables.read().orders.len()
  }
}

fn by_created_at<T>(items: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T>
where
  T: Clone,
{
  let mut sorted = items.to_vec();
  sorted.sort_by_key(|item| created_at(item));
  sorted
}

#[async_trait]
impl OrderStore for MemoryStore {
  async fn latest_by_key(&self, key: &DuplicateKey) -> StoreResult<Option<ExistingOrder>> {
    let tables = self.tables.read();
    let latest = tables
      .orders
      .iter()
      .filter(|(_, order)| order.details.key() == *key)
      .max_by_key(|(seq, order)| (order.created_at, *seq))
      .map(|(_, order)| ExistingOrder::from(order));
    Ok(latest)
  }

  async fn insert(&self, draft: &OrderDraft, status: OrderStatus) -> StoreResult<Order> {
    let key = draft.key();
    let mut tables = self.tables.write();
    if tables.orders.iter().any(|(_, order)| order.details.key() == key) {
      return Err(StoreError::Conflict {
        constraint: ORDER_KEY_CONSTRAINT.to_string(),
      });
    }
    let order = Order {
      id: Uuid::new_v4(),
      details: draft.clone(),
      status,
      created_at: Utc::now(),
    };
    Ok(tables.push_order(order))
  }

  async fn list(&self) -> StoreResult<Vec<Order>> {
    let tables = self.tables.read();
    let mut rows: Vec<&(u64, Order)> = tables.orders.iter().collect();
    rows.sort_by(|(seq_a, a), (seq_b, b)| (b.created_at, seq_b).cmp(&(a.created_at, seq_a)));
    Ok(rows.into_iter().map(|(_, order)| order.clone()).collect())
  }

  async fn get(&self, id: Uuid) -> StoreResult<Option<Order>> {
    let tables = self.tables.read();
    Ok(tables.orders.iter().find(|(_, o)| o.id == id).map(|(_, o)| o.clone()))
  }

  async fn set_status(&self, id: Uuid, status: OrderStatus) -> StoreResult<Option<Order>> {
    let mut tables = self.tables.write();
    Ok(tables.orders.iter_mut().find(|(_, o)| o.id == id).map(|(_, order)| {
      order.status = status;
      order.clone()
    }))
  }
}

#[async_trait]
impl CatalogStore for MemoryStore {
  async fn destinations(&self) -> StoreResult<Vec<Destination>> {
    Ok(by_created_at(&self.tables.read().destinations, |d| d.created_at))
  }

  async fn destination(&self, id: &str) -> StoreResult<Option<Destination>> {
    Ok(self.tables.read().destinations.iter().find(|d| d.id == id).cloned())
  }

  async fn packages(&self) -> StoreResult<Vec<Package>> {
    Ok(by_created_at(&self.tables.read().packages, |p| p.created_at))
  }

  async fn package(&self, id: &str) -> StoreResult<Option<Package>> {
    Ok(self.tables.read().packages.iter().find(|p| p.id == id).cloned())
  }

  async fn experiences(&self) -> StoreResult<Vec<Experience>> {
    Ok(by_created_at(&self.tables.read().experiences, |e| e.created_at))
  }

  async fn experience(&self, id: &str) -> StoreResult<Option<Experience>> {
    Ok(self.tables.read().experiences.iter().find(|e| e.id == id).cloned())
  }

  async fn trips(&self, destination_id: Option<&str>) -> StoreResult<Vec<Trip>> {
    let tables = self.tables.read();
    let matching: Vec<Trip> = tables
      .trips
      .iter()
      .filter(|t| destination_id.map_or(true, |d| t.destination_id == d))
      .cloned()
      .collect();
    Ok(by_created_at(&matching, |t| t.created_at))
  }

  async fn trip(&self, id: i64) -> StoreResult<Option<Trip>> {
    Ok(self.tables.read().trips.iter().find(|t| t.id == id).cloned())
  }

  async fn testimonials(&self) -> StoreResult<Vec<Testimonial>> {
    Ok(by_created_at(&self.tables.read().testimonials, |t| t.created_at))
  }

  async fn hero_images(&self) -> StoreResult<Vec<HeroImage>> {
    let mut images = self.tables.read().hero_images.clone();
    images.sort_by_key(|i| i.order_index);
    Ok(images)
  }
}

#[async_trait]
impl PricingTierStore for MemoryStore {
  async fn tiers_for(&self, target: &PricingTarget) -> StoreResult<Vec<PricingTier>> {
    let tables = self.tables.read();
    Ok(tables.tiers.iter().filter(|t| t.target == *target).cloned().collect())
  }

  async fn create_tier(&self, record: TierRecord) -> StoreResult<PricingTier> {
    let tier = PricingTier {
      id: Uuid::new_v4(),
      target: record.target,
      people_count: record.people_count,
      price: record.price,
      currency: record.currency,
      sort_order: record.sort_order,
      created_at: Utc::now(),
    };
    self.tables.write().tiers.push(tier.clone());
    Ok(tier)
  }

  async fn update_tier(&self, id: Uuid, patch: &TierPatch) -> StoreResult<Option<PricingTier>> {
    let mut tables = self.tables.write();
    Ok(tables.tiers.iter_mut().find(|t| t.id == id).map(|tier| {
      patch.apply(tier);
      tier.clone()
    }))
  }

  async fn delete_tier(&self, id: Uuid) -> StoreResult<bool> {
    let mut tables = self.tables.write();
    let before = tables.tiers.len();
    tables.tiers.retain(|t| t.id != id);
    Ok(tables.tiers.len() != before)
  }
}

#[async_trait]
impl AccountStore for MemoryStore {
  async fn account_by_email(&self, email: &str) -> StoreResult<Option<AdminAccount>> {
    Ok(self.tables.read().accounts.get(email).cloned())
  }

  async fn upsert_account(&self, email: &str, password_hash: &str) -> StoreResult<AdminAccount> {
    let mut tables = self.tables.write();
    let account = tables
      .accounts
      .entry(email.to_string())
      .and_modify(|a| a.password_hash = password_hash.to_string())
      .or_insert_with(|| AdminAccount {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: Utc::now(),
      });
    Ok(account.clone())
  }
}
