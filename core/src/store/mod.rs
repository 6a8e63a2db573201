// core/src/store/mod.rs

//! Storage seams. The web crate backs these with Postgres; tests and local
//! development use [`MemoryStore`].

pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreResult;
use crate::model::{
  AdminAccount, Destination, DuplicateKey, ExistingOrder, Experience, HeroImage, Order, OrderDraft, OrderStatus,
  Package, PricingTarget, PricingTier, Testimonial, TierPatch, TierRecord, Trip,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Customer orders (the `users` table).
#[async_trait]
pub trait OrderStore: Send + Sync {
  /// The most recently created order with exactly this natural key.
  async fn latest_by_key(&self, key: &DuplicateKey) -> StoreResult<Option<ExistingOrder>>;

  /// Inserts a new order. A natural-key collision is reported as
  /// [`StoreError::Conflict`](crate::error::StoreError::Conflict).
  async fn insert(&self, draft: &OrderDraft, status: OrderStatus) -> StoreResult<Order>;

  /// All orders, newest first.
  async fn list(&self) -> StoreResult<Vec<Order>>;

  async fn get(&self, id: Uuid) -> StoreResult<Option<Order>>;

  /// Overwrites the status of one order, returning the updated row.
  async fn set_status(&self, id: Uuid, status: OrderStatus) -> StoreResult<Option<Order>>;
}

/// Published catalog content. List methods return creation order.
#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn destinations(&self) -> StoreResult<Vec<Destination>>;
  async fn destination(&self, id: &str) -> StoreResult<Option<Destination>>;
  async fn packages(&self) -> StoreResult<Vec<Package>>;
  async fn package(&self, id: &str) -> StoreResult<Option<Package>>;
  async fn experiences(&self) -> StoreResult<Vec<Experience>>;
  async fn experience(&self, id: &str) -> StoreResult<Option<Experience>>;
  async fn trips(&self, destination_id: Option<&str>) -> StoreResult<Vec<Trip>>;
  async fn trip(&self, id: i64) -> StoreResult<Option<Trip>>;
  async fn testimonials(&self) -> StoreResult<Vec<Testimonial>>;
  /// Hero carousel images ordered by `order_index`.
  async fn hero_images(&self) -> StoreResult<Vec<HeroImage>>;
}

#[async_trait]
pub trait PricingTierStore: Send + Sync {
  /// Tiers for one target, in the store's natural order. Callers sort.
  async fn tiers_for(&self, target: &PricingTarget) -> StoreResult<Vec<PricingTier>>;
  async fn create_tier(&self, record: TierRecord) -> StoreResult<PricingTier>;
  async fn update_tier(&self, id: Uuid, patch: &TierPatch) -> StoreResult<Option<PricingTier>>;
  /// Returns whether a row was removed.
  async fn delete_tier(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
  async fn account_by_email(&self, email: &str) -> StoreResult<Option<AdminAccount>>;
  async fn upsert_account(&self, email: &str, password_hash: &str) -> StoreResult<AdminAccount>;
}
