// site/src/db/pg_store.rs

//! Postgres implementation of the storage traits.

use super::rows::{
  AdminRow, DestinationRow, ExistingOrderRow, ExperienceRow, HeroImageRow, OrderRow, PackageRow, TestimonialRow,
  TierRow, TripRow, ORDER_COLUMNS, TIER_COLUMNS,
};
use async_trait::async_trait;
use pharaoh::model::{
  AdminAccount, Destination, DuplicateKey, ExistingOrder, Experience, HeroImage, Order, OrderDraft, OrderStatus,
  Package, PricingTarget, PricingTier, Testimonial, TierPatch, TierRecord, Trip,
};
use pharaoh::{AccountStore, CatalogStore, OrderStore, PricingTierStore, StoreError, StoreResult};
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Maps a driver error onto the store taxonomy. Unique violations (SQLSTATE
/// 23505) become `Conflict` carrying the constraint name.
pub fn store_error(err: sqlx::Error) -> StoreError {
  match &err {
    sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
      Some("23505") => StoreError::Conflict {
        constraint: db_err.constraint().unwrap_or("unique").to_string(),
      },
      Some("42501") => StoreError::PermissionDenied(db_err.message().to_string()),
      _ => StoreError::Backend(db_err.message().to_string()),
    },
    sqlx::Error::PoolTimedOut => StoreError::Unavailable {
      timed_out: true,
      detail: err.to_string(),
    },
    sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => StoreError::Unavailable {
      timed_out: false,
      detail: err.to_string(),
    },
    _ => StoreError::Backend(err.to_string()),
  }
}

fn to_i32(column: &str, value: u32) -> StoreResult<i32> {
  i32::try_from(value).map_err(|_| StoreError::Backend(format!("{} out of range: {}", column, value)))
}

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn fetch_orders(&self, sql: &str) -> StoreResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(sql)
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    rows.into_iter().map(Order::try_from).collect()
  }
}

#[async_trait]
impl OrderStore for PgStore {
  #[instrument(name = "PgStore::latest_by_key", skip(self), err(Display))]
  async fn latest_by_key(&self, key: &DuplicateKey) -> StoreResult<Option<ExistingOrder>> {
    let row = sqlx::query_as::<_, ExistingOrderRow>(
      "SELECT id, created_at, status FROM users \
       WHERE email = $1 AND source_page = $2 AND source_id = $3 AND date = $4 \
       ORDER BY created_at DESC LIMIT 1",
    )
    .bind(&key.email)
    .bind(key.source_page.as_str())
    .bind(&key.source_id)
    .bind(key.date)
    .fetch_optional(&self.pool)
    .await
    .map_err(store_error)?;
    row.map(ExistingOrder::try_from).transpose()
  }

  #[instrument(name = "PgStore::insert", skip(self, draft), fields(source_id = %draft.source_id), err(Display))]
  async fn insert(&self, draft: &OrderDraft, status: OrderStatus) -> StoreResult<Order> {
    let sql = format!(
      "INSERT INTO users (name, email, phone, address, notes, date, people, source_page, source_id, source_name, \
       price, status) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING {}",
      ORDER_COLUMNS
    );
    let row = sqlx::query_as::<_, OrderRow>(&sql)
      .bind(&draft.name)
      .bind(&draft.email)
      .bind(&draft.phone)
      .bind(&draft.address)
      .bind(&draft.notes)
      .bind(draft.date)
      .bind(to_i32("people", draft.people)?)
      .bind(draft.source_page.as_str())
      .bind(&draft.source_id)
      .bind(&draft.source_name)
      .bind(draft.price)
      .bind(status.as_str())
      .fetch_one(&self.pool)
      .await
      .map_err(store_error)?;
    let order = Order::try_from(row)?;
    debug!(order_id = %order.id, "Order row inserted.");
    Ok(order)
  }

  async fn list(&self) -> StoreResult<Vec<Order>> {
    self
      .fetch_orders(&format!("SELECT {} FROM users ORDER BY created_at DESC", ORDER_COLUMNS))
      .await
  }

  async fn get(&self, id: Uuid) -> StoreResult<Option<Order>> {
    let sql = format!("SELECT {} FROM users WHERE id = $1", ORDER_COLUMNS);
    let row = sqlx::query_as::<_, OrderRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    row.map(Order::try_from).transpose()
  }

  #[instrument(name = "PgStore::set_status", skip(self), err(Display))]
  async fn set_status(&self, id: Uuid, status: OrderStatus) -> StoreResult<Option<Order>> {
    let sql = format!("UPDATE users SET status = $2 WHERE id = $1 RETURNING {}", ORDER_COLUMNS);
    let row = sqlx::query_as::<_, OrderRow>(&sql)
      .bind(id)
      .bind(status.as_str())
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    if row.is_none() {
      warn!(%id, "Status update matched no order.");
    }
    row.map(Order::try_from).transpose()
  }
}

#[async_trait]
impl CatalogStore for PgStore {
  async fn destinations(&self) -> StoreResult<Vec<Destination>> {
    let rows = sqlx::query_as::<_, DestinationRow>("SELECT * FROM destinations ORDER BY created_at ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(rows.into_iter().map(Destination::from).collect())
  }

  async fn destination(&self, id: &str) -> StoreResult<Option<Destination>> {
    let row = sqlx::query_as::<_, DestinationRow>("SELECT * FROM destinations WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.map(Destination::from))
  }

  async fn packages(&self) -> StoreResult<Vec<Package>> {
    let rows = sqlx::query_as::<_, PackageRow>("SELECT * FROM packages ORDER BY created_at ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(rows.into_iter().map(Package::from).collect())
  }

  async fn package(&self, id: &str) -> StoreResult<Option<Package>> {
    let row = sqlx::query_as::<_, PackageRow>("SELECT * FROM packages WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.map(Package::from))
  }

  async fn experiences(&self) -> StoreResult<Vec<Experience>> {
    let rows = sqlx::query_as::<_, ExperienceRow>("SELECT * FROM experiences ORDER BY created_at ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(rows.into_iter().map(Experience::from).collect())
  }

  async fn experience(&self, id: &str) -> StoreResult<Option<Experience>> {
    let row = sqlx::query_as::<_, ExperienceRow>("SELECT * FROM experiences WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.map(Experience::from))
  }

  async fn trips(&self, destination_id: Option<&str>) -> StoreResult<Vec<Trip>> {
    let rows = sqlx::query_as::<_, TripRow>(
      "SELECT * FROM trips WHERE ($1::text IS NULL OR destination_id = $1) ORDER BY created_at ASC",
    )
    .bind(destination_id)
    .fetch_all(&self.pool)
    .await
    .map_err(store_error)?;
    Ok(rows.into_iter().map(Trip::from).collect())
  }

  async fn trip(&self, id: i64) -> StoreResult<Option<Trip>> {
    let row = sqlx::query_as::<_, TripRow>("SELECT * FROM trips WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.map(Trip::from))
  }

  async fn testimonials(&self) -> StoreResult<Vec<Testimonial>> {
    let rows = sqlx::query_as::<_, TestimonialRow>("SELECT * FROM testimonials ORDER BY created_at ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(rows.into_iter().map(Testimonial::from).collect())
  }

  async fn hero_images(&self) -> StoreResult<Vec<HeroImage>> {
    let rows =
      sqlx::query_as::<_, HeroImageRow>("SELECT id, url, alt, order_index FROM hero_images ORDER BY order_index ASC")
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
    Ok(rows.into_iter().map(HeroImage::from).collect())
  }
}

#[async_trait]
impl PricingTierStore for PgStore {
  async fn tiers_for(&self, target: &PricingTarget) -> StoreResult<Vec<PricingTier>> {
    let rows = match target {
      PricingTarget::Trip(trip_id) => {
        let sql = format!("SELECT {} FROM pricing_tiers WHERE trip_id = $1 ORDER BY created_at ASC", TIER_COLUMNS);
        sqlx::query_as::<_, TierRow>(&sql).bind(*trip_id).fetch_all(&self.pool).await
      }
      PricingTarget::Experience(experience_id) => {
        let sql = format!(
          "SELECT {} FROM pricing_tiers WHERE experience_id = $1 ORDER BY created_at ASC",
          TIER_COLUMNS
        );
        sqlx::query_as::<_, TierRow>(&sql).bind(experience_id).fetch_all(&self.pool).await
      }
    }
    .map_err(store_error)?;
    rows.into_iter().map(PricingTier::try_from).collect()
  }

  #[instrument(name = "PgStore::create_tier", skip(self, record), fields(target = %record.target), err(Display))]
  async fn create_tier(&self, record: TierRecord) -> StoreResult<PricingTier> {
    let sql = format!(
      "INSERT INTO pricing_tiers (trip_id, experience_id, people_count, price, currency, sort_order) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
      TIER_COLUMNS
    );
    let row = sqlx::query_as::<_, TierRow>(&sql)
      .bind(record.target.trip_id())
      .bind(record.target.experience_id())
      .bind(to_i32("people_count", record.people_count)?)
      .bind(record.price)
      .bind(&record.currency)
      .bind(record.sort_order)
      .fetch_one(&self.pool)
      .await
      .map_err(store_error)?;
    PricingTier::try_from(row)
  }

  #[instrument(name = "PgStore::update_tier", skip(self, patch), err(Display))]
  async fn update_tier(&self, id: Uuid, patch: &TierPatch) -> StoreResult<Option<PricingTier>> {
    let people_count = patch.people_count.map(|n| to_i32("people_count", n)).transpose()?;
    let sql = format!(
      "UPDATE pricing_tiers SET people_count = COALESCE($2, people_count), price = COALESCE($3, price), \
       currency = COALESCE($4, currency), sort_order = COALESCE($5, sort_order) WHERE id = $1 RETURNING {}",
      TIER_COLUMNS
    );
    let row = sqlx::query_as::<_, TierRow>(&sql)
      .bind(id)
      .bind(people_count)
      .bind(patch.price)
      .bind(&patch.currency)
      .bind(patch.sort_order)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    row.map(PricingTier::try_from).transpose()
  }

  #[instrument(name = "PgStore::delete_tier", skip(self), err(Display))]
  async fn delete_tier(&self, id: Uuid) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM pricing_tiers WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl AccountStore for PgStore {
  async fn account_by_email(&self, email: &str) -> StoreResult<Option<AdminAccount>> {
    let row = sqlx::query_as::<_, AdminRow>("SELECT id, email, password_hash, created_at FROM admins WHERE email = $1")
      .bind(email)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.map(AdminAccount::from))
  }

  #[instrument(name = "PgStore::upsert_account", skip(self, password_hash), err(Display))]
  async fn upsert_account(&self, email: &str, password_hash: &str) -> StoreResult<AdminAccount> {
    let row = sqlx::query_as::<_, AdminRow>(
      "INSERT INTO admins (email, password_hash) VALUES ($1, $2) \
       ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash \
       RETURNING id, email, password_hash, created_at",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(&self.pool)
    .await
    .map_err(store_error)?;
    Ok(AdminAccount::from(row))
  }
}
