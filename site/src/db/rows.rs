// site/src/db/rows.rs

//! Row shapes as stored in Postgres, converted into domain models.

use chrono::{DateTime, NaiveDate, Utc};
use pharaoh::model::{
  AdminAccount, Destination, ExistingOrder, Experience, HeroImage, Order, OrderDraft, OrderStatus, Package,
  PricingTarget, PricingTier, Testimonial, Trip,
};
use pharaoh::StoreError;
use sqlx::FromRow;
use uuid::Uuid;

pub const ORDER_COLUMNS: &str = "id, name, email, phone, address, notes, date, people, source_page, source_id, \
   source_name, price, status, created_at";

pub const TIER_COLUMNS: &str = "id, trip_id, experience_id, people_count, price, currency, sort_order, created_at";

fn parse_status(raw: &str) -> Result<OrderStatus, StoreError> {
  raw.parse().map_err(|e: pharaoh::model::ParseStatusError| StoreError::Backend(e.to_string()))
}

fn non_negative(column: &str, value: i32) -> Result<u32, StoreError> {
  u32::try_from(value).map_err(|_| StoreError::Backend(format!("negative {} in stored row: {}", column, value)))
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub address: Option<String>,
  pub notes: Option<String>,
  pub date: NaiveDate,
  pub people: i32,
  pub source_page: String,
  pub source_id: String,
  pub source_name: String,
  pub price: Option<f64>,
  pub status: String,
  pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
  type Error = StoreError;

  fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
    Ok(Order {
      id: row.id,
      status: parse_status(&row.status)?,
      created_at: row.created_at,
      details: OrderDraft {
        name: row.name,
        email: row.email,
        phone: row.phone,
        address: row.address,
        notes: row.notes,
        date: row.date,
        people: non_negative("people", row.people)?,
        source_page: row.source_page.into(),
        source_id: row.source_id,
        source_name: row.source_name,
        price: row.price,
      },
    })
  }
}

#[derive(Debug, FromRow)]
pub struct ExistingOrderRow {
  pub id: Uuid,
  pub created_at: DateTime<Utc>,
  pub status: String,
}

impl TryFrom<ExistingOrderRow> for ExistingOrder {
  type Error = StoreError;

  fn try_from(row: ExistingOrderRow) -> Result<Self, Self::Error> {
    Ok(ExistingOrder {
      id: row.id,
      created_at: row.created_at,
      status: parse_status(&row.status)?,
    })
  }
}

#[derive(Debug, FromRow)]
pub struct DestinationRow {
  pub id: String,
  pub name: String,
  pub region: String,
  pub activities: Vec<String>,
  pub image: String,
  pub description: String,
  pub highlights: Vec<String>,
  pub created_at: DateTime<Utc>,
}

impl From<DestinationRow> for Destination {
  fn from(row: DestinationRow) -> Self {
    Destination {
      id: row.id,
      name: row.name,
      region: row.region,
      activities: row.activities,
      image: row.image,
      description: row.description,
      highlights: row.highlights,
      created_at: row.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct PackageRow {
  pub id: String,
  pub title: String,
  pub description: String,
  pub duration: String,
  pub group_size: String,
  pub rating: f64,
  pub price: String,
  pub image: String,
  pub highlights: Vec<String>,
  pub created_at: DateTime<Utc>,
}

impl From<PackageRow> for Package {
  fn from(row: PackageRow) -> Self {
    Package {
      id: row.id,
      title: row.title,
      description: row.description,
      duration: row.duration,
      group_size: row.group_size,
      rating: row.rating,
      price: row.price,
      image: row.image,
      highlights: row.highlights,
      created_at: row.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct ExperienceRow {
  pub id: String,
  pub title: String,
  pub description: String,
  pub image: String,
  pub category: String,
  pub duration: Option<String>,
  pub price: String,
  pub created_at: DateTime<Utc>,
}

impl From<ExperienceRow> for Experience {
  fn from(row: ExperienceRow) -> Self {
    Experience {
      id: row.id,
      title: row.title,
      description: row.description,
      image: row.image,
      category: row.category,
      duration: row.duration,
      price: row.price,
      created_at: row.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct TripRow {
  pub id: i64,
  pub destination_id: String,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub image_url: String,
  pub inclusions: Vec<String>,
  pub exclusions: Vec<String>,
  pub meeting_point: Option<String>,
  pub things_to_remember: Vec<String>,
  pub cancellation_policy: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<TripRow> for Trip {
  fn from(row: TripRow) -> Self {
    Trip {
      id: row.id,
      destination_id: row.destination_id,
      name: row.name,
      description: row.description,
      price: row.price,
      start_date: row.start_date,
      end_date: row.end_date,
      image_url: row.image_url,
      inclusions: row.inclusions,
      exclusions: row.exclusions,
      meeting_point: row.meeting_point,
      things_to_remember: row.things_to_remember,
      cancellation_policy: row.cancellation_policy,
      created_at: row.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct TestimonialRow {
  pub id: String,
  pub name: String,
  pub location: String,
  pub trip: String,
  pub rating: f64,
  pub content: String,
  pub avatar: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<TestimonialRow> for Testimonial {
  fn from(row: TestimonialRow) -> Self {
    Testimonial {
      id: row.id,
      name: row.name,
      location: row.location,
      trip: row.trip,
      rating: row.rating,
      content: row.content,
      avatar: row.avatar,
      created_at: row.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct HeroImageRow {
  pub id: String,
  pub url: String,
  pub alt: String,
  pub order_index: i32,
}

impl From<HeroImageRow> for HeroImage {
  fn from(row: HeroImageRow) -> Self {
    HeroImage {
      id: row.id,
      url: row.url,
      alt: row.alt,
      order_index: row.order_index,
    }
  }
}

#[derive(Debug, FromRow)]
pub struct TierRow {
  pub id: Uuid,
  pub trip_id: Option<i64>,
  pub experience_id: Option<String>,
  pub people_count: i32,
  pub price: f64,
  pub currency: String,
  pub sort_order: i32,
  pub created_at: DateTime<Utc>,
}

impl TryFrom<TierRow> for PricingTier {
  type Error = StoreError;

  fn try_from(row: TierRow) -> Result<Self, Self::Error> {
    let target = PricingTarget::from_parts(row.trip_id, row.experience_id)
      .ok_or_else(|| StoreError::Backend(format!("pricing tier {} has no single target", row.id)))?;
    Ok(PricingTier {
      id: row.id,
      target,
      people_count: non_negative("people_count", row.people_count)?,
      price: row.price,
      currency: row.currency,
      sort_order: row.sort_order,
      created_at: row.created_at,
    })
  }
}

#[derive(Debug, FromRow)]
pub struct AdminRow {
  pub id: Uuid,
  pub email: String,
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

impl From<AdminRow> for AdminAccount {
  fn from(row: AdminRow) -> Self {
    AdminAccount {
      id: row.id,
      email: row.email,
      password_hash: row.password_hash,
      created_at: row.created_at,
    }
  }
}
