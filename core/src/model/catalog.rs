// core/src/model/catalog.rs

//! Read-only catalog records shown on the public site.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
  pub id: String,
  pub name: String,
  pub region: String,
  #[serde(default)]
  pub activities: Vec<String>,
  pub image: String,
  pub description: String,
  #[serde(default)]
  pub highlights: Vec<String>,
  pub created_at: DateTime<Utc>,
}

/// A multi-day package. `price` is display text as entered by the editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
  pub id: String,
  pub title: String,
  pub description: String,
  pub duration: String,
  pub group_size: String,
  pub rating: f64,
  pub price: String,
  pub image: String,
  #[serde(default)]
  pub highlights: Vec<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
  pub id: String,
  pub title: String,
  pub description: String,
  pub image: String,
  pub category: String,
  #[serde(default)]
  pub duration: Option<String>,
  pub price: String,
  pub created_at: DateTime<Utc>,
}

/// A dated trip belonging to a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
  pub id: i64,
  pub destination_id: String,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub image_url: String,
  #[serde(default)]
  pub inclusions: Vec<String>,
  #[serde(default)]
  pub exclusions: Vec<String>,
  #[serde(default)]
  pub meeting_point: Option<String>,
  #[serde(default)]
  pub things_to_remember: Vec<String>,
  #[serde(default)]
  pub cancellation_policy: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
  pub id: String,
  pub name: String,
  pub location: String,
  pub trip: String,
  pub rating: f64,
  pub content: String,
  #[serde(default)]
  pub avatar: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
  pub id: String,
  pub url: String,
  pub alt: String,
  pub order_index: i32,
}
