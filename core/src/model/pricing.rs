// core/src/model/pricing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_CURRENCY: &str = "USD";

/// What a pricing tier is attached to. A tier belongs to exactly one trip or
/// one experience; on the wire this is the `trip_id` / `experience_id` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TargetFields", into = "TargetFields")]
pub enum PricingTarget {
  Trip(i64),
  Experience(String),
}

impl PricingTarget {
  /// Builds a target from the optional column pair. Exactly one must be set.
  pub fn from_parts(trip_id: Option<i64>, experience_id: Option<String>) -> Option<Self> {
    match (trip_id, experience_id.filter(|id| !id.is_empty())) {
      (Some(trip), None) => Some(PricingTarget::Trip(trip)),
      (None, Some(experience)) => Some(PricingTarget::Experience(experience)),
      _ => None,
    }
  }

  pub fn trip_id(&self) -> Option<i64> {
    match self {
      PricingTarget::Trip(id) => Some(*id),
      PricingTarget::Experience(_) => None,
    }
  }

  pub fn experience_id(&self) -> Option<&str> {
    match self {
      PricingTarget::Trip(_) => None,
      PricingTarget::Experience(id) => Some(id),
    }
  }
}

impl fmt::Display for PricingTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PricingTarget::Trip(id) => write!(f, "trip {}", id),
      PricingTarget::Experience(id) => write!(f, "experience {}", id),
    }
  }
}

#[derive(Serialize, Deserialize)]
struct TargetFields {
  #[serde(default)]
  trip_id: Option<i64>,
  #[serde(default)]
  experience_id: Option<String>,
}

impl TryFrom<TargetFields> for PricingTarget {
  type Error = String;

  fn try_from(fields: TargetFields) -> Result<Self, Self::Error> {
    PricingTarget::from_parts(fields.trip_id, fields.experience_id)
      .ok_or_else(|| "exactly one of trip_id or experience_id must be set".to_string())
  }
}

impl From<PricingTarget> for TargetFields {
  fn from(target: PricingTarget) -> Self {
    match target {
      PricingTarget::Trip(id) => TargetFields {
        trip_id: Some(id),
        experience_id: None,
      },
      PricingTarget::Experience(id) => TargetFields {
        trip_id: None,
        experience_id: Some(id),
      },
    }
  }
}

/// A per-group-size price row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
  pub id: Uuid,
  #[serde(flatten)]
  pub target: PricingTarget,
  pub people_count: u32,
  pub price: f64,
  pub currency: String,
  pub sort_order: i32,
  pub created_at: DateTime<Utc>,
}

/// Editor input for a new tier. Price stays optional here so a missing value
/// can be rejected with a readable message instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPricingTier {
  pub people_count: u32,
  #[serde(default)]
  pub price: Option<f64>,
  #[serde(default)]
  pub currency: Option<String>,
  #[serde(default)]
  pub sort_order: Option<i32>,
}

/// Partial update of an existing tier; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierPatch {
  #[serde(default)]
  pub people_count: Option<u32>,
  #[serde(default)]
  pub price: Option<f64>,
  #[serde(default)]
  pub currency: Option<String>,
  #[serde(default)]
  pub sort_order: Option<i32>,
}

impl TierPatch {
  pub fn is_empty(&self) -> bool {
    self.people_count.is_none() && self.price.is_none() && self.currency.is_none() && self.sort_order.is_none()
  }

  pub fn apply(&self, tier: &mut PricingTier) {
    if let Some(people_count) = self.people_count {
      tier.people_count = people_count;
    }
    if let Some(price) = self.price {
      tier.price = price;
    }
    if let Some(currency) = &self.currency {
      tier.currency = currency.clone();
    }
    if let Some(sort_order) = self.sort_order {
      tier.sort_order = sort_order;
    }
  }
}

/// A validated tier ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRecord {
  pub target: PricingTarget,
  pub people_count: u32,
  pub price: f64,
  pub currency: String,
  pub sort_order: i32,
}
