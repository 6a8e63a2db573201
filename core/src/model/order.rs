// core/src/model/order.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// The catalog section an order was placed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourcePage {
  Package,
  Experience,
  Trip,
  Other(String),
}

impl SourcePage {
  pub fn as_str(&self) -> &str {
    match self {
      SourcePage::Package => "package",
      SourcePage::Experience => "experience",
      SourcePage::Trip => "trip",
      SourcePage::Other(raw) => raw.as_str(),
    }
  }
}

impl From<String> for SourcePage {
  fn from(raw: String) -> Self {
    match raw.as_str() {
      "package" => SourcePage::Package,
      "experience" => SourcePage::Experience,
      "trip" => SourcePage::Trip,
      _ => SourcePage::Other(raw),
    }
  }
}

impl From<&str> for SourcePage {
  fn from(raw: &str) -> Self {
    SourcePage::from(raw.to_string())
  }
}

impl From<SourcePage> for String {
  fn from(page: SourcePage) -> Self {
    match page {
      SourcePage::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

impl fmt::Display for SourcePage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Order lifecycle status. `Approved` and `Rejected` are legacy values that only
/// appear in historical rows and analytics; new transitions never produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Cancelled,
  Approved,
  Rejected,
}

impl OrderStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Confirmed => "confirmed",
      OrderStatus::Cancelled => "cancelled",
      OrderStatus::Approved => "approved",
      OrderStatus::Rejected => "rejected",
    }
  }

  pub fn is_legacy(self) -> bool {
    matches!(self, OrderStatus::Approved | OrderStatus::Rejected)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
  type Err = ParseStatusError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(OrderStatus::Pending),
      "confirmed" => Ok(OrderStatus::Confirmed),
      "cancelled" => Ok(OrderStatus::Cancelled),
      "approved" => Ok(OrderStatus::Approved),
      "rejected" => Ok(OrderStatus::Rejected),
      other => Err(ParseStatusError(other.to_string())),
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The natural key of an order: one booking per email, catalog item and date.
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuplicateKey {
  pub email: String,
  pub source_page: SourcePage,
  pub source_id: String,
  pub date: NaiveDate,
}

impl fmt::Display for DuplicateKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}/{}/{}", self.email, self.source_page, self.source_id, self.date)
  }
}

/// What a visitor submits from a booking form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
  pub name: String,
  pub email: String,
  pub phone: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  pub date: NaiveDate,
  pub people: u32,
  pub source_page: SourcePage,
  pub source_id: String,
  pub source_name: String,
  #[serde(default)]
  pub price: Option<f64>,
}

impl OrderDraft {
  pub fn key(&self) -> DuplicateKey {
    DuplicateKey {
      email: self.email.clone(),
      source_page: self.source_page.clone(),
      source_id: self.source_id.clone(),
      date: self.date,
    }
  }

  /// Checks the fields a booking form requires. Returns the first problem found.
  pub fn validate(&self) -> Result<(), String> {
    let required = [
      ("name", &self.name),
      ("email", &self.email),
      ("phone", &self.phone),
      ("source_id", &self.source_id),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
      return Err(format!("{} is required", field));
    }
    if !self.email.contains('@') {
      return Err("email must be a valid address".to_string());
    }
    if self.people == 0 {
      return Err("people must be at least 1".to_string());
    }
    if matches!(self.price, Some(p) if !p.is_finite() || p < 0.0) {
      return Err("price must be a non-negative number".to_string());
    }
    Ok(())
  }
}

/// A persisted order (stored as a `users` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  #[serde(flatten)]
  pub details: OrderDraft,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

/// The slice of a prior order the duplicate check reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingOrder {
  pub id: Uuid,
  pub created_at: DateTime<Utc>,
  pub status: OrderStatus,
}

impl From<&Order> for ExistingOrder {
  fn from(order: &Order) -> Self {
    ExistingOrder {
      id: order.id,
      created_at: order.created_at,
      status: order.status,
    }
  }
}
