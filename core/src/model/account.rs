// core/src/model/account.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A back-office account allowed into the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminAccount {
  pub id: Uuid,
  pub email: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}
