// core/src/booking/notifier.rs

use crate::error::DeliveryFailure;
use crate::model::{Order, OrderDraft};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Body relayed to the order-notification endpoint: every submitted field plus
/// the stored id and the time of relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNotification {
  #[serde(flatten)]
  pub details: OrderDraft,
  pub id: Uuid,
  pub created_at: DateTime<Utc>,
}

impl OrderNotification {
  /// Stamps the notification with the current time. This is the relay time,
  /// not the stored row's `created_at`.
  pub fn for_order(order: &Order) -> Self {
    Self {
      details: order.details.clone(),
      id: order.id,
      created_at: Utc::now(),
    }
  }
}

/// Outbound channel for newly stored orders.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
  async fn notify(&self, notification: &OrderNotification) -> Result<(), DeliveryFailure>;
}

/// Whether a failed notification fails the whole submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationPolicy {
  /// The submission reports failure, although the order is already stored.
  #[default]
  Required,
  /// The failure is logged and the submission still succeeds.
  BestEffort,
}

impl FromStr for NotificationPolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "required" => Ok(NotificationPolicy::Required),
      "best_effort" | "best-effort" => Ok(NotificationPolicy::BestEffort),
      other => Err(format!("unknown notification policy '{}'", other)),
    }
  }
}
