// core/src/manage/orders.rs

//! Back-office order listing, filtering and status changes.

use crate::error::ServiceError;
use crate::model::{Order, OrderStatus, SourcePage};
use crate::store::OrderStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Admin list filter. `None` for `status` or `source_page` means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
  #[serde(default)]
  pub search: String,
  #[serde(default)]
  pub status: Option<OrderStatus>,
  #[serde(default)]
  pub source_page: Option<SourcePage>,
}

impl OrderFilter {
  /// Search is a case-insensitive substring match on name, email and
  /// source name. A non-empty term also matches the price's decimal text.
  pub fn matches(&self, order: &Order) -> bool {
    self.matches_search(order)
      && self.status.map_or(true, |s| order.status == s)
      && self.source_page.as_ref().map_or(true, |p| order.details.source_page == *p)
  }

  fn matches_search(&self, order: &Order) -> bool {
    let term = self.search.to_lowercase();
    let details = &order.details;
    if details.name.to_lowercase().contains(&term)
      || details.email.to_lowercase().contains(&term)
      || details.source_name.to_lowercase().contains(&term)
    {
      return true;
    }
    match details.price {
      Some(price) if price != 0.0 && !self.search.is_empty() => price.to_string().contains(self.search.as_str()),
      _ => false,
    }
  }
}

pub fn filter_orders<'a>(orders: &'a [Order], filter: &OrderFilter) -> Vec<&'a Order> {
  orders.iter().filter(|o| filter.matches(o)).collect()
}

/// Per-tab counts for the order list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
  pub all: usize,
  pub pending: usize,
  pub confirmed: usize,
  pub cancelled: usize,
}

impl StatusCounts {
  pub fn tally(orders: &[Order]) -> Self {
    orders.iter().fold(
      StatusCounts {
        all: orders.len(),
        ..Default::default()
      },
      |mut counts, order| {
        match order.status {
          OrderStatus::Pending => counts.pending += 1,
          OrderStatus::Confirmed => counts.confirmed += 1,
          OrderStatus::Cancelled => counts.cancelled += 1,
          OrderStatus::Approved | OrderStatus::Rejected => {}
        }
        counts
      },
    )
  }
}

/// The buttons an admin can press on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
  Confirm,
  Cancel,
  Restore,
}

impl StatusAction {
  pub fn target(self) -> OrderStatus {
    match self {
      StatusAction::Confirm => OrderStatus::Confirmed,
      StatusAction::Cancel => OrderStatus::Cancelled,
      StatusAction::Restore => OrderStatus::Pending,
    }
  }
}

#[derive(Clone)]
pub struct OrderManager {
  orders: Arc<dyn OrderStore>,
}

impl OrderManager {
  pub fn new(orders: Arc<dyn OrderStore>) -> Self {
    Self { orders }
  }

  /// Every order, newest first.
  pub async fn list(&self) -> Result<Vec<Order>, ServiceError> {
    self.orders.list().await.map_err(ServiceError::load("orders"))
  }

  #[instrument(name = "OrderManager::list_filtered", skip(self), err(Display))]
  pub async fn list_filtered(&self, filter: &OrderFilter) -> Result<Vec<Order>, ServiceError> {
    let orders = self.list().await?;
    Ok(orders.into_iter().filter(|o| filter.matches(o)).collect())
  }

  pub async fn status_counts(&self) -> Result<StatusCounts, ServiceError> {
    Ok(StatusCounts::tally(&self.list().await?))
  }

  pub async fn get(&self, id: Uuid) -> Result<Order, ServiceError> {
    self
      .orders
      .get(id)
      .await
      .map_err(ServiceError::load("order"))?
      .ok_or_else(|| order_not_found(id))
  }

  pub async fn transition(&self, id: Uuid, action: StatusAction) -> Result<Order, ServiceError> {
    self.set_status(id, action.target()).await
  }

  /// Moves an order to `status` whatever its current status. Legacy statuses
  /// are not valid targets.
  #[instrument(name = "OrderManager::set_status", skip_all, fields(order_id = %id, status = %status), err(Display))]
  pub async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, ServiceError> {
    if status.is_legacy() {
      return Err(ServiceError::Invalid(format!("'{}' is not a status orders can be moved to", status)));
    }
    let updated = self.orders.set_status(id, status).await?.ok_or_else(|| order_not_found(id))?;
    info!("Order status updated.");
    Ok(updated)
  }
}

fn order_not_found(id: Uuid) -> ServiceError {
  ServiceError::NotFound {
    entity: "order",
    id: id.to_string(),
  }
}
