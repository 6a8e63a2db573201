// site/src/web/handlers/order_handlers.rs

//! Dashboard order list, detail and status changes.

use actix_web::{web, HttpResponse};
use pharaoh::manage::{filter_orders, StatusCounts};
use pharaoh::model::{Order, OrderStatus, SourcePage};
use pharaoh::money::format_usd;
use pharaoh::{Locale, OrderFilter, ServiceError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::extractors::{AuthenticatedAdmin, RequestLocale};

/// Query string of the order list. Empty values and `all` mean "no filter".
#[derive(Deserialize, Debug, Default)]
pub struct OrderQuery {
  pub search: Option<String>,
  pub status: Option<String>,
  pub source_page: Option<String>,
}

fn selected(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty() && v != "all")
}

impl OrderQuery {
  pub fn into_filter(self) -> Result<OrderFilter> {
    let status = selected(self.status)
      .map(|raw| raw.parse::<OrderStatus>())
      .transpose()
      .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(OrderFilter {
      search: self.search.unwrap_or_default(),
      status,
      source_page: selected(self.source_page).map(SourcePage::from),
    })
  }
}

/// An order as the dashboard shows it: the stored row plus its localized
/// status badge and formatted price.
#[derive(Serialize, Debug)]
pub struct OrderView<'a> {
  #[serde(flatten)]
  pub order: &'a Order,
  pub status_label: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price_display: Option<String>,
}

impl<'a> OrderView<'a> {
  pub fn new(order: &'a Order, locale: Locale) -> Self {
    Self {
      order,
      status_label: locale.status_label(order.status),
      price_display: order.details.price.map(format_usd),
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdatePayload {
  pub status: OrderStatus,
}

#[instrument(
  name = "handler::list_orders",
  skip(app_state, query, locale, admin),
  fields(admin = %admin.session.email)
)]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  query: web::Query<OrderQuery>,
  locale: RequestLocale,
  admin: AuthenticatedAdmin,
) -> Result<HttpResponse> {
  let filter = query.into_inner().into_filter()?;
  let orders = app_state.orders.list().await?;
  let counts = StatusCounts::tally(&orders);
  let shown: Vec<_> = filter_orders(&orders, &filter)
    .into_iter()
    .map(|order| OrderView::new(order, locale.0))
    .collect();
  Ok(HttpResponse::Ok().json(json!({ "orders": shown, "counts": counts })))
}

pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  id: web::Path<Uuid>,
  locale: RequestLocale,
  _admin: AuthenticatedAdmin,
) -> Result<HttpResponse> {
  let order = app_state.orders.get(id.into_inner()).await?;
  Ok(HttpResponse::Ok().json(OrderView::new(&order, locale.0)))
}

#[instrument(
  name = "handler::update_order_status",
  skip(app_state, id, payload, locale, admin),
  fields(admin = %admin.session.email, status = %payload.status)
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  id: web::Path<Uuid>,
  payload: web::Json<StatusUpdatePayload>,
  locale: RequestLocale,
  admin: AuthenticatedAdmin,
) -> Result<HttpResponse> {
  let status = payload.status;
  match app_state.orders.set_status(id.into_inner(), status).await {
    Ok(order) => Ok(HttpResponse::Ok().json(json!({
      "order": OrderView::new(&order, locale.0),
      "message": locale.0.status_changed_message(status),
    }))),
    Err(err @ (ServiceError::NotFound { .. } | ServiceError::Invalid(_))) => Err(err.into()),
    Err(err) => {
      error!(error = %err, "Order status update failed.");
      Ok(HttpResponse::InternalServerError().json(json!({ "error": locale.0.status_update_failed_message() })))
    }
  }
}
