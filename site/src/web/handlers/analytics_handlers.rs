// site/src/web/handlers/analytics_handlers.rs

use actix_web::{web, HttpResponse};
use pharaoh::manage::summarize;
use tracing::instrument;

use crate::errors::Result;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedAdmin;

#[instrument(name = "handler::analytics", skip_all)]
pub async fn dashboard_analytics_handler(
  app_state: web::Data<AppState>,
  _admin: AuthenticatedAdmin,
) -> Result<HttpResponse> {
  let orders = app_state.orders.list().await?;
  Ok(HttpResponse::Ok().json(summarize(&orders)))
}
