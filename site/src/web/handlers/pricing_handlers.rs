// site/src/web/handlers/pricing_handlers.rs

//! Dashboard pricing-tier editing.

use actix_web::{web, HttpResponse};
use pharaoh::model::{NewPricingTier, PricingTarget, TierPatch};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedAdmin;

#[derive(Deserialize, Debug)]
pub struct CreateTierPayload {
  pub trip_id: Option<i64>,
  pub experience_id: Option<String>,
  pub people_count: u32,
  pub price: Option<f64>,
  pub currency: Option<String>,
  pub sort_order: Option<i32>,
}

#[instrument(name = "handler::create_pricing_tier", skip_all, fields(admin = %admin.session.email))]
pub async fn create_tier_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateTierPayload>,
  admin: AuthenticatedAdmin,
) -> Result<HttpResponse> {
  let payload = payload.into_inner();
  let target = PricingTarget::from_parts(payload.trip_id, payload.experience_id)
    .ok_or_else(|| AppError::Validation("Provide exactly one of trip_id or experience_id.".to_string()))?;
  let tier = NewPricingTier {
    people_count: payload.people_count,
    price: payload.price,
    currency: payload.currency,
    sort_order: payload.sort_order,
  };
  let created = app_state.pricing.add(target, tier).await?;
  Ok(HttpResponse::Created().json(created))
}

#[instrument(name = "handler::update_pricing_tier", skip(app_state, patch, _admin))]
pub async fn update_tier_handler(
  app_state: web::Data<AppState>,
  id: web::Path<Uuid>,
  patch: web::Json<TierPatch>,
  _admin: AuthenticatedAdmin,
) -> Result<HttpResponse> {
  let patch = patch.into_inner();
  if patch.is_empty() {
    return Err(AppError::Validation("Nothing to update.".to_string()));
  }
  let updated = app_state.pricing.update(id.into_inner(), patch).await?;
  Ok(HttpResponse::Ok().json(updated))
}

#[instrument(name = "handler::delete_pricing_tier", skip(app_state, _admin))]
pub async fn delete_tier_handler(
  app_state: web::Data<AppState>,
  id: web::Path<Uuid>,
  _admin: AuthenticatedAdmin,
) -> Result<HttpResponse> {
  app_state.pricing.remove(id.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}
