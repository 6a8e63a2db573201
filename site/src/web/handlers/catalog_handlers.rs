// site/src/web/handlers/catalog_handlers.rs

//! Public read-only catalog endpoints.

use actix_web::{web, HttpResponse};
use pharaoh::model::PricingTarget;
use serde::Deserialize;
use tracing::instrument;

use crate::errors::{AppError, Result};
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct TripQuery {
  pub destination_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TierQuery {
  pub trip_id: Option<i64>,
  pub experience_id: Option<String>,
}

pub async fn list_destinations_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.destinations().await?))
}

pub async fn get_destination_handler(app_state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.destination(&id).await?))
}

pub async fn list_packages_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.packages().await?))
}

pub async fn get_package_handler(app_state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.package(&id).await?))
}

pub async fn list_experiences_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.experiences().await?))
}

pub async fn get_experience_handler(app_state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.experience(&id).await?))
}

#[instrument(name = "handler::list_trips", skip(app_state))]
pub async fn list_trips_handler(app_state: web::Data<AppState>, query: web::Query<TripQuery>) -> Result<HttpResponse> {
  let trips = app_state.catalog.trips(query.destination_id.as_deref()).await?;
  Ok(HttpResponse::Ok().json(trips))
}

pub async fn get_trip_handler(app_state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.trip(id.into_inner()).await?))
}

pub async fn list_testimonials_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.testimonials().await?))
}

pub async fn list_hero_images_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  Ok(HttpResponse::Ok().json(app_state.catalog.hero_images().await?))
}

#[instrument(name = "handler::list_pricing_tiers", skip(app_state))]
pub async fn list_pricing_tiers_handler(
  app_state: web::Data<AppState>,
  query: web::Query<TierQuery>,
) -> Result<HttpResponse> {
  let TierQuery { trip_id, experience_id } = query.into_inner();
  let target = PricingTarget::from_parts(trip_id, experience_id)
    .ok_or_else(|| AppError::Validation("Provide exactly one of trip_id or experience_id.".to_string()))?;
  Ok(HttpResponse::Ok().json(app_state.catalog.pricing_tiers(&target).await?))
}
