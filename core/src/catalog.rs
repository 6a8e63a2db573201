// core/src/catalog.rs

//! Read access to published catalog content and pricing tiers.

use crate::error::ServiceError;
use crate::model::{Destination, Experience, HeroImage, Package, PricingTarget, PricingTier, Testimonial, Trip};
use crate::store::{CatalogStore, PricingTierStore};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct CatalogReader {
  catalog: Arc<dyn CatalogStore>,
  tiers: Arc<dyn PricingTierStore>,
}

impl CatalogReader {
  pub fn new(catalog: Arc<dyn CatalogStore>, tiers: Arc<dyn PricingTierStore>) -> Self {
    Self { catalog, tiers }
  }

  pub async fn destinations(&self) -> Result<Vec<Destination>, ServiceError> {
    self.catalog.destinations().await.map_err(ServiceError::load("destinations"))
  }

  pub async fn destination(&self, id: &str) -> Result<Destination, ServiceError> {
    self
      .catalog
      .destination(id)
      .await
      .map_err(ServiceError::load("destination"))?
      .ok_or_else(|| not_found("destination", id))
  }

  pub async fn packages(&self) -> Result<Vec<Package>, ServiceError> {
    self.catalog.packages().await.map_err(ServiceError::load("packages"))
  }

  pub async fn package(&self, id: &str) -> Result<Package, ServiceError> {
    self
      .catalog
      .package(id)
      .await
      .map_err(ServiceError::load("package"))?
      .ok_or_else(|| not_found("package", id))
  }

  pub async fn experiences(&self) -> Result<Vec<Experience>, ServiceError> {
    self.catalog.experiences().await.map_err(ServiceError::load("experiences"))
  }

  pub async fn experience(&self, id: &str) -> Result<Experience, ServiceError> {
    self
      .catalog
      .experience(id)
      .await
      .map_err(ServiceError::load("experience"))?
      .ok_or_else(|| not_found("experience", id))
  }

  /// Trips, optionally limited to one destination.
  #[instrument(name = "CatalogReader::trips", skip(self), err(Display))]
  pub async fn trips(&self, destination_id: Option<&str>) -> Result<Vec<Trip>, ServiceError> {
    self.catalog.trips(destination_id).await.map_err(ServiceError::load("trips"))
  }

  pub async fn trip(&self, id: i64) -> Result<Trip, ServiceError> {
    self
      .catalog
      .trip(id)
      .await
      .map_err(ServiceError::load("trip"))?
      .ok_or_else(|| not_found("trip", &id.to_string()))
  }

  pub async fn testimonials(&self) -> Result<Vec<Testimonial>, ServiceError> {
    self.catalog.testimonials().await.map_err(ServiceError::load("testimonials"))
  }

  pub async fn hero_images(&self) -> Result<Vec<HeroImage>, ServiceError> {
    self.catalog.hero_images().await.map_err(ServiceError::load("hero images"))
  }

  /// Tiers for a trip or experience ordered by `sort_order`. Equal sort orders
  /// keep the store's order.
  #[instrument(name = "CatalogReader::pricing_tiers", skip(self, target), fields(target = %target), err(Display))]
  pub async fn pricing_tiers(&self, target: &PricingTarget) -> Result<Vec<PricingTier>, ServiceError> {
    let mut tiers = self.tiers.tiers_for(target).await.map_err(ServiceError::load("pricing tiers"))?;
    sort_tiers(&mut tiers);
    Ok(tiers)
  }
}

/// Stable ascending sort by `sort_order`.
pub fn sort_tiers(tiers: &mut [PricingTier]) {
  tiers.sort_by_key(|t| t.sort_order);
}

fn not_found(entity: &'static str, id: &str) -> ServiceError {
  ServiceError::NotFound {
    entity,
    id: id.to_string(),
  }
}
