// core/src/manage/pricing.rs

use crate::catalog::sort_tiers;
use crate::error::ServiceError;
use crate::model::{NewPricingTier, PricingTarget, PricingTier, TierPatch, TierRecord, DEFAULT_CURRENCY};
use crate::store::PricingTierStore;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Back-office editing of a trip's or experience's pricing tiers.
#[derive(Clone)]
pub struct PricingEditor {
  tiers: Arc<dyn PricingTierStore>,
}

impl PricingEditor {
  pub fn new(tiers: Arc<dyn PricingTierStore>) -> Self {
    Self { tiers }
  }

  pub async fn tiers(&self, target: &PricingTarget) -> Result<Vec<PricingTier>, ServiceError> {
    let mut tiers = self.tiers.tiers_for(target).await.map_err(ServiceError::load("pricing tiers"))?;
    sort_tiers(&mut tiers);
    Ok(tiers)
  }

  /// Sort order for a tier appended after `tiers`: 1 for an empty list,
  /// otherwise one past the largest.
  pub fn next_sort_order(tiers: &[PricingTier]) -> i32 {
    tiers.iter().map(|t| t.sort_order).max().map_or(1, |max| max + 1)
  }

  #[instrument(name = "PricingEditor::add", skip(self, target), fields(target = %target), err(Display))]
  pub async fn add(&self, target: PricingTarget, tier: NewPricingTier) -> Result<PricingTier, ServiceError> {
    if tier.people_count == 0 {
      return Err(ServiceError::Invalid("people_count must be greater than zero".to_string()));
    }
    let price = match tier.price {
      Some(p) if p.is_finite() && p >= 0.0 => p,
      Some(_) => return Err(ServiceError::Invalid("price must be a non-negative number".to_string())),
      None => return Err(ServiceError::Invalid("price is required".to_string())),
    };
    let sort_order = match tier.sort_order {
      Some(order) => order,
      None => Self::next_sort_order(&self.tiers(&target).await?),
    };
    let created = self
      .tiers
      .create_tier(TierRecord {
        target,
        people_count: tier.people_count,
        price,
        currency: tier.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        sort_order,
      })
      .await?;
    info!(tier_id = %created.id, sort_order, "Pricing tier added.");
    Ok(created)
  }

  #[instrument(name = "PricingEditor::update", skip(self, patch), err(Display))]
  pub async fn update(&self, id: Uuid, patch: TierPatch) -> Result<PricingTier, ServiceError> {
    if patch.people_count == Some(0) {
      return Err(ServiceError::Invalid("people_count must be greater than zero".to_string()));
    }
    if matches!(patch.price, Some(p) if !p.is_finite() || p < 0.0) {
      return Err(ServiceError::Invalid("price must be a non-negative number".to_string()));
    }
    self.tiers.update_tier(id, &patch).await?.ok_or_else(|| tier_not_found(id))
  }

  #[instrument(name = "PricingEditor::remove", skip(self), err(Display))]
  pub async fn remove(&self, id: Uuid) -> Result<(), ServiceError> {
    if self.tiers.delete_tier(id).await? {
      Ok(())
    } else {
      Err(tier_not_found(id))
    }
  }
}

fn tier_not_found(id: Uuid) -> ServiceError {
  ServiceError::NotFound {
    entity: "pricing tier",
    id: id.to_string(),
  }
}
