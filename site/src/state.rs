// site/src/state.rs

use crate::config::AppConfig;
use crate::services::SessionRegistry;
use pharaoh::{
  AccountStore, CatalogReader, CatalogStore, OrderManager, OrderNotifier, OrderStore, PricingEditor, PricingTierStore,
  SubmissionService,
};
use std::sync::Arc;

/// Shared by every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub submissions: Arc<SubmissionService>,
  pub catalog: Arc<CatalogReader>,
  pub orders: Arc<OrderManager>,
  pub pricing: Arc<PricingEditor>,
  pub accounts: Arc<dyn AccountStore>,
  pub sessions: Arc<SessionRegistry>,
}

impl AppState {
  /// Wires every service to one store. Production passes a `PgStore`; tests
  /// pass a `MemoryStore`.
  pub fn new<S>(config: Arc<AppConfig>, store: Arc<S>, notifier: Arc<dyn OrderNotifier>) -> Self
  where
    S: OrderStore + CatalogStore + PricingTierStore + AccountStore + 'static,
  {
    let orders: Arc<dyn OrderStore> = store.clone();
    let catalog: Arc<dyn CatalogStore> = store.clone();
    let tiers: Arc<dyn PricingTierStore> = store.clone();
    let accounts: Arc<dyn AccountStore> = store;

    Self {
      submissions: Arc::new(SubmissionService::new(
        orders.clone(),
        notifier,
        config.notification_policy,
      )),
      catalog: Arc::new(CatalogReader::new(catalog, tiers.clone())),
      orders: Arc::new(OrderManager::new(orders)),
      pricing: Arc::new(PricingEditor::new(tiers)),
      accounts,
      sessions: Arc::new(SessionRegistry::new(config.session_ttl)),
      config,
    }
  }
}
