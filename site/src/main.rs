// site/src/main.rs

mod config;
mod db;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::db::PgStore;
use crate::errors::{AppError, Result as AppResult};
use crate::services::{auth_service, WebhookNotifier};
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use pharaoh::AccountStore;
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

async fn run_migrations(pool: &PgPool) -> AppResult<()> {
  sqlx::raw_sql(include_str!("../migrations/0001_init.sql"))
    .execute(pool)
    .await?;
  tracing::info!("Database schema is up to date.");
  Ok(())
}

/// Creates the configured admin account, or re-keys it if it already exists.
async fn bootstrap_admin(store: &PgStore, config: &AppConfig) -> AppResult<()> {
  if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
    let hash = auth_service::hash_password(password)?;
    let account = store.upsert_account(email, &hash).await?;
    tracing::info!(admin_id = %account.id, "Bootstrap admin account ready.");
  }
  Ok(())
}

async fn build_state() -> AppResult<AppState> {
  let app_config = Arc::new(AppConfig::from_env()?);

  let pool = PgPool::connect(&app_config.database_url).await?;
  tracing::info!("Successfully connected to the database.");
  if app_config.run_migrations {
    run_migrations(&pool).await?;
  }

  let store = Arc::new(PgStore::new(pool));
  bootstrap_admin(&store, &app_config).await?;

  let notifier = WebhookNotifier::new(app_config.webhook_url.clone(), app_config.webhook_timeout)
    .map_err(|e| AppError::Config(format!("Invalid webhook client setup: {}", e)))?;
  tracing::info!(policy = ?app_config.notification_policy, "Order notifications configured.");

  Ok(AppState::new(app_config, store, Arc::new(notifier)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // LOG_FORMAT is read before the full config so that config errors are logged in the chosen format.
  dotenvy::dotenv().ok();
  init_tracing(std::env::var("LOG_FORMAT").map_or(false, |v| v.eq_ignore_ascii_case("json")));

  tracing::info!("Starting Pharaoh Tours server...");

  let app_state = match build_state().await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to start the application.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  let server_address = format!("{}:{}", app_state.config.server_host, app_state.config.server_port);
  tracing::info!("Binding server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
