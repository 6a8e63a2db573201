// site/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use pharaoh::{Locale, NotificationPolicy};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  /// Endpoint every new order is POSTed to.
  pub webhook_url: String,
  /// `None` leaves the HTTP client's default behaviour in place.
  pub webhook_timeout: Option<Duration>,
  pub notification_policy: NotificationPolicy,

  pub default_locale: Locale,
  pub run_migrations: bool,

  /// Optional bootstrap account, created or re-keyed at startup.
  pub admin_email: Option<String>,
  pub admin_password: Option<String>,
  pub session_ttl: Duration,
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e)))
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source. `from_env` passes the
  /// process environment; tests pass a map.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |name: &str| {
      lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", name)))
    };
    let get_or = |name: &str, default: &str| get_env(name).unwrap_or_else(|_| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var::<u16>("SERVER_PORT", &get_or("SERVER_PORT", "8080"))?;
    let database_url = get_env("DATABASE_URL")?;
    let webhook_url = get_env("WEBHOOK_URL")?;

    let webhook_timeout = match get_env("WEBHOOK_TIMEOUT_SECS") {
      Ok(raw) => Some(Duration::from_secs(parse_var::<u64>("WEBHOOK_TIMEOUT_SECS", &raw)?)),
      Err(_) => None,
    };
    let notification_policy =
      parse_var::<NotificationPolicy>("NOTIFICATION_POLICY", &get_or("NOTIFICATION_POLICY", "required"))?;
    let default_locale = parse_var::<Locale>("DEFAULT_LOCALE", &get_or("DEFAULT_LOCALE", "ar"))?;
    let run_migrations = parse_var::<bool>("RUN_MIGRATIONS", &get_or("RUN_MIGRATIONS", "false"))?;

    let admin_email = get_env("ADMIN_EMAIL").ok();
    let admin_password = get_env("ADMIN_PASSWORD").ok();
    if admin_email.is_some() != admin_password.is_some() {
      return Err(AppError::Config(
        "ADMIN_EMAIL and ADMIN_PASSWORD must be set together".to_string(),
      ));
    }
    let session_ttl_minutes = parse_var::<u64>("SESSION_TTL_MINUTES", &get_or("SESSION_TTL_MINUTES", "720"))?;
    let session_ttl_secs = session_ttl_minutes.checked_mul(60).ok_or_else(|| {
      AppError::Config(format!(
        "Invalid SESSION_TTL_MINUTES value '{}': too large",
        session_ttl_minutes
      ))
    })?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      webhook_url,
      webhook_timeout,
      notification_policy,
      default_locale,
      run_migrations,
      admin_email,
      admin_password,
      session_ttl: Duration::from_secs(session_ttl_secs),
    })
  }
}
