// site/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedAdmin;

#[derive(Deserialize, Debug)]
pub struct SigninRequestPayload {
  pub email: String,
  pub password: String,
}

fn invalid_credentials() -> AppError {
  AppError::Auth("Invalid email or password.".to_string())
}

#[instrument(name = "handler::signin", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SigninRequestPayload>,
) -> Result<HttpResponse> {
  let email = req_payload.email.trim();
  let account = app_state.accounts.account_by_email(email).await?.ok_or_else(|| {
    warn!("Signin for unknown account.");
    invalid_credentials()
  })?;

  if !auth_service::verify_password(&account.password_hash, &req_payload.password)? {
    warn!("Signin with wrong password.");
    return Err(invalid_credentials());
  }

  let token = app_state.sessions.issue(account.id, &account.email);
  info!(admin_id = %account.id, "Admin signed in.");
  Ok(HttpResponse::Ok().json(json!({
    "token": token,
    "expires_in_secs": app_state.sessions.ttl().as_secs(),
    "admin": account,
  })))
}

pub async fn session_handler(admin: AuthenticatedAdmin) -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "admin_id": admin.session.admin_id,
    "email": admin.session.email,
    "issued_at": admin.session.issued_at,
  }))
}

#[instrument(name = "handler::signout", skip_all, fields(admin = %admin.session.email))]
pub async fn signout_handler(app_state: web::Data<AppState>, admin: AuthenticatedAdmin) -> HttpResponse {
  app_state.sessions.revoke(&admin.token);
  HttpResponse::NoContent().finish()
}
