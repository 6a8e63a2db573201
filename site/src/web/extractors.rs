// site/src/web/extractors.rs

//! Request extractors for the admin session and the response language.

use crate::errors::AppError;
use crate::services::AdminSession;
use crate::state::AppState;
use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use pharaoh::Locale;
use serde::Deserialize;
use tracing::warn;

fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, AppError> {
  req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("application state is not registered".to_string()))
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|token| !token.is_empty())
}

/// A signed-in admin, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
  pub token: String,
  pub session: AdminSession,
}

impl FromRequest for AuthenticatedAdmin {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let resolved = app_state(req).and_then(|state| {
      let token = bearer_token(req).ok_or_else(|| AppError::Auth("Missing bearer token.".to_string()))?;
      let session = state.sessions.resolve(token).ok_or_else(|| {
        warn!("Rejected unknown or expired session token.");
        AppError::Auth("Session is invalid or has expired.".to_string())
      })?;
      Ok(AuthenticatedAdmin {
        token: token.to_string(),
        session,
      })
    });
    ready(resolved)
  }
}

/// Response language: `?lang=` first, then `Accept-Language`, then the
/// configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

#[derive(Deserialize, Debug)]
struct LangQuery {
  lang: Option<String>,
}

fn query_lang(query: &str) -> Option<Locale> {
  web::Query::<LangQuery>::from_query(query)
    .ok()
    .and_then(|q| q.into_inner().lang?.parse().ok())
}

/// The language a request asked for, if any.
fn requested_locale(req: &HttpRequest) -> Option<Locale> {
  query_lang(req.query_string()).or_else(|| {
    req
      .headers()
      .get(header::ACCEPT_LANGUAGE)
      .and_then(|value| value.to_str().ok())
      .and_then(Locale::from_accept_language)
  })
}

impl RequestLocale {
  /// Resolves the locale outside an extractor, e.g. in a payload error
  /// handler. Falls back to `Locale::default()` without application state.
  pub fn of(req: &HttpRequest) -> Locale {
    requested_locale(req)
      .or_else(|| app_state(req).ok().map(|state| state.config.default_locale))
      .unwrap_or_default()
  }
}

impl FromRequest for RequestLocale {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let locale = requested_locale(req)
      .map(Ok)
      .unwrap_or_else(|| app_state(req).map(|state| state.config.default_locale));
    ready(locale.map(RequestLocale))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lang_query_parameter_is_found_among_others() {
    assert_eq!(query_lang("trip_id=4&lang=en"), Some(Locale::En));
    assert_eq!(query_lang("lang=ar-EG"), Some(Locale::Ar));
    assert_eq!(query_lang("lang=fr"), None);
    assert_eq!(query_lang(""), None);
  }

  #[test]
  fn lang_query_parameter_is_percent_decoded() {
    assert_eq!(query_lang("lang=ar%2DEG"), Some(Locale::Ar));
    assert_eq!(query_lang("search=a%26b&lang=en%2Dgb"), Some(Locale::En));
  }

  #[test]
  fn locale_falls_back_to_header_then_default() {
    let req = actix_web::test::TestRequest::default()
      .insert_header((header::ACCEPT_LANGUAGE, "fr-FR, en;q=0.8"))
      .to_http_request();
    assert_eq!(RequestLocale::of(&req), Locale::En);

    let req = actix_web::test::TestRequest::default().to_http_request();
    assert_eq!(RequestLocale::of(&req), Locale::Ar);
  }
}
