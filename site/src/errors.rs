// site/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pharaoh::{ServiceError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  /// A read failed; only the entity name reaches the client.
  #[error("failed to load {entity}")]
  Load {
    entity: &'static str,
    #[source]
    source: StoreError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ServiceError> for AppError {
  fn from(err: ServiceError) -> Self {
    match err {
      ServiceError::NotFound { entity, id } => AppError::NotFound(format!("{} '{}' not found", entity, id)),
      ServiceError::Invalid(m) => AppError::Validation(m),
      ServiceError::Load { entity, source } => AppError::Load { entity, source },
      ServiceError::Store(e) => AppError::Store(e),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
      AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Store(_) | AppError::Load { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let body = match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) => json!({ "error": m }),
      AppError::Load { .. } => json!({ "error": self.to_string() }),
      AppError::Config(m) => json!({ "error": "Configuration issue", "detail": m }),
      AppError::Sqlx(_) => json!({ "error": "Database operation failed" }),
      AppError::Store(StoreError::Conflict { .. }) => json!({ "error": "Record already exists" }),
      AppError::Store(_) => json!({ "error": "Database operation failed" }),
      AppError::Internal(m) => json!({ "error": "An internal error occurred", "detail": m }),
    };
    HttpResponse::build(self.status_code()).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
