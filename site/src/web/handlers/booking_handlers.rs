// site/src/web/handlers/booking_handlers.rs

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use pharaoh::model::OrderDraft;
use pharaoh::{BookingError, SubmissionOutcome};
use tracing::{info, instrument, warn};

use crate::state::AppState;
use crate::web::extractors::RequestLocale;

/// HTTP status for a failed submission. The body is always a
/// `SubmissionOutcome`, so the form reads `error` whatever the code.
fn booking_status(err: &BookingError) -> StatusCode {
  match err {
    BookingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    BookingError::DuplicateConflict { .. } => StatusCode::CONFLICT,
    BookingError::Delivery { .. } => StatusCode::BAD_GATEWAY,
    BookingError::Persistence(_) | BookingError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

/// Body limits and decode errors for the booking form. A body that does not
/// decode as a draft is answered like any other invalid booking: a localized
/// `SubmissionOutcome` with 422.
pub fn booking_json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, req| {
    let detail = match &err {
      JsonPayloadError::Deserialize(e) => e.to_string(),
      other => other.to_string(),
    };
    warn!(error = %detail, "Booking payload rejected.");
    let outcome = SubmissionOutcome::render(&Err(BookingError::Validation(detail)), RequestLocale::of(req));
    InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(outcome)).into()
  })
}

#[instrument(
  name = "handler::submit_booking",
  skip(app_state, payload, locale),
  fields(source_page = %payload.source_page, source_id = %payload.source_id)
)]
pub async fn submit_booking_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<OrderDraft>,
  locale: RequestLocale,
) -> HttpResponse {
  let (outcome, failure) = app_state
    .submissions
    .submit_for_display(payload.into_inner(), locale.0)
    .await;

  match failure {
    None => {
      info!("Booking accepted.");
      HttpResponse::Created().json(outcome)
    }
    Some(err) => {
      warn!(error = %err, "Booking rejected.");
      HttpResponse::build(booking_status(&err)).json(outcome)
    }
  }
}
