use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use encore_booking::BookingError;
use encore_roster::RosterError;
use serde::Serialize;

pub type Result<T> = std::result::Result<T, AppError>;

/// Gateway-level error, mapped onto an HTTP status and a JSON body.
pub enum AppError {
    Booking(BookingError),
    Roster(RosterError),
    BadRequest(String),
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        AppError::Booking(e)
    }
}

impl From<RosterError> for AppError {
    fn from(e: RosterError) -> Self {
        AppError::Roster(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Booking(e) => match &e {
                BookingError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                BookingError::ReferenceSpaceExhausted { .. }
                | BookingError::RandomSourceUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
                }
                BookingError::Storage(_) => internal(&e),
            },
            AppError::Roster(e) => match &e {
                RosterError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                RosterError::UsernameTaken(_) => (StatusCode::CONFLICT, e.to_string()),
                RosterError::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
                RosterError::Hashing(_) | RosterError::Storage(_) => internal(&e),
            },
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Fallback for requests that match no route.
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".to_string(),
        }),
    )
        .into_response()
}

/// Internal failures keep their detail in the logs, not the response.
fn internal(e: &dyn std::fmt::Display) -> (StatusCode, String) {
    tracing::error!(error = %e, "internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal error".to_string(),
    )
}
