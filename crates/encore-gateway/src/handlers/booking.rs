use crate::error::{AppError, Result};
use crate::model::{BookRequest, BookingResponse, PastBookingsResponse};
use crate::state::{AppState, Store};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use encore_core::BookingRef;

pub async fn book_handler<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let booking = state.bookings.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn get_booking_handler<S: Store>(
    Path(reference): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Json<BookingResponse>> {
    let reference = parse_reference(&reference)?;
    let booking = state
        .bookings
        .fetch(&reference)
        .await?
        .ok_or_else(|| AppError::Booking(encore_booking::BookingError::NotFound(reference.to_string())))?;
    Ok(Json(booking.into()))
}

pub async fn list_bookings_handler<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<BookingResponse>>> {
    let bookings = state.bookings.list().await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

pub async fn search_bookings_handler<S: Store>(
    Path(phone): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<BookingResponse>>> {
    let bookings = state.bookings.fetch_by_phone(&phone).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

pub async fn delete_booking_handler<S: Store>(
    Path(reference): Path<String>,
    State(state): State<AppState<S>>,
) -> Result<StatusCode> {
    let reference = parse_reference(&reference)?;
    state.bookings.delete(&reference).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_past_bookings_handler<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<PastBookingsResponse>> {
    let removed = state.bookings.delete_past().await?;
    Ok(Json(PastBookingsResponse { removed }))
}

fn parse_reference(raw: &str) -> Result<BookingRef> {
    BookingRef::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}
