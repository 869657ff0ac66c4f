use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    middleware_layer::auth::ensure_owner,
    models::{
        booking::{Booking, BookingDocument},
        session::Claims,
    },
    services::booking as booking_service,
    state::AppState,
};

/// The request payload for a booking status change.
#[derive(Deserialize, Debug)]
pub struct StatusUpdate {
    #[serde(rename = "bookingStatus")]
    pub booking_status: String,
}

/// The request payload for a booking date-range change.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DatesUpdate {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// The response payload for booking field updates.
#[derive(Serialize)]
pub struct UpdateResponse {
    pub updated: bool,
}

/// Stores a booking and bumps the referenced car's booking counter.
pub async fn add_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingDocument>,
) -> Result<(StatusCode, Json<Booking>)> {
    let booking = booking_service::create_booking(&state.db, &payload).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Returns the bookings placed by the email in the path. Guarded: the session
/// identity must match the path identity.
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Booking>>> {
    ensure_owner(&claims, &email)?;

    let bookings = booking_service::list_by_customer_email(&state.db, &email).await?;
    Ok(Json(bookings))
}

/// Sets a booking's status field.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<UpdateResponse>> {
    let updated = booking_service::update_status(&state.db, id, &payload.booking_status).await?;

    Ok(Json(UpdateResponse { updated: updated > 0 }))
}

/// Replaces a booking's date range.
pub async fn update_dates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DatesUpdate>,
) -> Result<Json<UpdateResponse>> {
    let updated =
        booking_service::update_dates(&state.db, id, payload.start_date, payload.end_date).await?;

    Ok(Json(UpdateResponse { updated: updated > 0 }))
}
