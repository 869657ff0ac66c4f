use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::Result,
    middleware_layer::auth::ensure_owner,
    models::{
        car::{Car, CarDocument},
        session::Claims,
    },
    query::{CarQuery, ListCarsParams},
    repositories::car as car_repo,
    state::AppState,
};

/// Number of listings in the landing-page highlight feed.
const LATEST_FEED_SIZE: i64 = 6;

/// The response payload for listing deletion.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Stores a new car listing.
pub async fn add_car(
    State(state): State<AppState>,
    Json(payload): Json<CarDocument>,
) -> Result<(StatusCode, Json<Car>)> {
    let car = car_repo::insert(&state.db, &payload).await?;

    tracing::info!("✅ Listing {} created by {}", car.id, car.owner.email);

    Ok((StatusCode::CREATED, Json(car)))
}

/// Returns the most recent listings for the landing page.
pub async fn latest_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>> {
    let cars = car_repo::find_latest(&state.db, LATEST_FEED_SIZE).await?;
    Ok(Json(cars))
}

/// Returns the listings owned by the email in the path. Guarded: the session
/// identity must match the path identity.
pub async fn my_cars(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Car>>> {
    ensure_owner(&claims, &email)?;

    let cars = car_repo::find_by_owner_email(&state.db, &email).await?;
    Ok(Json(cars))
}

/// Returns a single listing, or a null body when the id is unknown.
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<Car>>> {
    let car = car_repo::find_by_id(&state.db, id).await?;
    Ok(Json(car))
}

/// Returns listings filtered, sorted and capped by the request parameters.
pub async fn all_cars(
    State(state): State<AppState>,
    Query(params): Query<ListCarsParams>,
) -> Result<Json<Vec<Car>>> {
    let query = CarQuery::from_params(&params);
    let cars = car_repo::find_all(&state.db, &query).await?;
    Ok(Json(cars))
}

/// Replaces a listing by id, creating it when absent.
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CarDocument>,
) -> Result<Json<Car>> {
    let car = car_repo::replace_or_create(&state.db, id, &payload).await?;

    tracing::info!("✅ Listing {} replaced", id);

    Ok(Json(car))
}

/// Deletes a listing by id.
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let deleted = car_repo::delete(&state.db, id).await?;

    tracing::info!("🗑️ Listing {} deleted ({} row)", id, deleted);

    Ok(Json(DeleteResponse { deleted: deleted > 0 }))
}
