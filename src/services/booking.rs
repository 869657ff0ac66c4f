use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::booking::{Booking, BookingDocument};
use crate::repositories::{booking as booking_repo, car as car_repo};

/// Creates a booking and bumps the referenced listing's booking counter.
///
/// Both writes run in one transaction so the counter can never drift from the
/// bookings that exist: either the booking and its increment both commit, or
/// neither does. The increment itself is a single store-level operation, so
/// concurrent bookings of the same car never lose an update.
///
/// The car reference is not enforced; booking a listing that no longer exists
/// stores the booking and increments nothing.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `doc` - The booking payload.
///
/// # Returns
///
/// A `Result` containing the created `Booking`.
pub async fn create_booking(db: &PgPool, doc: &BookingDocument) -> Result<Booking> {
    let mut tx = db.begin().await?;

    let booking = booking_repo::insert(&mut *tx, doc).await?;
    let updated = car_repo::increment_booking_count(&mut *tx, doc.car_id, 1).await?;

    tx.commit().await?;

    if updated == 0 {
        tracing::warn!(
            "booking {} references unknown car {}",
            booking.id,
            doc.car_id
        );
    }
    tracing::info!("✅ Booking {} stored for car {}", booking.id, doc.car_id);

    Ok(booking)
}

/// Sets a booking's status field. No transition rules are applied.
pub async fn update_status(db: &PgPool, id: Uuid, status: &str) -> Result<u64> {
    let updated = booking_repo::update_status(db, id, status).await?;
    tracing::debug!("booking {} status set to {:?} ({} row)", id, status, updated);
    Ok(updated)
}

/// Replaces a booking's date range. Ordering and conflicts are not checked.
pub async fn update_dates(
    db: &PgPool,
    id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<u64> {
    let updated = booking_repo::update_dates(db, id, start_date, end_date).await?;
    tracing::debug!("booking {} dates replaced ({} row)", id, updated);
    Ok(updated)
}

/// Lists the bookings placed by a customer.
pub async fn list_by_customer_email(db: &PgPool, email: &str) -> Result<Vec<Booking>> {
    booking_repo::find_by_customer_email(db, email).await
}
