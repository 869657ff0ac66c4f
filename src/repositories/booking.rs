use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::booking::{Booking, BookingDocument};

/// Creates a new booking record.
///
/// Takes any executor so the booking flow can run it inside its transaction.
///
/// # Arguments
///
/// * `db` - The executor to run against.
/// * `doc` - The booking payload.
///
/// # Returns
///
/// A `Result` containing the created `Booking`.
pub async fn insert<'e>(db: impl PgExecutor<'e>, doc: &BookingDocument) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (id, car_id, customer_email, customer_name,
                              start_date, end_date, booking_status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, car_id, customer_email, customer_name,
                  start_date, end_date, booking_status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(doc.car_id)
    .bind(&doc.customer.email)
    .bind(&doc.customer.name)
    .bind(doc.start_date)
    .bind(doc.end_date)
    .bind(&doc.booking_status)
    .fetch_one(db)
    .await?;

    Ok(booking)
}

/// Lists the bookings placed by a customer.
pub async fn find_by_customer_email(db: &PgPool, email: &str) -> Result<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(
        r#"
        SELECT id, car_id, customer_email, customer_name,
               start_date, end_date, booking_status, created_at
        FROM bookings
        WHERE customer_email = $1
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;

    Ok(bookings)
}

/// Sets a booking's status field. Any string is accepted.
pub async fn update_status(db: &PgPool, id: Uuid, status: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE bookings SET booking_status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

/// Replaces a booking's date range. Ordering is not checked.
pub async fn update_dates(
    db: &PgPool,
    id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<u64> {
    let result =
        sqlx::query("UPDATE bookings SET start_date = $2, end_date = $3 WHERE id = $1")
            .bind(id)
            .bind(start_date)
            .bind(end_date)
            .execute(db)
            .await?;

    Ok(result.rows_affected())
}
