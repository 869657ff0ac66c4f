use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::models::car::Identity;

/// Represents a rental booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// The unique identifier for the booking.
    pub id: Uuid,
    /// The listing this booking references. Not enforced as a foreign key by
    /// the store; the listing may have been deleted since.
    #[serde(rename = "carID")]
    pub car_id: Uuid,
    /// The identity of the customer who placed the booking.
    pub customer: Identity,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Free-text status. The frontend uses pending/confirmed/cancelled/completed
    /// but the store accepts any value.
    pub booking_status: String,
    /// The timestamp when the booking was created.
    pub created_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, PgRow> for Booking {
    fn from_row(row: &PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            car_id: row.try_get("car_id")?,
            customer: Identity {
                email: row.try_get("customer_email")?,
                name: row.try_get("customer_name")?,
            },
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            booking_status: row.try_get("booking_status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Booking payload as submitted by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDocument {
    #[serde(rename = "carID")]
    pub car_id: Uuid,
    pub customer: Identity,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub booking_status: String,
}

fn default_status() -> String {
    "pending".to_string()
}
