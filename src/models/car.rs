use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

/// Identity of a listing owner or booking customer as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub email: String,
    pub name: String,
}

/// Represents a car listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    /// The unique identifier for the listing.
    pub id: Uuid,
    /// The identity of the owner who posted the listing.
    pub owner: Identity,
    /// The car's brand.
    pub brand: String,
    /// The car's model.
    pub model: String,
    /// Daily rental price. Currency-agnostic.
    pub price: f64,
    /// Free-text pickup location.
    pub location: String,
    /// Number of bookings referencing this listing. Mutated only through
    /// the atomic counter increment.
    pub booking_count: i32,
    /// The timestamp when the listing was created.
    pub created_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, PgRow> for Car {
    fn from_row(row: &PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner: Identity {
                email: row.try_get("owner_email")?,
                name: row.try_get("owner_name")?,
            },
            brand: row.try_get("brand")?,
            model: row.try_get("model")?,
            price: row.try_get("price")?,
            location: row.try_get("location")?,
            booking_count: row.try_get("booking_count")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Listing payload as submitted by the frontend, for both creation and the
/// full-document replace on `/update/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDocument {
    pub owner: Identity,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub location: String,
}
