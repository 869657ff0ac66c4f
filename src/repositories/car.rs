use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::Result;
use crate::models::car::{Car, CarDocument};
use crate::query::CarQuery;

/// Creates a new car listing in the database.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `doc` - The listing payload.
///
/// # Returns
///
/// A `Result` containing the created `Car`.
pub async fn insert(db: &PgPool, doc: &CarDocument) -> Result<Car> {
    let car = sqlx::query_as::<_, Car>(
        r#"
        INSERT INTO cars (id, owner_email, owner_name, brand, model, price, location)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, owner_email, owner_name, brand, model, price, location,
                  booking_count, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&doc.owner.email)
    .bind(&doc.owner.name)
    .bind(&doc.brand)
    .bind(&doc.model)
    .bind(doc.price)
    .bind(&doc.location)
    .fetch_one(db)
    .await?;

    Ok(car)
}

/// Finds a car listing by its ID.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The ID of the listing.
///
/// # Returns
///
/// A `Result` containing an `Option<Car>`.
pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Car>> {
    let car = sqlx::query_as::<_, Car>(
        r#"
        SELECT id, owner_email, owner_name, brand, model, price, location,
               booking_count, created_at
        FROM cars
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(car)
}

/// Lists the car listings posted by an owner.
pub async fn find_by_owner_email(db: &PgPool, email: &str) -> Result<Vec<Car>> {
    let cars = sqlx::query_as::<_, Car>(
        r#"
        SELECT id, owner_email, owner_name, brand, model, price, location,
               booking_count, created_at
        FROM cars
        WHERE owner_email = $1
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;

    Ok(cars)
}

/// Lists car listings matching a `CarQuery`. The predicate, ordering and cap
/// are appended by the query itself.
pub async fn find_all(db: &PgPool, query: &CarQuery) -> Result<Vec<Car>> {
    let mut builder = QueryBuilder::<Postgres>::new(
        "SELECT id, owner_email, owner_name, brand, model, price, location, \
         booking_count, created_at FROM cars",
    );
    query.push_onto(&mut builder);

    let cars = builder.build_query_as::<Car>().fetch_all(db).await?;

    Ok(cars)
}

/// Returns the `n` most recently created listings, newest first.
pub async fn find_latest(db: &PgPool, n: i64) -> Result<Vec<Car>> {
    let cars = sqlx::query_as::<_, Car>(
        r#"
        SELECT id, owner_email, owner_name, brand, model, price, location,
               booking_count, created_at
        FROM cars
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(n)
    .fetch_all(db)
    .await?;

    Ok(cars)
}

/// Replaces the listing with the given ID, or creates it if absent.
///
/// The upsert replaces every caller-supplied field. `booking_count` and
/// `created_at` are left untouched on replace; only the booking flow mutates
/// the counter.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The ID of the listing to replace or create.
/// * `doc` - The full listing payload.
///
/// # Returns
///
/// A `Result` containing the stored `Car`.
pub async fn replace_or_create(db: &PgPool, id: Uuid, doc: &CarDocument) -> Result<Car> {
    let car = sqlx::query_as::<_, Car>(
        r#"
        INSERT INTO cars (id, owner_email, owner_name, brand, model, price, location)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE SET
            owner_email = EXCLUDED.owner_email,
            owner_name = EXCLUDED.owner_name,
            brand = EXCLUDED.brand,
            model = EXCLUDED.model,
            price = EXCLUDED.price,
            location = EXCLUDED.location
        RETURNING id, owner_email, owner_name, brand, model, price, location,
                  booking_count, created_at
        "#,
    )
    .bind(id)
    .bind(&doc.owner.email)
    .bind(&doc.owner.name)
    .bind(&doc.brand)
    .bind(&doc.model)
    .bind(doc.price)
    .bind(&doc.location)
    .fetch_one(db)
    .await?;

    Ok(car)
}

/// Adjusts a listing's booking counter by `delta` in a single store-level
/// operation, safe under concurrent callers. A missing listing affects zero
/// rows and is not an error.
///
/// Takes any executor so the booking flow can run it inside its transaction.
pub async fn increment_booking_count<'e>(
    db: impl PgExecutor<'e>,
    id: Uuid,
    delta: i32,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE cars
        SET booking_count = booking_count + $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(delta)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes a car listing by its ID.
pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM cars WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}
