//! End-to-end suite against a running server (default dev config, port 5000)
//! with a reachable PostgreSQL instance. Run with:
//!
//!     cargo test -- --ignored

use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};

// Shared test context
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

impl TestContext {
    fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .unwrap(),
            base_url: std::env::var("TEST_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    async fn login(&self, email: &str) {
        let response = self
            .client
            .post(format!("{}/jwt", self.base_url))
            .json(&json!({ "email": email }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200, "Token issuance failed");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
    }

    async fn add_car(&self, owner_email: &str, brand: &str, model: &str, price: f64) -> String {
        let response = self
            .client
            .post(format!("{}/add-car", self.base_url))
            .json(&json!({
                "owner": { "email": owner_email, "name": "Test Owner" },
                "brand": brand,
                "model": model,
                "price": price,
                "location": "Test City"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 201, "Listing creation failed");
        let body: Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    async fn add_booking(&self, car_id: &str, customer_email: &str) -> Value {
        let response = self
            .client
            .post(format!("{}/add-booking", self.base_url))
            .json(&json!({
                "carID": car_id,
                "customer": { "email": customer_email, "name": "Test Customer" },
                "startDate": "2026-09-01T00:00:00Z",
                "endDate": "2026-09-03T00:00:00Z"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 201, "Booking creation failed");
        response.json().await.unwrap()
    }

    async fn get_car(&self, car_id: &str) -> Value {
        let response = self
            .client
            .get(format!("{}/car/{}", self.base_url, car_id))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        response.json().await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_token_issuance_and_owner_scoped_listings() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let email = format!("owner_{}@test.com", timestamp);

        context.login(&email).await;
        let car_id = context
            .add_car(&email, "Toyota", &format!("Corolla {}", timestamp), 45.0)
            .await;

        let response = context
            .client
            .get(format!("{}/my-cars/{}", context.base_url, email))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let cars: Vec<Value> = response.json().await.unwrap();
        assert!(cars.iter().any(|c| c["id"] == car_id.as_str()));
        assert!(cars.iter().all(|c| c["owner"]["email"] == email.as_str()));
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_guarded_route_without_cookie_is_unauthorized() {
        let context = TestContext::new();

        let response = context
            .client
            .get(format!("{}/my-cars/a@b.com", context.base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 401);
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_guarded_route_with_foreign_identity_is_forbidden() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();

        context
            .login(&format!("someone_else_{}@test.com", timestamp))
            .await;

        let response = context
            .client
            .get(format!("{}/my-cars/a@b.com", context.base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 403);
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_booking_creation_bumps_the_listing_counter() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let owner = format!("owner_{}@test.com", timestamp);

        let car_id = context.add_car(&owner, "Honda", "Civic", 60.0).await;
        let before = context.get_car(&car_id).await["bookingCount"]
            .as_i64()
            .unwrap();

        let booking = context.add_booking(&car_id, "customer@test.com").await;
        assert_eq!(booking["carID"], car_id.as_str());
        assert_eq!(booking["bookingStatus"], "pending");

        let after = context.get_car(&car_id).await["bookingCount"]
            .as_i64()
            .unwrap();
        assert_eq!(after, before + 1);
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_concurrent_bookings_lose_no_counter_updates() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let owner = format!("owner_{}@test.com", timestamp);

        let car_id = context.add_car(&owner, "Tesla", "Model 3", 120.0).await;

        let mut handles = Vec::new();
        for i in 0..10 {
            let client = context.client.clone();
            let url = format!("{}/add-booking", context.base_url);
            let car_id = car_id.clone();
            handles.push(tokio::spawn(async move {
                let response = client
                    .post(url)
                    .json(&json!({
                        "carID": car_id,
                        "customer": { "email": format!("c{}@test.com", i), "name": "C" },
                        "startDate": "2026-09-01T00:00:00Z",
                        "endDate": "2026-09-03T00:00:00Z"
                    }))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(response.status().as_u16(), 201);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let count = context.get_car(&car_id).await["bookingCount"]
            .as_i64()
            .unwrap();
        assert_eq!(count, 10);
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_sort_search_and_limit_compose() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let owner = format!("owner_{}@test.com", timestamp);
        // Unique brand so the assertions only see this run's listings.
        let brand = format!("Zephyr{}", timestamp);

        for price in [10.0, 30.0, 20.0] {
            context.add_car(&owner, &brand, "Base", price).await;
        }

        let response = context
            .client
            .get(format!(
                "{}/all-cars?search={}&sort=dsc",
                context.base_url, brand
            ))
            .send()
            .await
            .unwrap();
        let cars: Vec<Value> = response.json().await.unwrap();
        let prices: Vec<f64> = cars.iter().map(|c| c["price"].as_f64().unwrap()).collect();
        assert_eq!(prices, vec![30.0, 20.0, 10.0]);

        // Case-insensitive substring match on any of the three fields.
        let response = context
            .client
            .get(format!(
                "{}/all-cars?search={}",
                context.base_url,
                brand.to_lowercase()
            ))
            .send()
            .await
            .unwrap();
        let cars: Vec<Value> = response.json().await.unwrap();
        assert_eq!(cars.len(), 3);

        let response = context
            .client
            .get(format!(
                "{}/all-cars?search={}&limit=2",
                context.base_url, brand
            ))
            .send()
            .await
            .unwrap();
        let cars: Vec<Value> = response.json().await.unwrap();
        assert_eq!(cars.len(), 2);

        // Non-numeric limit means no cap.
        let response = context
            .client
            .get(format!(
                "{}/all-cars?search={}&limit=lots",
                context.base_url, brand
            ))
            .send()
            .await
            .unwrap();
        let cars: Vec<Value> = response.json().await.unwrap();
        assert_eq!(cars.len(), 3);
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_replace_or_create_is_idempotent() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let owner = format!("owner_{}@test.com", timestamp);

        let car_id = context.add_car(&owner, "Ford", "Focus", 35.0).await;

        let replacement = json!({
            "owner": { "email": owner, "name": "Test Owner" },
            "brand": "Ford",
            "model": "Fiesta",
            "price": 32.0,
            "location": "Elsewhere"
        });

        for _ in 0..2 {
            let response = context
                .client
                .put(format!("{}/update/{}", context.base_url, car_id))
                .json(&replacement)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 200);
        }

        let car = context.get_car(&car_id).await;
        assert_eq!(car["model"], "Fiesta");
        assert_eq!(car["price"], 32.0);
        assert_eq!(car["location"], "Elsewhere");
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_logout_clears_the_session_cookie() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let email = format!("owner_{}@test.com", timestamp);

        context.login(&email).await;

        let response = context
            .client
            .post(format!("{}/logout", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let response = context
            .client
            .get(format!("{}/my-cars/{}", context.base_url, email))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }
}
