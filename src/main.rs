use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
};

use anyhow::Context;
use http::{HeaderValue, Method, header};
use std::net::SocketAddr;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod query;
mod state;

mod models {
    pub mod booking;
    pub mod car;
    pub mod session;
}

mod repositories {
    pub mod booking;
    pub mod car;
}

mod services {
    pub mod auth;
    pub mod booking;
}

mod handlers {
    pub mod auth;
    pub mod bookings;
    pub mod cars;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod auth;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    // Pool + migrations come up before the listener binds.
    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid origin in CORS_ORIGINS")?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400));

    // Ownership-scoped reads. Everything else, including the mutation routes,
    // is public: the frontend is the only intended caller.
    let guarded_routes = Router::new()
        .route("/my-cars/{email}", get(handlers::cars::my_cars))
        .route("/bookings/{email}", get(handlers::bookings::my_bookings))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/jwt", post(handlers::auth::issue_token))
        .route("/logout", post(handlers::auth::logout))
        .route("/add-car", post(handlers::cars::add_car))
        .route("/add-booking", post(handlers::bookings::add_booking))
        .route("/latest-cars", get(handlers::cars::latest_cars))
        .route(
            "/car/{id}",
            get(handlers::cars::get_car).delete(handlers::cars::delete_car),
        )
        .route("/all-cars", get(handlers::cars::all_cars))
        .route("/booking-status/{id}", patch(handlers::bookings::update_status))
        .route("/booking-dates/{id}", patch(handlers::bookings::update_dates))
        .route("/update/{id}", put(handlers::cars::update_car))
        .with_state(state.clone());

    let app = Router::new()
        .merge(public_routes)
        .merge(guarded_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let pool = state.db.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush in-flight writes before the process exits.
    pool.close().await;
    tracing::info!("👋 Pool closed, shutting down");

    Ok(())
}

async fn root() -> &'static str {
    "Server running!!!!"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
