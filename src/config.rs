use anyhow::{Context, Result};
use std::env;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The secret used to sign session tokens.
    pub access_token_secret: String,
    /// The port the server listens on.
    pub port: u16,
    /// Whether the server runs in production mode. Controls the `secure` and
    /// `SameSite` attributes of the session cookie.
    pub production: bool,
    /// The origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            access_token_secret: env::var("ACCESS_TOKEN")
                .context("ACCESS_TOKEN must be set (session token signing secret)")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("Invalid PORT")?,
            production: env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        })
    }
}
