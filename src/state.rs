use sqlx::PgPool;

use crate::config::Config;
use crate::error::Result;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: PgPool,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// Connects the process-wide pool and applies migrations before the
    /// caller starts accepting requests.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url).await?;
        tracing::info!("✅ PostgreSQL pool initialized");

        crate::db::run_migrations(&db).await?;
        tracing::info!("✅ Database migrations applied");

        Ok(AppState {
            db,
            config: config.clone(),
        })
    }
}
