//! Sink connection pool management.

use anyhow::Result;
use imds_etl_config::DbEndpoint;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// PostgreSQL sink pool wrapper.
///
/// This provides a safe async wrapper for sink access from Tokio tasks.
#[derive(Clone)]
pub struct SinkDb {
    pool: PgPool,
}

impl SinkDb {
    /// Connect to the PostgreSQL sink described by the endpoint.
    ///
    /// Credentials are passed through the connect options builder, so
    /// passwords with URL-reserved characters need no escaping.
    pub async fn connect(endpoint: &DbEndpoint) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&endpoint.host)
            .port(endpoint.port)
            .username(&endpoint.user)
            .password(&endpoint.password)
            .database(&endpoint.database);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        info!(
            "Connected to PostgreSQL sink at {}:{} as {}",
            endpoint.host, endpoint.port, endpoint.user
        );

        Ok(Self { pool })
    }

    /// Get a reference to the underlying PostgreSQL pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the embedded migrations that create the sink tables.
    pub async fn migrate(&self) -> Result<()> {
        info!("Running sink migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
        info!("Sink migrations completed");
        Ok(())
    }

    /// Connectivity probe returning the server version string.
    pub async fn probe(&self) -> Result<String> {
        let version: String = sqlx::query_scalar("SELECT version()")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }
}
