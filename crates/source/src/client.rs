//! MySQL feed client.

use anyhow::Result;
use imds_etl_config::DbEndpoint;
use imds_etl_telemetry::Metrics;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::rows::{MkIstatRow, TrdRow};

/// MySQL source database wrapper.
pub struct SourceDb {
    pool: MySqlPool,
    metrics: Metrics,
}

impl SourceDb {
    /// Connect to the MySQL feed described by the endpoint.
    ///
    /// Credentials go through the connect options builder, so passwords
    /// with URL-reserved characters need no escaping.
    ///
    /// # Arguments
    /// * `endpoint` - Host, port, credentials and database of the feed
    /// * `metrics` - Metrics collector
    pub async fn connect(endpoint: &DbEndpoint, metrics: Metrics) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&endpoint.host)
            .port(endpoint.port)
            .username(&endpoint.user)
            .password(&endpoint.password)
            .database(&endpoint.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        info!(
            "Connected to MySQL source at {}:{} as {}",
            endpoint.host, endpoint.port, endpoint.user
        );

        Ok(Self { pool, metrics })
    }

    /// Fetch the full `MKISTAT` feed table.
    pub async fn fetch_mkistat_rows(&self) -> Result<Vec<MkIstatRow>> {
        let start = Instant::now();
        let rows = sqlx::query_as::<_, MkIstatRow>(
            r#"
            SELECT MKISTAT_INSTRUMENT_CODE, MKISTAT_INSTRUMENT_NUMBER,
                   MKISTAT_QUOTE_BASES, MKISTAT_OPEN_PRICE,
                   MKISTAT_PUB_LAST_TRADED_PRICE, MKISTAT_SPOT_LAST_TRADED_PRICE,
                   MKISTAT_HIGH_PRICE, MKISTAT_LOW_PRICE, MKISTAT_CLOSE_PRICE,
                   MKISTAT_YDAY_CLOSE_PRICE, MKISTAT_TOTAL_TRADES,
                   MKISTAT_TOTAL_VOLUME, MKISTAT_TOTAL_VALUE,
                   MKISTAT_PUBLIC_TOTAL_TRADES, MKISTAT_PUBLIC_TOTAL_VOLUME,
                   MKISTAT_PUBLIC_TOTAL_VALUE, MKISTAT_SPOT_TOTAL_TRADES,
                   MKISTAT_SPOT_TOTAL_VOLUME, MKISTAT_SPOT_TOTAL_VALUE,
                   MKISTAT_LM_DATE_TIME
            FROM MKISTAT
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        self.metrics
            .observe_query_latency("fetch_mkistat", start.elapsed().as_secs_f64());

        debug!("Fetched {} MKISTAT rows", rows.len());
        Ok(rows)
    }

    /// Fetch the full `TRD` feed table.
    pub async fn fetch_trd_rows(&self) -> Result<Vec<TrdRow>> {
        let start = Instant::now();
        let rows = sqlx::query_as::<_, TrdRow>(
            r#"
            SELECT TRD_TOTAL_TRADES, TRD_TOTAL_VOLUME, TRD_TOTAL_VALUE,
                   TRD_LM_DATE_TIME
            FROM TRD
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        self.metrics
            .observe_query_latency("fetch_trd", start.elapsed().as_secs_f64());

        debug!("Fetched {} TRD rows", rows.len());
        Ok(rows)
    }

    /// Connectivity probe returning the server version string.
    pub async fn probe(&self) -> Result<String> {
        let version: String = sqlx::query_scalar("SELECT VERSION()")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }
}
