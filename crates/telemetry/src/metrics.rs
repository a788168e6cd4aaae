//! Prometheus metrics for the IMDS ETL service.

use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec,
    HistogramVec, IntCounter, IntCounterVec, Encoder, TextEncoder,
};

/// Metrics collector for the ETL service.
#[derive(Clone)]
pub struct Metrics {
    rows_fetched: IntCounterVec,
    rows_inserted: IntCounterVec,
    rows_skipped: IntCounterVec,
    sync_passes: IntCounter,
    sync_errors: IntCounterVec,
    query_latency: HistogramVec,
}

impl Metrics {
    /// Create a new metrics instance.
    pub fn new() -> anyhow::Result<Self> {
        let rows_fetched = register_int_counter_vec!(
            "imds_etl_rows_fetched_total",
            "Total number of rows fetched from the MySQL source",
            &["table"]
        )?;

        let rows_inserted = register_int_counter_vec!(
            "imds_etl_rows_inserted_total",
            "Total number of new rows inserted into the PostgreSQL sink",
            &["table"]
        )?;

        let rows_skipped = register_int_counter_vec!(
            "imds_etl_rows_skipped_total",
            "Total number of rows skipped because their natural key already existed",
            &["table"]
        )?;

        let sync_passes = register_int_counter!(
            "imds_etl_sync_passes_total",
            "Total number of completed sync passes"
        )?;

        let sync_errors = register_int_counter_vec!(
            "imds_etl_sync_errors_total",
            "Total number of failed sync jobs",
            &["table"]
        )?;

        let query_latency = register_histogram_vec!(
            "imds_etl_query_latency_seconds",
            "Database query latency in seconds",
            &["operation"]
        )?;

        Ok(Self {
            rows_fetched,
            rows_inserted,
            rows_skipped,
            sync_passes,
            sync_errors,
            query_latency,
        })
    }

    /// Increment the fetched rows counter for a table.
    pub fn inc_rows_fetched(&self, table: &str, count: u64) {
        self.rows_fetched.with_label_values(&[table]).inc_by(count);
    }

    /// Increment the inserted rows counter for a table.
    pub fn inc_rows_inserted(&self, table: &str, count: u64) {
        self.rows_inserted.with_label_values(&[table]).inc_by(count);
    }

    /// Increment the skipped rows counter for a table.
    pub fn inc_rows_skipped(&self, table: &str, count: u64) {
        self.rows_skipped.with_label_values(&[table]).inc_by(count);
    }

    /// Increment the completed passes counter.
    pub fn inc_sync_passes(&self) {
        self.sync_passes.inc();
    }

    /// Increment the failed jobs counter for a table.
    pub fn inc_sync_errors(&self, table: &str) {
        self.sync_errors.with_label_values(&[table]).inc();
    }

    /// Record database query latency.
    pub fn observe_query_latency(&self, operation: &str, duration_secs: f64) {
        self.query_latency.with_label_values(&[operation]).observe(duration_secs);
    }

    /// Get Prometheus metrics as a string.
    pub fn gather(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
