//! Sync job interface.
//!
//! Each feed table is synchronized by one job. Jobs share a shape
//! (extract, map, insert-if-new) but own their SQL and mapping, so the
//! runner only ever sees this trait.

use async_trait::async_trait;
use imds_etl_db::SinkDb;
use imds_etl_source::SourceDb;
use serde::Serialize;

/// Error type for a single sync job run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("extract from source failed: {0}")]
    Extract(#[source] anyhow::Error),
    #[error("load into sink failed: {0}")]
    Load(#[from] sqlx::Error),
}

/// Outcome of one successful job run.
///
/// `skipped` counts rows whose natural key already existed in the sink,
/// so `fetched == inserted + skipped` always holds.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub table: &'static str,
    pub fetched: u64,
    pub inserted: u64,
    pub skipped: u64,
}

/// A synchronization job for one feed table.
#[async_trait]
pub trait SyncJob: Send + Sync {
    /// Sink table name, used for logging and metric labels.
    fn name(&self) -> &'static str;

    /// Run one extract-and-load pass for this table.
    ///
    /// Inserts only rows whose natural key is not yet present in the sink;
    /// re-running against an unchanged source inserts nothing.
    async fn run(&self, source: &SourceDb, sink: &SinkDb) -> Result<SyncReport, SyncError>;
}
