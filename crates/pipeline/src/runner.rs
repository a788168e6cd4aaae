//! Pass runner.
//!
//! Drives every registered job once per pass. A failing job is logged and
//! counted, never propagated: the next job and the next pass still run,
//! matching the supervised always-retry posture of the deployment.

use imds_etl_db::SinkDb;
use imds_etl_source::SourceDb;
use imds_etl_telemetry::{audit, Metrics};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::job::{SyncJob, SyncReport};
use crate::mkistat::MkIstatJob;
use crate::trd::TrdJob;

/// Summary of one full pass over all jobs.
#[derive(Debug, Serialize)]
pub struct PassSummary {
    pub started_at: String,
    pub elapsed_ms: u64,
    pub reports: Vec<SyncReport>,
    pub failed_jobs: Vec<String>,
}

impl PassSummary {
    /// True when every job completed.
    pub fn all_ok(&self) -> bool {
        self.failed_jobs.is_empty()
    }
}

/// Runs all sync jobs against one source/sink pair.
pub struct SyncRunner {
    source: SourceDb,
    sink: SinkDb,
    metrics: Metrics,
    jobs: Vec<Box<dyn SyncJob>>,
    sample_output_path: Option<PathBuf>,
}

impl SyncRunner {
    /// Create a runner with the full set of feed-table jobs.
    pub fn new(
        source: SourceDb,
        sink: SinkDb,
        metrics: Metrics,
        sample_output_path: Option<PathBuf>,
    ) -> Self {
        Self {
            source,
            sink,
            metrics,
            jobs: vec![Box::new(MkIstatJob), Box::new(TrdJob)],
            sample_output_path,
        }
    }

    /// Run every job once and return the pass summary.
    pub async fn run_pass(&self) -> PassSummary {
        let started_at = chrono::Utc::now().to_rfc3339();
        let clock = Instant::now();
        info!("Sync pass started");

        let mut reports = Vec::new();
        let mut failed_jobs = Vec::new();

        for job in &self.jobs {
            match job.run(&self.source, &self.sink).await {
                Ok(report) => {
                    self.metrics.inc_rows_fetched(report.table, report.fetched);
                    self.metrics.inc_rows_inserted(report.table, report.inserted);
                    self.metrics.inc_rows_skipped(report.table, report.skipped);
                    if report.inserted > 0 {
                        info!(
                            "{}: fetched {}, inserted {} new records, skipped {}",
                            report.table, report.fetched, report.inserted, report.skipped
                        );
                    } else {
                        info!(
                            "{}: fetched {}, no new records",
                            report.table, report.fetched
                        );
                    }
                    reports.push(report);
                }
                Err(e) => {
                    self.metrics.inc_sync_errors(job.name());
                    error!("Sync job {} failed: {}", job.name(), e);
                    failed_jobs.push(job.name().to_string());
                }
            }
        }

        self.metrics.inc_sync_passes();

        let summary = PassSummary {
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
            reports,
            failed_jobs,
        };

        if let Some(ref path) = self.sample_output_path {
            if let Err(e) = audit::append_pass_sample(path, &summary) {
                warn!("Failed to write audit sample: {}", e);
            }
        }

        info!("Sync pass completed in {} ms", summary.elapsed_ms);
        summary
    }
}
