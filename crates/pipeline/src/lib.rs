//! Sync pipeline for the IMDS ETL service.
//!
//! One [`SyncJob`] per feed table, a pure mapping function per job, and a
//! [`SyncRunner`] that drives every job once per pass.

pub mod job;
pub mod mkistat;
pub mod runner;
pub mod trd;

pub use job::{SyncError, SyncJob, SyncReport};
pub use mkistat::MkIstatJob;
pub use runner::{PassSummary, SyncRunner};
pub use trd::TrdJob;
