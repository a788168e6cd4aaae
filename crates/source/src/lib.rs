//! MySQL source access for the IMDS ETL service.
//!
//! The source database is read-only from this service's point of view:
//! the only statements issued here are the two feed-table selects and the
//! connectivity probe.

pub mod client;
pub mod rows;

pub use client::SourceDb;
pub use rows::{MkIstatRow, TrdRow};
