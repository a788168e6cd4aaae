//! PostgreSQL sink for the IMDS ETL service.
//!
//! Owns the sink connection pool, the sink record types, and the embedded
//! migrations that create the market data tables with their natural-key
//! unique indexes.

pub mod models;
pub mod pool;

pub use pool::SinkDb;
