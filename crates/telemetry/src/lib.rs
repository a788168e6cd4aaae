//! Observability for the IMDS ETL service.

pub mod metrics;
pub mod logging;
pub mod audit;

pub use metrics::Metrics;
pub use logging::init_logging;
