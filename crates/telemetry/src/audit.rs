//! Audit trail for sync pass summaries.
//!
//! Each completed pass can be appended as one pretty-printed JSON document
//! to an operator-chosen file, giving a greppable history of what each run
//! fetched and inserted without querying the sink.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Append one pass summary to the audit file, creating it on first use.
pub fn append_pass_sample<T: Serialize>(path: &Path, payload: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(payload)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{}", json)?;
    debug!("Appended audit sample to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        table: &'static str,
        inserted: u64,
    }

    #[test]
    fn appends_one_document_per_call() {
        let path = std::env::temp_dir().join(format!("imds-etl-audit-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        append_pass_sample(&path, &Sample { table: "imds_trds", inserted: 1 }).unwrap();
        append_pass_sample(&path, &Sample { table: "imds_trds", inserted: 0 }).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("\"table\"").count(), 2);
        assert!(contents.contains("imds_trds"));

        let _ = std::fs::remove_file(&path);
    }
}
