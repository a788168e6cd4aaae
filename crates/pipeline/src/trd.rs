//! Market-wide trade summary sync (`TRD` → `imds_trds`).

use async_trait::async_trait;
use imds_etl_db::models::TrdRecord;
use imds_etl_db::SinkDb;
use imds_etl_source::{SourceDb, TrdRow};
use tracing::info;
use uuid::Uuid;

use crate::job::{SyncError, SyncJob, SyncReport};

const INSERT_TRD: &str = r#"
INSERT INTO imds_trds (
    id, trd_total_trades, trd_total_volume, trd_total_value,
    trd_lm_date_time
) VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (trd_total_trades, trd_lm_date_time) DO NOTHING
"#;

/// Map one feed row to a sink record, assigning a fresh UUID.
pub fn map_trd_row(row: &TrdRow) -> TrdRecord {
    TrdRecord {
        id: Uuid::new_v4(),
        trd_total_trades: row.total_trades,
        trd_total_volume: row.total_volume,
        trd_total_value: row.total_value,
        trd_lm_date_time: row.lm_date_time,
    }
}

/// Sync job for the trade summary table.
pub struct TrdJob;

#[async_trait]
impl SyncJob for TrdJob {
    fn name(&self) -> &'static str {
        "imds_trds"
    }

    async fn run(&self, source: &SourceDb, sink: &SinkDb) -> Result<SyncReport, SyncError> {
        let rows = source.fetch_trd_rows().await.map_err(SyncError::Extract)?;
        let fetched = rows.len() as u64;
        info!("Fetched {} TRD records from MySQL", fetched);

        let mut inserted = 0u64;
        for row in &rows {
            let record = map_trd_row(row);
            let result = sqlx::query(INSERT_TRD)
                .bind(record.id)
                .bind(record.trd_total_trades)
                .bind(record.trd_total_volume)
                .bind(record.trd_total_value)
                .bind(record.trd_lm_date_time)
                .execute(sink.pool())
                .await?;
            inserted += result.rows_affected();
        }

        Ok(SyncReport {
            table: self.name(),
            fetched,
            inserted,
            skipped: fetched - inserted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn feed_row() -> TrdRow {
        TrdRow {
            total_trades: 184_332,
            total_volume: Some(Decimal::new(12_450_118_0, 1)),
            total_value: Some(Decimal::new(9_845_220_312, 2)),
            lm_date_time: NaiveDate::from_ymd_opt(2024, 9, 1)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn maps_feed_columns_to_sink_columns() {
        let row = feed_row();
        let record = map_trd_row(&row);

        assert_eq!(record.trd_total_trades, 184_332);
        assert_eq!(record.trd_total_volume, row.total_volume);
        assert_eq!(record.trd_total_value, row.total_value);
        assert_eq!(record.trd_lm_date_time, row.lm_date_time);
    }

    #[test]
    fn every_mapped_record_gets_a_fresh_uuid() {
        let row = feed_row();
        assert_ne!(map_trd_row(&row).id, map_trd_row(&row).id);
    }
}
