//! Per-instrument market statistics sync (`MKISTAT` → `imds_mk_istats`).

use async_trait::async_trait;
use imds_etl_db::models::MkIstatRecord;
use imds_etl_db::SinkDb;
use imds_etl_source::{MkIstatRow, SourceDb};
use tracing::info;
use uuid::Uuid;

use crate::job::{SyncError, SyncJob, SyncReport};

const INSERT_MKISTAT: &str = r#"
INSERT INTO imds_mk_istats (
    uuid, mkstat_instrument_code, mkstat_instrument_number,
    mkstat_quote_bases, mkstat_open_price, mkstat_pub_last_trade_price,
    mkstat_spot_last_trade_price, mkstat_high_price, mkstat_low_price,
    mkstat_close_price, mkstat_yday_close_price, mkstat_total_trades,
    mkstat_total_volume, mkstat_total_value, mkstat_public_total_trades,
    mkstat_public_total_volume, mkstat_public_total_value,
    mkstat_spot_total_trades, mkstat_spot_total_volume,
    mkstat_spot_total_value, mkstat_lm_date_time
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
          $15, $16, $17, $18, $19, $20, $21)
ON CONFLICT (mkstat_instrument_code, mkstat_lm_date_time) DO NOTHING
"#;

/// Map one feed row to a sink record, assigning a fresh UUID.
///
/// Pure; the natural key (instrument code, lm_date_time) passes through
/// unchanged and decides dedupe at insert time.
pub fn map_mkistat_row(row: &MkIstatRow) -> MkIstatRecord {
    MkIstatRecord {
        uuid: Uuid::new_v4(),
        mkstat_instrument_code: row.instrument_code.clone(),
        mkstat_instrument_number: row.instrument_number,
        mkstat_quote_bases: row.quote_bases.clone(),
        mkstat_open_price: row.open_price,
        mkstat_pub_last_trade_price: row.pub_last_traded_price,
        mkstat_spot_last_trade_price: row.spot_last_traded_price,
        mkstat_high_price: row.high_price,
        mkstat_low_price: row.low_price,
        mkstat_close_price: row.close_price,
        mkstat_yday_close_price: row.yday_close_price,
        mkstat_total_trades: row.total_trades,
        mkstat_total_volume: row.total_volume,
        mkstat_total_value: row.total_value,
        mkstat_public_total_trades: row.public_total_trades,
        mkstat_public_total_volume: row.public_total_volume,
        mkstat_public_total_value: row.public_total_value,
        mkstat_spot_total_trades: row.spot_total_trades,
        mkstat_spot_total_volume: row.spot_total_volume,
        mkstat_spot_total_value: row.spot_total_value,
        mkstat_lm_date_time: row.lm_date_time,
    }
}

/// Sync job for the per-instrument statistics table.
pub struct MkIstatJob;

#[async_trait]
impl SyncJob for MkIstatJob {
    fn name(&self) -> &'static str {
        "imds_mk_istats"
    }

    async fn run(&self, source: &SourceDb, sink: &SinkDb) -> Result<SyncReport, SyncError> {
        let rows = source
            .fetch_mkistat_rows()
            .await
            .map_err(SyncError::Extract)?;
        let fetched = rows.len() as u64;
        info!("Fetched {} MKISTAT records from MySQL", fetched);

        let mut inserted = 0u64;
        for row in &rows {
            let record = map_mkistat_row(row);
            let result = sqlx::query(INSERT_MKISTAT)
                .bind(record.uuid)
                .bind(&record.mkstat_instrument_code)
                .bind(record.mkstat_instrument_number)
                .bind(&record.mkstat_quote_bases)
                .bind(record.mkstat_open_price)
                .bind(record.mkstat_pub_last_trade_price)
                .bind(record.mkstat_spot_last_trade_price)
                .bind(record.mkstat_high_price)
                .bind(record.mkstat_low_price)
                .bind(record.mkstat_close_price)
                .bind(record.mkstat_yday_close_price)
                .bind(record.mkstat_total_trades)
                .bind(record.mkstat_total_volume)
                .bind(record.mkstat_total_value)
                .bind(record.mkstat_public_total_trades)
                .bind(record.mkstat_public_total_volume)
                .bind(record.mkstat_public_total_value)
                .bind(record.mkstat_spot_total_trades)
                .bind(record.mkstat_spot_total_volume)
                .bind(record.mkstat_spot_total_value)
                .bind(record.mkstat_lm_date_time)
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
