//! Sink record types.
//!
//! Field names mirror the sink table columns one-to-one. Prices and traded
//! values are `NUMERIC` in the sink and `Decimal` here; the feed's
//! `*_LM_DATE_TIME` columns carry local exchange time with no zone, so they
//! stay `NaiveDateTime`.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of per-instrument market statistics in `imds_mk_istats`.
///
/// The natural key is (`mkstat_instrument_code`, `mkstat_lm_date_time`);
/// the `uuid` primary key is assigned fresh at insert time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MkIstatRecord {
    pub uuid: Uuid,
    pub mkstat_instrument_code: String,
    pub mkstat_instrument_number: i64,
    pub mkstat_quote_bases: Option<String>,
    pub mkstat_open_price: Option<Decimal>,
    pub mkstat_pub_last_trade_price: Option<Decimal>,
    pub mkstat_spot_last_trade_price: Option<Decimal>,
    pub mkstat_high_price: Option<Decimal>,
    pub mkstat_low_price: Option<Decimal>,
    pub mkstat_close_price: Option<Decimal>,
    pub mkstat_yday_close_price: Option<Decimal>,
    pub mkstat_total_trades: Option<i64>,
    pub mkstat_total_volume: Option<Decimal>,
    pub mkstat_total_value: Option<Decimal>,
    pub mkstat_public_total_trades: Option<i64>,
    pub mkstat_public_total_volume: Option<Decimal>,
    pub mkstat_public_total_value: Option<Decimal>,
    pub mkstat_spot_total_trades: Option<i64>,
    pub mkstat_spot_total_volume: Option<Decimal>,
    pub mkstat_spot_total_value: Option<Decimal>,
    pub mkstat_lm_date_time: NaiveDateTime,
}

/// One row of the market-wide trade summary in `imds_trds`.
///
/// The natural key is (`trd_total_trades`, `trd_lm_date_time`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrdRecord {
    pub id: Uuid,
    pub trd_total_trades: i64,
    pub trd_total_volume: Option<Decimal>,
    pub trd_total_value: Option<Decimal>,
    pub trd_lm_date_time: NaiveDateTime,
}
