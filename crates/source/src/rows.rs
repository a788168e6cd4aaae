//! Typed rows of the IMDS feed tables.
//!
//! Column names on the feed side are upper snake case; the structs keep
//! Rust-style fields and map via sqlx rename attributes.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// One row of the `MKISTAT` feed table (per-instrument statistics).
#[derive(Debug, Clone, FromRow)]
pub struct MkIstatRow {
    #[sqlx(rename = "MKISTAT_INSTRUMENT_CODE")]
    pub instrument_code: String,
    #[sqlx(rename = "MKISTAT_INSTRUMENT_NUMBER")]
    pub instrument_number: i64,
    #[sqlx(rename = "MKISTAT_QUOTE_BASES")]
    pub quote_bases: Option<String>,
    #[sqlx(rename = "MKISTAT_OPEN_PRICE")]
    pub open_price: Option<Decimal>,
    // The feed says "TRADED", the sink schema says "trade".
    #[sqlx(rename = "MKISTAT_PUB_LAST_TRADED_PRICE")]
    pub pub_last_traded_price: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_SPOT_LAST_TRADED_PRICE")]
    pub spot_last_traded_price: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_HIGH_PRICE")]
    pub high_price: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_LOW_PRICE")]
    pub low_price: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_CLOSE_PRICE")]
    pub close_price: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_YDAY_CLOSE_PRICE")]
    pub yday_close_price: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_TOTAL_TRADES")]
    pub total_trades: Option<i64>,
    #[sqlx(rename = "MKISTAT_TOTAL_VOLUME")]
    pub total_volume: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_TOTAL_VALUE")]
    pub total_value: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_PUBLIC_TOTAL_TRADES")]
    pub public_total_trades: Option<i64>,
    #[sqlx(rename = "MKISTAT_PUBLIC_TOTAL_VOLUME")]
    pub public_total_volume: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_PUBLIC_TOTAL_VALUE")]
    pub public_total_value: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_SPOT_TOTAL_TRADES")]
    pub spot_total_trades: Option<i64>,
    #[sqlx(rename = "MKISTAT_SPOT_TOTAL_VOLUME")]
    pub spot_total_volume: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_SPOT_TOTAL_VALUE")]
    pub spot_total_value: Option<Decimal>,
    #[sqlx(rename = "MKISTAT_LM_DATE_TIME")]
    pub lm_date_time: NaiveDateTime,
}

/// One row of the `TRD` feed table (market-wide trade summary).
#[derive(Debug, Clone, FromRow)]
pub struct TrdRow {
    #[sqlx(rename = "TRD_TOTAL_TRADES")]
    pub total_trades: i64,
    #[sqlx(rename = "TRD_TOTAL_VOLUME")]
    pub total_volume: Option<Decimal>,
    #[sqlx(rename = "TRD_TOTAL_VALUE")]
    pub total_value: Option<Decimal>,
    #[sqlx(rename = "TRD_LM_DATE_TIME")]
    pub lm_date_time: NaiveDateTime,
}
