//! Integration tests for configuration and feed-row mapping.
//!
//! These cover the pure half of a sync pass; the database halves are
//! exercised against live MySQL/PostgreSQL instances in deployment.

use chrono::NaiveDate;
use imds_etl_config::{ConfigError, EtlConfig};
use imds_etl_pipeline::mkistat::map_mkistat_row;
use imds_etl_pipeline::trd::map_trd_row;
use imds_etl_source::{MkIstatRow, TrdRow};
use rust_decimal::Decimal;
use std::collections::HashMap;

fn full_env() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("MYSQL_USER", "imds"),
        ("MYSQL_PASSWORD", "feed#2024"),
        ("MYSQL_HOST", "10.0.3.7"),
        ("MYSQL_PORT", "3306"),
        ("MYSQL_DATABASE", "imds_feed"),
        ("POSTGRES_USER", "etl"),
        ("POSTGRES_PASSWORD", "sink"),
        ("POSTGRES_HOST", "10.0.3.8"),
        ("POSTGRES_PORT", "5432"),
        ("POSTGRES_DATABASE", "marketdata"),
    ])
}

fn config_from(env: &HashMap<&str, &str>) -> Result<EtlConfig, ConfigError> {
    EtlConfig::from_lookup(|var| env.get(var).map(|v| v.to_string()))
}

#[test]
fn config_covers_both_endpoints() {
    let config = config_from(&full_env()).unwrap();

    assert_eq!(config.mysql.host, "10.0.3.7");
    assert_eq!(config.mysql.port, 3306);
    assert_eq!(config.mysql.password, "feed#2024");
    assert_eq!(config.postgres.database, "marketdata");
}

#[test]
fn each_of_the_ten_variables_is_required() {
    let vars = [
        "MYSQL_USER",
        "MYSQL_PASSWORD",
        "MYSQL_HOST",
        "MYSQL_PORT",
        "MYSQL_DATABASE",
        "POSTGRES_USER",
        "POSTGRES_PASSWORD",
        "POSTGRES_HOST",
        "POSTGRES_PORT",
        "POSTGRES_DATABASE",
    ];

    for var in vars {
        let mut env = full_env();
        env.remove(var);
        let err = config_from(&env).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(var.to_string()), "{var}");
    }
}

#[test]
fn mkistat_mapping_preserves_the_natural_key() {
    let lm = NaiveDate::from_ymd_opt(2024, 9, 2)
        .unwrap()
        .and_hms_opt(11, 5, 30)
        .unwrap();
    let row = MkIstatRow {
        instrument_code: "SQURPHARMA".to_string(),
        instrument_number: 13002,
        quote_bases: None,
        open_price: Some(Decimal::new(21450, 2)),
        pub_last_traded_price: Some(Decimal::new(21510, 2)),
        spot_last_traded_price: None,
        high_price: Some(Decimal::new(21600, 2)),
        low_price: Some(Decimal::new(21390, 2)),
        close_price: None,
        yday_close_price: Some(Decimal::new(21400, 2)),
        total_trades: Some(882),
        total_volume: Some(Decimal::new(410_500, 0)),
        total_value: Some(Decimal::new(8_820_450_00, 2)),
        public_total_trades: Some(870),
        public_total_volume: Some(Decimal::new(402_000, 0)),
        public_total_value: Some(Decimal::new(8_640_000_00, 2)),
        spot_total_trades: Some(12),
        spot_total_volume: Some(Decimal::new(8_500, 0)),
        spot_total_value: Some(Decimal::new(180_450_00, 2)),
        lm_date_time: lm,
    };

    let record = map_mkistat_row(&row);
    assert_eq!(record.mkstat_instrument_code, "SQURPHARMA");
    assert_eq!(record.mkstat_lm_date_time, lm);
    assert!(!record.uuid.is_nil());
}

#[test]
fn trd_mapping_preserves_the_natural_key() {
    let lm = NaiveDate::from_ymd_opt(2024, 9, 2)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let row = TrdRow {
        total_trades: 201_114,
        total_volume: None,
        total_value: Some(Decimal::new(11_002_450_300, 2)),
        lm_date_time: lm,
    };

    let record = map_trd_row(&row);
    assert_eq!(record.trd_total_trades, 201_114);
    assert_eq!(record.trd_lm_date_time, lm);
    assert_eq!(record.trd_total_volume, None);
    assert!(!record.id.is_nil());
}
