//! Environment configuration for the IMDS ETL service.
//!
//! The service is driven entirely by ten environment variables describing
//! the MySQL source and the PostgreSQL sink. All of them are validated up
//! front so a misconfigured container fails at startup with the variable
//! name, not later with an opaque connection error.

use serde::Serialize;
use std::fmt;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(String),
    #[error("environment variable {var} is not a valid port: {value:?}")]
    InvalidPort { var: String, value: String },
}

/// Connection parameters for one relational endpoint.
///
/// The password is kept out of `Debug` output and serialized forms; it is
/// only ever handed to the sqlx connect options.
#[derive(Clone, Serialize)]
pub struct DbEndpoint {
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl fmt::Debug for DbEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbEndpoint")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

/// Full service configuration: MySQL source and PostgreSQL sink.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub mysql: DbEndpoint,
    pub postgres: DbEndpoint,
}

impl EtlConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load the configuration from an arbitrary variable lookup.
    ///
    /// Tests use this with an in-memory map instead of mutating the real
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            mysql: endpoint(&lookup, "MYSQL")?,
            postgres: endpoint(&lookup, "POSTGRES")?,
        })
    }
}

fn endpoint<F>(lookup: &F, prefix: &str) -> Result<DbEndpoint, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(DbEndpoint {
        user: require(lookup, &format!("{prefix}_USER"))?,
        password: require(lookup, &format!("{prefix}_PASSWORD"))?,
        host: require(lookup, &format!("{prefix}_HOST"))?,
        port: require_port(lookup, &format!("{prefix}_PORT"))?,
        database: require(lookup, &format!("{prefix}_DATABASE"))?,
    })
}

fn require<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var.to_string())),
    }
}

fn require_port<F>(lookup: &F, var: &str) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = require(lookup, var)?;
    value.parse().map_err(|_| ConfigError::InvalidPort {
        var: var.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("MYSQL_USER", "imds"),
            ("MYSQL_PASSWORD", "p@ss:w/rd"),
            ("MYSQL_HOST", "mysql.internal"),
            ("MYSQL_PORT", "3306"),
            ("MYSQL_DATABASE", "imds_feed"),
            ("POSTGRES_USER", "etl"),
            ("POSTGRES_PASSWORD", "secret"),
            ("POSTGRES_HOST", "pg.internal"),
            ("POSTGRES_PORT", "5432"),
            ("POSTGRES_DATABASE", "marketdata"),
        ])
    }

    fn lookup_from<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| map.get(var).map(|v| v.to_string())
    }

    #[test]
    fn parses_full_environment() {
        let env = full_env();
        let config = EtlConfig::from_lookup(lookup_from(&env)).unwrap();

        assert_eq!(config.mysql.host, "mysql.internal");
        assert_eq!(config.mysql.port, 3306);
        assert_eq!(config.mysql.database, "imds_feed");
        assert_eq!(config.postgres.user, "etl");
        assert_eq!(config.postgres.port, 5432);
    }

    #[test]
    fn password_with_reserved_characters_is_preserved_verbatim() {
        let env = full_env();
        let config = EtlConfig::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.mysql.password, "p@ss:w/rd");
    }

    #[test]
    fn missing_variable_is_named_in_the_error() {
        let mut env = full_env();
        env.remove("POSTGRES_PASSWORD");

        let err = EtlConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("POSTGRES_PASSWORD".into()));
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        let mut env = full_env();
        env.insert("MYSQL_HOST", "");

        let err = EtlConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("MYSQL_HOST".into()));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let mut env = full_env();
        env.insert("MYSQL_PORT", "default");

        let err = EtlConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                var: "MYSQL_PORT".into(),
                value: "default".into(),
            }
        );
    }

    #[test]
    fn debug_output_redacts_the_password() {
        let env = full_env();
        let config = EtlConfig::from_lookup(lookup_from(&env)).unwrap();
        let rendered = format!("{:?}", config);

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("p@ss:w/rd"));
    }
}
