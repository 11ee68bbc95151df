use crate::annotate::AnnotateError;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://pricing.db?mode=rwc";

/// Connection settings for the relational store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub sql_logging: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(8),
            sql_logging: true,
        }
    }
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Read settings from the process environment. Call `dotenv::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, AnnotateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnnotateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or("DB_MAX_CONNECTIONS", &lookup, defaults.max_connections)?,
            min_connections: parse_or("DB_MIN_CONNECTIONS", &lookup, defaults.min_connections)?,
            connect_timeout: Duration::from_secs(parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                &lookup,
                defaults.connect_timeout.as_secs(),
            )?),
            sql_logging: parse_or("DB_SQL_LOGGING", &lookup, defaults.sql_logging)?,
        })
    }

    /// `sqlite::memory:` and `mode=memory` URLs live only as long as their
    /// connection.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    pub fn is_sqlite(&self) -> bool {
        self.database_url.starts_with("sqlite:")
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, AnnotateError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AnnotateError::Config(format!("{key} has invalid value {raw:?}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, StoreConfig::default());
        assert!(cfg.is_sqlite());
        assert!(!cfg.is_in_memory());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = StoreConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_CONNECT_TIMEOUT_SECS", " 20 "),
            ("DB_SQL_LOGGING", "false"),
        ]))
        .unwrap();
        assert_eq!(cfg.max_connections, 3);
        assert_eq!(cfg.connect_timeout, Duration::from_secs(20));
        assert!(!cfg.sql_logging);
        assert!(cfg.is_in_memory());
    }

    #[test]
    fn invalid_number_is_a_config_error() {
        let err = StoreConfig::from_lookup(lookup_from(&[("DB_MIN_CONNECTIONS", "two")]))
            .unwrap_err();
        assert!(matches!(err, AnnotateError::Config(msg) if msg.contains("DB_MIN_CONNECTIONS")));
    }
}
