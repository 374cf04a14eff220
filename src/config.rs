use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub database_max_connections: u32,

    // Rate limiting
    pub rate_per_min: u32,

    pub api_prefix: String,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080")?,
            database_url: var_or("DATABASE_URL", "sqlite://attendance.db")?,
            database_max_connections: var_or("DATABASE_MAX_CONNECTIONS", "5")?,
            rate_per_min: var_or("RATE_PER_MIN", "600")?,
            api_prefix: var_or("API_PREFIX", "/api")?,
            log_dir: var_or("LOG_DIR", "logs")?,
            log_level: var_or("LOG_LEVEL", "info")?,
        })
    }
}

/// Reads `key` from the environment, falling back to `default`, and parses it.
fn var_or<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("{key} has an invalid value {raw:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_when_unset() {
        let port: u32 = var_or("ATTENDANCE_TEST_UNSET_VARIABLE", "42").unwrap();
        assert_eq!(port, 42);
    }

    #[test]
    fn reports_the_variable_name_on_parse_failure() {
        let err = var_or::<u32>("ATTENDANCE_TEST_UNSET_VARIABLE_2", "many").unwrap_err();
        assert!(err.to_string().contains("ATTENDANCE_TEST_UNSET_VARIABLE_2"));
    }

    #[test]
    fn parses_log_levels() {
        let level: tracing::Level = var_or("ATTENDANCE_TEST_UNSET_VARIABLE_3", "debug").unwrap();
        assert_eq!(level, tracing::Level::DEBUG);
    }
}
