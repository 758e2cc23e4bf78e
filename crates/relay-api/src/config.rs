//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.omnisend.com/v5";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5000;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Pool size.
    pub database_max_connections: u32,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Base URL of the marketing platform API.
    pub upstream_base_url: String,
    /// Per-attempt upstream timeout.
    pub upstream_timeout: Duration,
    /// OTLP collector endpoint; trace export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;

        let upstream_timeout_ms =
            parse_or("UPSTREAM_TIMEOUT_MS", &lookup, DEFAULT_UPSTREAM_TIMEOUT_MS)?;

        Ok(Self {
            database_url,
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                &lookup,
                DEFAULT_MAX_CONNECTIONS,
            )?,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: parse_or("PORT", &lookup, DEFAULT_PORT)?,
            upstream_base_url: lookup("UPSTREAM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_owned()),
            upstream_timeout: Duration::from_millis(upstream_timeout_ms),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/relay")]).unwrap();

        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_base_url, "https://api.omnisend.com/v5");
        assert_eq!(config.upstream_timeout, Duration::from_millis(5000));
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let err = config_from(&[("PORT", "8080")]).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db/relay"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("UPSTREAM_BASE_URL", "http://localhost:9999"),
            ("UPSTREAM_TIMEOUT_MS", "250"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
        ])
        .unwrap();

        assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.upstream_base_url, "http://localhost:9999");
        assert_eq!(config.upstream_timeout, Duration::from_millis(250));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("DATABASE_URL", "postgres://db"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("PORT")));
    }

    #[test]
    fn test_blank_otlp_endpoint_disables_export() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "  "),
        ])
        .unwrap();
        assert!(config.otlp_endpoint.is_none());
    }
}
