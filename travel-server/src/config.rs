//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::email::{DEFAULT_BASE_URL, SendGridConfig};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default sender for confirmation emails.
pub const DEFAULT_EMAIL_FROM: &str = "travel@smartcities.india.com";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Replaces the built-in seed data.
    pub seed_file: Option<PathBuf>,
    /// `None` disables outbound mail.
    pub sendgrid: Option<SendGridConfig>,
    pub session_ttl: Duration,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = parse_or(&get, "BIND_ADDR", || {
            DEFAULT_BIND_ADDR
                .parse::<SocketAddr>()
                .map_err(|_| invalid("BIND_ADDR", DEFAULT_BIND_ADDR))
        })?;

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", || {
                    Ok(DEFAULT_MAX_CONNECTIONS)
                })?,
            }),
            None => None,
        };

        let sendgrid = get("SENDGRID_API_KEY").map(|key| {
            let from = get("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string());
            let base_url = get("SENDGRID_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
            SendGridConfig::new(key, from).with_base_url(base_url)
        });

        let ttl_secs: u64 = parse_or(&get, "SESSION_TTL_SECS", || Ok(DEFAULT_SESSION_TTL_SECS))?;
        if ttl_secs == 0 {
            return Err(invalid("SESSION_TTL_SECS", "0"));
        }

        Ok(Self {
            bind_addr,
            database,
            seed_file: get("SEED_FILE").map(PathBuf::from),
            sendgrid,
            session_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
    }
}

fn parse_or<T, G, D>(get: &G, var: &'static str, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
    D: FnOnce() -> Result<T, ConfigError>,
{
    match get(var) {
        Some(raw) => raw.trim().parse().map_err(|_| invalid(var, &raw)),
        None => default(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert!(config.database.is_none());
        assert!(config.seed_file.is_none());
        assert!(config.sendgrid.is_none());
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn database_url_selects_postgres() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/travel"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(
            config.database,
            Some(DatabaseConfig {
                url: "postgres://localhost/travel".to_string(),
                max_connections: 12,
            })
        );
    }

    #[test]
    fn sendgrid_key_enables_mail() {
        let config = config_from(&[("SENDGRID_API_KEY", "sg-test")]).unwrap();
        let sendgrid = config.sendgrid.unwrap();
        assert_eq!(sendgrid.api_key, "sg-test");
        assert_eq!(sendgrid.from, DEFAULT_EMAIL_FROM);
        assert_eq!(sendgrid.base_url, DEFAULT_BASE_URL);

        let config = config_from(&[
            ("SENDGRID_API_KEY", "sg-test"),
            ("EMAIL_FROM", "trips@example.com"),
            ("SENDGRID_BASE_URL", "http://127.0.0.1:9999"),
        ])
        .unwrap();
        let sendgrid = config.sendgrid.unwrap();
        assert_eq!(sendgrid.from, "trips@example.com");
        assert_eq!(sendgrid.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config_from(&[("SENDGRID_API_KEY", "  "), ("DATABASE_URL", "")]).unwrap();
        assert!(config.sendgrid.is_none());
        assert!(config.database.is_none());
    }

    #[test]
    fn malformed_numbers_are_errors() {
        assert_eq!(
            config_from(&[("SESSION_TTL_SECS", "a day")]).unwrap_err(),
            ConfigError::Invalid {
                var: "SESSION_TTL_SECS",
                value: "a day".to_string(),
            }
        );
        assert!(config_from(&[("SESSION_TTL_SECS", "0")]).is_err());
        assert!(config_from(&[("BIND_ADDR", "localhost")]).is_err());
        assert!(
            config_from(&[
                ("DATABASE_URL", "postgres://localhost/travel"),
                ("DATABASE_MAX_CONNECTIONS", "-1"),
            ])
            .is_err()
        );
    }

    #[test]
    fn seed_file_path() {
        let config = config_from(&[("SEED_FILE", "/srv/seed.json")]).unwrap();
        assert_eq!(config.seed_file, Some(PathBuf::from("/srv/seed.json")));
    }
}
