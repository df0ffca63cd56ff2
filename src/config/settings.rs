//! Process settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/social";
pub const DEFAULT_PORT: u16 = 5002;
/// Matches the 100kb default of common JSON body parsers.
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Store connection string: `postgres://...` or `memory://`.
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    /// PostgreSQL schema holding one table per collection.
    pub schema: String,
    pub rules_path: Option<PathBuf>,
    pub body_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            max_connections: 5,
            connect_timeout: Duration::from_secs(10),
            schema: "social".into(),
            rules_path: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let schema = get("SOCIAL_SCHEMA").unwrap_or(defaults.schema);
        if !is_identifier(&schema) {
            return Err(ConfigError::InvalidSetting {
                name: "SOCIAL_SCHEMA",
                reason: format!("'{}' is not a valid identifier", schema),
            });
        }

        Ok(Settings {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), defaults.max_connections)?,
            connect_timeout: Duration::from_secs(parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                get("DB_CONNECT_TIMEOUT_SECS"),
                defaults.connect_timeout.as_secs(),
            )?),
            schema,
            rules_path: get("RULES_PATH").map(PathBuf::from),
            body_limit: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), defaults.body_limit)?,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidSetting {
                name: "HOST",
                reason: format!("{}", e),
            })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.trim().parse().map_err(|e: T::Err| ConfigError::InvalidSetting {
            name,
            reason: e.to_string(),
        }),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
