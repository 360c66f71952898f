//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use note_quota_core::domain::{NoteTierLimits, TierInformation};
use note_quota_infra::DatabaseConfig;

/// Configuration errors - the server refuses to start on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    /// Deadline for a single quota decision.
    pub request_timeout: Duration,
    pub free_tier: TierInformation,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 100),
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 10),
            connect_attempts: parse_or(&lookup, "DB_CONNECT_ATTEMPTS", 10),
            retry_delay: Duration::from_secs(1),
        });

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            database,
            run_migrations: lookup("RUN_MIGRATIONS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            request_timeout: Duration::from_millis(parse_or(&lookup, "REQUEST_TIMEOUT_MS", 5000)),
            free_tier: Self::parse_free_tier(&lookup)?,
        })
    }

    /// Both limits are required; no default window is assumed.
    fn parse_free_tier(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<TierInformation, ConfigError> {
        let max_edits: u32 = required(lookup, "FREE_TIER_NOTES_MAX_EDITS")?;
        let window_secs: u64 = required(lookup, "FREE_TIER_NOTES_COUNT_EDITS_OVER_SECS")?;

        let count_edits_over = chrono::Duration::from_std(Duration::from_secs(window_secs))
            .map_err(|_| ConfigError::Invalid {
                key: "FREE_TIER_NOTES_COUNT_EDITS_OVER_SECS",
                value: window_secs.to_string(),
            })?;

        Ok(TierInformation {
            notes: NoteTierLimits::new(max_edits, count_edits_over),
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn required<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<T, ConfigError> {
    let value = lookup(key).ok_or(ConfigError::Missing(key))?;
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
