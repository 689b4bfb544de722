use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_STATEMENT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 60;
const MAX_POOL_SIZE: u32 = 20;

/// Connection settings for the durable store
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_pool_size: u32,
    pub connection_timeout: Duration,
    /// Applied as `statement_timeout` on every pooled connection
    pub statement_timeout: Duration,
}

/// Runtime configuration, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub enrichment_webhook_url: String,
    pub dispatch_timeout: Duration,
    pub reconcile_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        validate_database_url(&database_url)?;

        let enrichment_webhook_url = required(&lookup, "ENRICHMENT_WEBHOOK_URL")?;
        if !enrichment_webhook_url.starts_with("http://")
            && !enrichment_webhook_url.starts_with("https://")
        {
            return Err(AppError::ConfigurationError(
                "ENRICHMENT_WEBHOOK_URL must be an http:// or https:// URL".to_string(),
            ));
        }

        let max_pool_size = match optional_number(&lookup, "DB_POOL_MAX_SIZE")? {
            Some(size) => size.min(MAX_POOL_SIZE as u64) as u32,
            None => default_pool_size(),
        };

        Ok(Self {
            database: DatabaseSettings {
                url: database_url,
                max_pool_size,
                connection_timeout: Duration::from_secs(
                    optional_number(&lookup, "DB_CONNECTION_TIMEOUT_SECS")?
                        .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
                ),
                statement_timeout: Duration::from_millis(
                    optional_number(&lookup, "DB_STATEMENT_TIMEOUT_MS")?
                        .unwrap_or(DEFAULT_DB_STATEMENT_TIMEOUT_MS),
                ),
            },
            enrichment_webhook_url,
            dispatch_timeout: Duration::from_secs(
                optional_number(&lookup, "DISPATCH_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_DISPATCH_TIMEOUT_SECS),
            ),
            reconcile_interval: Duration::from_secs(
                optional_number(&lookup, "RECONCILE_INTERVAL_SECS")?
                    .unwrap_or(DEFAULT_RECONCILE_INTERVAL_SECS),
            ),
        })
    }

    /// Database host/name part of the URL, safe to log
    pub fn redacted_database_url(&self) -> &str {
        self.database
            .url
            .rsplit('@')
            .next()
            .unwrap_or("unknown_host")
    }
}

fn required<F>(lookup: &F, key: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(AppError::ConfigurationError(format!(
            "{} environment variable not found",
            key
        ))),
    }
}

/// Every numeric setting is a size or a duration; zero is never meaningful
/// (a zero interval or pool timeout panics inside tokio and r2d2).
fn optional_number<F>(lookup: &F, key: &str) -> AppResult<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(AppError::ConfigurationError(format!(
            "{} must be a positive integer, got 0",
            key
        ))),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(AppError::ConfigurationError(format!(
            "{} must be a positive integer: {}",
            key, e
        ))),
    }
}

fn validate_database_url(url: &str) -> AppResult<()> {
    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
        return Err(AppError::ConfigurationError(
            "Invalid database URL format. Must start with postgres:// or postgresql://"
                .to_string(),
        ));
    }
    Ok(())
}

fn default_pool_size() -> u32 {
    let cpu_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    std::cmp::min(cpu_count * 2, MAX_POOL_SIZE as usize) as u32
}
