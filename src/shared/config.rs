use crate::modules::channel::domain::ReplyDeletion;
use crate::shared::errors::{AppError, AppResult};
use log::LevelFilter;
use std::env;

/// Runtime configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log_level: LevelFilter,
    pub reply_deletion: ReplyDeletion,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL").map_err(|_| {
            AppError::ConfigError("DATABASE_URL environment variable not found".to_string())
        })?;

        let (default_max, default_min) = DatabaseConfig::optimal_pool_size();
        let max_connections = read_number("DATABASE_MAX_CONNECTIONS")?.unwrap_or(default_max);
        let min_idle = read_number("DATABASE_MIN_IDLE")?
            .unwrap_or(default_min)
            .min(max_connections);

        let log_level = match env::var("LOG_LEVEL") {
            Ok(raw) => raw
                .parse::<LevelFilter>()
                .map_err(|_| AppError::ConfigError(format!("Invalid LOG_LEVEL '{}'", raw)))?,
            Err(_) => LevelFilter::Debug,
        };

        let reply_deletion = match env::var("CHANNEL_REPLY_DELETION") {
            Ok(raw) => raw.parse::<ReplyDeletion>().map_err(AppError::ConfigError)?,
            Err(_) => ReplyDeletion::default(),
        };

        let config = Self {
            database: DatabaseConfig {
                url,
                max_connections,
                min_idle,
            },
            log_level,
            reply_deletion,
        };
        config.database.validate()?;

        Ok(config)
    }
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        let (max_connections, min_idle) = Self::optimal_pool_size();
        Self {
            url: url.into(),
            max_connections,
            min_idle,
        }
    }

    /// Basic format checks; the URL itself is never logged with credentials.
    pub fn validate(&self) -> AppResult<()> {
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(AppError::ConfigError(
                "Invalid database URL format. Must start with postgres:// or postgresql://"
                    .to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(AppError::ConfigError(
                "DATABASE_MAX_CONNECTIONS must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Host part of the URL, safe for logs.
    pub fn redacted_host(&self) -> &str {
        self.url.rsplit('@').next().unwrap_or("unknown_host")
    }

    /// Pool size based on CPU count, capped at 20.
    fn optimal_pool_size() -> (u32, u32) {
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        let max_size = std::cmp::min(cpu_count * 2, 20);
        let min_idle = std::cmp::max(2, max_size / 4);

        (max_size as u32, min_idle as u32)
    }
}

fn read_number(key: &str) -> AppResult<Option<u32>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
