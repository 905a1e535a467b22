use crate::log_info;
use crate::shared::config::DatabaseConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(config: &DatabaseConfig) -> AppResult<Self> {
        config.validate()?;

        // Log connection attempt without exposing credentials
        log_info!(
            "Initializing database connection to: {}",
            config.redacted_host()
        );

        let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());

        let pool = r2d2::Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_idle))
            // Connection timeouts
            .connection_timeout(Duration::from_secs(10)) // Time to wait for connection from pool
            .idle_timeout(Some(Duration::from_secs(300))) // Close idle connections after 5 minutes
            .max_lifetime(Some(Duration::from_secs(1800))) // Replace connections after 30 minutes
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        log_info!(
            "Database connection pool initialized with max_size: {}, min_idle: {}",
            pool.max_size(),
            config.min_idle
        );

        Ok(Self { pool })
    }

    /// Create a Database instance from an existing pool (useful for testing)
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get_connection(&self) -> AppResult<DbConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    LogContext::performance_metric("db_connection_acquire", duration, Some("slow"));
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    "Failed to acquire database connection from pool",
                );
                Err(AppError::from(e))
            }
        }
    }

    /// Apply pending embedded migrations. Returns how many were applied.
    pub fn run_migrations(&self) -> AppResult<usize> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

        log_info!("Database migrations completed ({} applied)", applied.len());
        Ok(applied.len())
    }

    /// Get pool statistics for monitoring
    pub fn pool_status(&self) -> PoolStatus {
        let state = self.pool.state();
        PoolStatus {
            connections: state.connections,
            idle_connections: state.idle_connections,
            max_size: self.pool.max_size(),
        }
    }

    /// Get the underlying connection pool (useful for testing and repository initialization)
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[derive(Debug)]
pub struct PoolStatus {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_size: u32,
}
