/// Database test utilities with singleton pattern
///
/// Provides thread-safe access to the test database with proper isolation.
/// Tests that need Postgres call [`test_db_pool`] and skip themselves when
/// `TEST_DATABASE_URL` is not configured.
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel_migrations::MigrationHarness;
use std::sync::{Arc, Mutex, OnceLock};
use vidhub::shared::infrastructure::database::MIGRATIONS;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

static DB_POOL: OnceLock<Option<Arc<PgPool>>> = OnceLock::new();

/// Get or create the singleton pool, with migrations applied.
/// `None` when no test database is configured.
pub fn test_db_pool() -> Option<Arc<PgPool>> {
    DB_POOL
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let test_db_url = std::env::var("TEST_DATABASE_URL").ok()?;

            let manager = ConnectionManager::<PgConnection>::new(test_db_url);
            let pool = r2d2::Pool::builder()
                .max_size(5)
                .build(manager)
                .expect("Failed to create test database pool");

            let mut conn = pool.get().expect("Failed to get DB connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("Failed to run migrations on test database");

            Some(Arc::new(pool))
        })
        .clone()
}

/// Clean all channel tables - use at the start of each test
pub fn clean_test_db(pool: &PgPool) {
    let mut conn = pool.get().expect("Failed to get DB connection");

    diesel::sql_query(
        "TRUNCATE TABLE comment_like, video_like, comment, video, subscription, channel \
         RESTART IDENTITY CASCADE",
    )
    .execute(&mut conn)
    .expect("Failed to clean channel tables");
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
/// Returns a guard that releases the lock when dropped
pub fn acquire_test_lock() -> std::sync::MutexGuard<'static, ()> {
    // Handle poisoned mutex by recovering from panic
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Count rows of a table, for asserting cascades
pub fn count_rows(pool: &PgPool, table: &str) -> i64 {
    #[derive(QueryableByName)]
    struct Count {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        count: i64,
    }

    let mut conn = pool.get().expect("Failed to get DB connection");
    diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {}", table))
        .get_result::<Count>(&mut conn)
        .expect("Failed to count rows")
        .count
}
