/// Shared infrastructure concerns
///
/// Connection pooling and migrations used by every module's repositories.
pub mod database;

pub use database::{Database, DbConnection, DbPool};
