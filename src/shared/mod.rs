// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod config; // Environment-driven configuration
pub mod domain; // Shared domain concepts (entity ids)
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database pool, migrations)
pub mod utils; // Logging and validation helpers

// Re-exports for convenience
pub use config::{AppConfig, DatabaseConfig};
pub use infrastructure::database::Database;
