use log::{debug, error, info, LevelFilter};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup; later calls are ignored.
pub fn init_logger(level: LevelFilter) {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Info) // Default level
            .filter_module("vidhub", level) // Our own crate follows the configured level
            .filter_module("diesel", LevelFilter::Warn) // Reduce diesel noise
            .filter_module("r2d2", LevelFilter::Warn)
            .filter_module("tokio", LevelFilter::Warn) // Reduce tokio noise
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Logging system initialized at level {}", level);
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log database operations
    pub fn db_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("DB: {} on {} completed in {}ms", operation, table, duration),
            None => debug!("DB: Starting {} on {}", operation, table),
        }
    }

    /// Log relation changes made on a channel graph
    pub fn relation_change(relation: &str, channel_id: i64, other_id: i64, added: bool) {
        let verb = if added { "linked" } else { "unlinked" };
        debug!("Relation: {} {} channel {} <-> {}", relation, verb, channel_id, other_id);
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}
