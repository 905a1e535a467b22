use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A storage constraint rejected the write. `field` names the column.
    #[error("Validation failed on '{field}': {message}")]
    ConstraintViolation { field: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AppError {
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ConstraintViolation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name of a constraint violation, if this is one.
    pub fn violated_field(&self) -> Option<&str> {
        match self {
            AppError::ConstraintViolation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Best-effort column name for a database-side violation.
///
/// Postgres reports the column for NOT NULL violations; for UNIQUE and FOREIGN KEY
/// violations only the constraint name is known (`channel_title_key`,
/// `video_channel_id_fkey`), so the column is recovered from the naming convention.
fn field_from_info(info: &dyn DatabaseErrorInformation) -> String {
    if let Some(column) = info.column_name() {
        return column.to_string();
    }

    match info.constraint_name() {
        Some(name) => {
            let trimmed = name
                .strip_suffix("_key")
                .or_else(|| name.strip_suffix("_fkey"))
                .or_else(|| name.strip_suffix("_check"))
                .or_else(|| name.strip_suffix("_pkey"))
                .unwrap_or(name);
            let table = info.table_name().unwrap_or("");
            trimmed
                .strip_prefix(table)
                .map(|s| s.trim_start_matches('_'))
                .filter(|s| !s.is_empty())
                .unwrap_or(trimmed)
                .to_string()
        }
        None => "unknown".to_string(),
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::Error as DieselError;

        match err {
            DieselError::NotFound => AppError::NotFound("Record not found in database".to_string()),
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => AppError::ConstraintViolation {
                    field: field_from_info(info.as_ref()),
                    message: format!("duplicate value: {}", info.message()),
                },
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => AppError::ConstraintViolation {
                    field: field_from_info(info.as_ref()),
                    message: info.message().to_string(),
                },
                _ => AppError::DatabaseError(info.message().to_string()),
            },
            other => AppError::DatabaseError(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::DatabaseError(format!("Database pool error: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Blocking task failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidInput(format!("Invalid number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
