use crate::shared::errors::AppError;

/// Column limits of the `channel` table.
pub const CHANNEL_TITLE_MAX_LEN: usize = 15;
pub const CHANNEL_DESCRIPTION_MAX_LEN: usize = 70;

/// Mirrors the storage constraints so a write can be rejected with the
/// offending field before it reaches SQL. Lengths are counted in characters,
/// like Postgres `VARCHAR(n)`.
pub struct Validator;

impl Validator {
    pub fn validate_channel_title(title: &str) -> Result<(), AppError> {
        if title.is_empty() {
            return Err(AppError::constraint("title", "Title cannot be empty"));
        }
        if title.chars().count() > CHANNEL_TITLE_MAX_LEN {
            return Err(AppError::constraint(
                "title",
                format!("Title too long (max {} characters)", CHANNEL_TITLE_MAX_LEN),
            ));
        }
        Ok(())
    }

    pub fn validate_channel_description(description: Option<&str>) -> Result<(), AppError> {
        if let Some(description) = description {
            if description.chars().count() > CHANNEL_DESCRIPTION_MAX_LEN {
                return Err(AppError::constraint(
                    "description",
                    format!(
                        "Description too long (max {} characters)",
                        CHANNEL_DESCRIPTION_MAX_LEN
                    ),
                ));
            }
        }
        Ok(())
    }

    pub fn validate_channel(title: &str, description: Option<&str>) -> Result<(), AppError> {
        Self::validate_channel_title(title)?;
        Self::validate_channel_description(description)
    }
}
