/// Core error types for Fave
use thiserror::Error;

/// Result type alias using `FaveError`
pub type Result<T> = std::result::Result<T, FaveError>;

/// Core error type for Fave
#[derive(Error, Debug)]
pub enum FaveError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Duplicate entry (e.g. a username that is already taken)
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl FaveError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Whether this error reports a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for FaveError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = FaveError::not_found("User", "abc");
        assert_eq!(err.to_string(), "User not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_is_not_not_found() {
        let err = FaveError::duplicate("username alice");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Duplicate entry: username alice");
    }
}
