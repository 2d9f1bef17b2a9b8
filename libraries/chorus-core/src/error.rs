/// Core error types for Chorus
use thiserror::Error;

/// Result type alias using `ChorusError`
pub type Result<T> = std::result::Result<T, ChorusError>;

/// Core error type for Chorus
///
/// Every variant is surfaced to the caller unchanged; nothing in the core
/// retries on any of them.
#[derive(Error, Debug)]
pub enum ChorusError {
    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// The caller already performed this action
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Principal lacks rights on the resource
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Input rejected by a domain rule
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store did something it must never do (e.g. an insert without an id)
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Cache invalidation could not complete
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChorusError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Whether this error is a `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<crate::cache::CacheError> for ChorusError {
    fn from(err: crate::cache::CacheError) -> Self {
        Self::Cache(err.to_string())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ChorusError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
