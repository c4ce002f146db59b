//! Storage Errors
//!
//! `TigerStyle`: Explicit error types with context.
//!
//! "Not found" is not an error here: selects return empty row sets and
//! typed getters return `None` by convention.

use thiserror::Error;

/// Errors from storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Unique-key constraint violated (native engine only; the fallback
    /// substrate enforces no constraints)
    #[error("constraint violation: {message}")]
    Constraint {
        /// Engine-reported message
        message: String,
    },

    /// Could not reach or open the storage substrate
    #[error("connection error: {message}")]
    Connection {
        /// Connection error message
        message: String,
    },

    /// A statement or key operation failed inside the substrate
    #[error("query error: {message}")]
    Query {
        /// Query error message
        message: String,
    },

    /// A record could not be serialized or deserialized
    #[error("serialization error: {message}")]
    Serialization {
        /// Serialization error message
        message: String,
    },
}

impl StorageError {
    /// Create a constraint violation error.
    #[must_use]
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Whether this is a unique-key constraint violation.
    ///
    /// The facade's upsert path recovers from these by falling back to an
    /// update.
    #[must_use]
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = StorageError::constraint("UNIQUE constraint failed: users.email");
        assert!(err.is_constraint());
        assert!(err.to_string().contains("users.email"));

        let err = StorageError::query("no such table");
        assert!(!err.is_constraint());
    }
}
