//! # Store Errors
//!
//! Error types for the reservation store.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or its schema could not be ensured
    #[error("Store unavailable: {0}")]
    Unavailable(#[source] rusqlite::Error),

    /// A statement failed on an open connection
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Whether the failure happened before any statement could run
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display_carries_cause() {
        let err = StoreError::Unavailable(rusqlite::Error::InvalidQuery);
        assert!(err.is_unavailable());
        assert!(err.to_string().starts_with("Store unavailable: "));
    }

    #[test]
    fn test_sqlite_error_is_transparent() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_unavailable());
        assert_eq!(
            err.to_string(),
            rusqlite::Error::QueryReturnedNoRows.to_string()
        );
    }
}
