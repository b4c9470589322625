//! Storage error types
//!
//! Error codes:
//! - STORAGE_ERROR: the document could not be read, decoded, encoded or written
//! - DUPLICATE_EMAIL: a create collided with an existing email

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read, parse or write the persisted document.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading the document failed
    #[error("Failed to read document {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the document failed
    #[error("Failed to write document {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Document content does not have the root/row shape
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The collection could not be serialized
    #[error("Failed to encode document: {0}")]
    EncodeFailed(String),
}

impl StorageError {
    /// Create a malformed document error
    pub fn malformed(reason: impl Into<String>) -> Self {
        StorageError::MalformedDocument(reason.into())
    }

    /// Returns whether the failure came from the document content rather than I/O
    pub fn is_malformed(&self) -> bool {
        matches!(self, StorageError::MalformedDocument(_))
    }
}

/// Result type for document-level operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Create rejected because the email is already present
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Any storage failure, including malformed documents
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            StoreError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns whether the caller caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::DuplicateEmail(_))
    }
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let dup = StoreError::DuplicateEmail("a@b.com".to_string());
        assert_eq!(dup.code(), "DUPLICATE_EMAIL");
        assert!(dup.is_client_error());

        let storage = StoreError::from(StorageError::malformed("missing root"));
        assert_eq!(storage.code(), "STORAGE_ERROR");
        assert!(!storage.is_client_error());
    }

    #[test]
    fn test_malformed_propagates_as_storage_error() {
        let err: StoreError = StorageError::malformed("row 1 missing field `email`").into();
        match err {
            StoreError::Storage(inner) => assert!(inner.is_malformed()),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_contains_context() {
        let err = StorageError::ReadFailed {
            path: PathBuf::from("public/data.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = err.to_string();
        assert!(display.contains("public/data.xml"));
        assert!(display.contains("denied"));

        let dup = StoreError::DuplicateEmail("a@b.com".to_string());
        assert_eq!(dup.to_string(), "Email already exists: a@b.com");
    }
}
