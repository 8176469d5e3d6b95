//! Error types for aulatrust.
//!
//! This module defines all error types used throughout the aulatrust crate.
//! The taxonomy is deliberately small: documents that aren't there, I/O that
//! fails, and configuration that doesn't load. Nothing here is ever fatal to
//! the hosting process; callers surface these as inline notices and keep the
//! session usable.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for aulatrust operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Document Store Errors ===
    /// A referenced document does not exist in its folder.
    #[error("document '{name}' not found in {folder}")]
    DocumentNotFound {
        /// Directory name of the folder that was searched.
        folder: String,
        /// File name of the missing document.
        name: String,
    },

    /// Reading a document from disk failed.
    #[error("failed to read document at {path}: {source}")]
    DocumentRead {
        /// Path to the document file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a document to disk failed.
    #[error("failed to write document at {path}: {source}")]
    DocumentWrite {
        /// Path to the document file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Building the folder archive failed.
    #[error("failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A document name does not follow the `<Prefix>_<YYYYMMDD_HHMMSS>.md`
    /// convention.
    #[error("invalid document name: {name}")]
    InvalidDocumentName {
        /// The offending name.
        name: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to load a worksheet state file.
    #[error("failed to load worksheet state: {0}")]
    StateLoad(Box<figment::Error>),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for aulatrust operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for a document.
    #[must_use]
    pub fn document_not_found(folder: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DocumentNotFound {
            folder: folder.into(),
            name: name.into(),
        }
    }

    /// Check if this error means a document was simply absent.
    ///
    /// Not-found conditions are recovered locally (skip the item or fall
    /// back to a default) rather than surfaced as failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_not_found_display() {
        let err = Error::document_not_found("entregas", "UD3_S1_20250101_120000.md");
        assert_eq!(
            err.to_string(),
            "document 'UD3_S1_20250101_120000.md' not found in entregas"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_error_is_not_not_found() {
        let err = Error::DocumentWrite {
            path: PathBuf::from("entregas/UD3_S1_20250101_120000.md"),
            source: std::io::Error::other("disk on fire"),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_name_display() {
        let err = Error::InvalidDocumentName {
            name: "notes.txt".to_string(),
        };
        assert_eq!(err.to_string(), "invalid document name: notes.txt");
    }
}
