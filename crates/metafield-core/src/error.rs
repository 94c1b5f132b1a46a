//! Error types for metafield-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for metafield operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around the extraction and substitution passes.
///
/// The passes themselves never fail. These variants cover the surfaces a
/// host touches: configuration, file access, and document lookup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error tied to a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document key was not present in the content store
    #[error("Unknown document: {0}")]
    UnknownDocument(String),
}

impl Error {
    /// Creates an I/O error carrying the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Creates an unknown-document error.
    pub fn unknown_document<S: Into<String>>(key: S) -> Self {
        Error::UnknownDocument(key.into())
    }
}
