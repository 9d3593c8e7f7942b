//! Error types for the generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur while generating the functional-variant modules.
///
/// Every variant is fatal: the pipeline never retries or continues past one.
#[derive(Debug, Error)]
pub enum GenError {
    /// Reading the source directory, copying the support directory or
    /// writing an output file failed.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The mapping tables are inconsistent.
    #[error("Mapping error: {message}")]
    Mapping { message: String },

    /// A mapping or configuration document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GenError {
    /// Create an IO error tied to the path being processed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a mapping validation error.
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }
}

impl From<walkdir::Error> for GenError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        Self::Io {
            path,
            source: err.into(),
        }
    }
}
