//! Error types for design-system loading.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while building a [`ValidatorContext`](crate::ValidatorContext).
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// Underlying error wrapped in `Arc` for `Clone` support.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A configuration manifest is malformed.
    #[error("invalid manifest {}: {message}", path.display())]
    InvalidManifest {
        /// The manifest path.
        path: PathBuf,
        /// Description of the problem.
        message: String,
    },

    /// A stylesheet could not be parsed.
    #[error("invalid stylesheet at line {line}: {message}")]
    InvalidStylesheet {
        /// One-based line of the offending construct.
        line: u32,
        /// Description of the problem.
        message: String,
    },

    /// The requested design-system version is not supported.
    #[error("unsupported design system version: {version}")]
    UnsupportedVersion {
        /// The version text that was rejected.
        version: String,
    },
}

impl CatalogError {
    /// Creates an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates an invalid manifest error.
    #[must_use]
    pub fn invalid_manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid stylesheet error.
    #[must_use]
    pub fn invalid_stylesheet(line: u32, message: impl Into<String>) -> Self {
        Self::InvalidStylesheet {
            line,
            message: message.into(),
        }
    }

    /// Creates an unsupported version error.
    #[must_use]
    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version: version.into(),
        }
    }
}
