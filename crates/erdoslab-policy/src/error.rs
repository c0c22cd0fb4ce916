//! Policy checker error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a policy check outright.
///
/// Most problems found during a check are reported as violations, not
/// errors; these cover the cases where the repository cannot be inspected
/// at all.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The repository root does not exist or is not a directory
    #[error("repository root is not a directory: {0}")]
    BadRoot(PathBuf),

    /// An I/O failure while walking the tree
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl PolicyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PolicyError::Io {
            path: path.into(),
            source,
        }
    }
}
