//! Scaffolder error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from scaffolding operations.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The problem template directory is missing
    #[error("problems/TEMPLATE is missing (expected at {0})")]
    TemplateMissing(PathBuf),

    /// The target problem directory already exists
    #[error("problem directory already exists: {0}")]
    ProblemExists(PathBuf),

    /// The problem directory does not exist
    #[error("missing problem directory: {0}")]
    ProblemMissing(PathBuf),

    /// A frozen statement already exists and must not change
    #[error("frozen statement already exists: {0}")]
    FrozenExists(PathBuf),

    /// No solver run could be resolved
    #[error("solver run not found: {0}")]
    RunMissing(String),

    /// I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written or read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure in the scout layer while writing prompts
    #[error(transparent)]
    Scout(#[from] erdoslab_scout::ScoutError),
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }
}
