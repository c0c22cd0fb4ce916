//! Scout error types

use thiserror::Error;

/// Errors from prompt scaffolding and response ingestion.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// The response contained no parseable JSON object
    #[error("no JSON object found in response: {0}")]
    NoJson(String),

    /// The response JSON failed schema validation
    #[error("response failed validation: {0} error(s)")]
    Validation(usize),

    /// I/O failure writing or reading an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
