//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Policy checker error
    #[error("Policy error: {0}")]
    Policy(#[from] erdoslab_policy::PolicyError),

    /// Scaffolder error
    #[error("Scaffold error: {0}")]
    Scaffold(#[from] erdoslab_scaffold::ScaffoldError),

    /// Scout error
    #[error("Scout error: {0}")]
    Scout(#[from] erdoslab_scout::ScoutError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external proof-assistant build failed
    #[error("Build failed: {0}")]
    BuildFailed(String),

    /// Operation aborted by the user
    #[error("Aborted.")]
    Aborted,
}
