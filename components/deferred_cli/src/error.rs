//! Error types for the CLI

use core_types::Value;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested scenario does not exist
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    /// The scenario's deferred value settled with a rejection
    #[error("scenario rejected: {0}")]
    Rejected(Value),

    /// The scenario's deferred value never left the pending state
    #[error("scenario never settled")]
    NeverSettled,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
