//! CLI error type.

use thiserror::Error;

/// Errors surfaced to the terminal with a nonzero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad or missing configuration.
    #[error("{0}")]
    Config(String),

    /// Layer definition could not be resolved or parsed.
    #[error("{0}")]
    Layer(String),

    /// A batch was rejected before any request was dispatched.
    #[error("{0}")]
    Fetch(String),

    /// HTTP client could not be constructed.
    #[error("{0}")]
    Provider(String),

    /// Filesystem or runtime failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
