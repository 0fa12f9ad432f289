//! Error types for the terminal app.

use thiserror::Error;

/// Errors that end the terminal session.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Terminal setup, drawing, or input failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Invalid session configuration.
    #[error("{0}")]
    Config(#[from] dex_core::DexError),

    /// The creature source could not be set up.
    #[error("{0}")]
    Api(#[from] dex_api::ApiError),

    /// Logging could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// A fetch failed under the fail-fast policy.
    #[error("there was an error retrieving a pokemon: {0}")]
    Fatal(String),
}
