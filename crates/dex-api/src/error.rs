//! Errors raised while setting up the HTTP client.

use thiserror::Error;

/// Errors that prevent a client from being built.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}
