//! Error types for the catch engine.

use thiserror::Error;

use crate::source::SourceError;

/// Result type for configuration and setup operations.
pub type DexResult<T> = Result<T, DexError>;

/// Errors raised while building a session configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DexError {
    /// A catalog range whose lower edge is zero or above its upper edge.
    #[error("invalid catalog range: {lower}..={upper}")]
    InvalidRange {
        /// Requested lower edge.
        lower: u32,
        /// Requested upper edge.
        upper: u32,
    },

    /// A base URL that cannot be used to reach the creature source.
    #[error("invalid api url: {0}")]
    InvalidUrl(String),
}

/// Errors that end a single catch attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatchError {
    /// The creature source failed for the drawn identifier.
    #[error("could not catch #{id}: {source}")]
    Source {
        /// Identifier that was requested.
        id: u32,
        /// Underlying source failure.
        source: SourceError,
    },

    /// Every identifier in the catalog has already been caught.
    #[error("all {count} pokemon in #{lower}..#{upper} already caught")]
    Exhausted {
        /// Lower edge of the catalog.
        lower: u32,
        /// Upper edge of the catalog.
        upper: u32,
        /// Number of identifiers in the catalog.
        count: usize,
    },
}

impl CatchError {
    /// Whether this error means no further catch can ever succeed.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CatchError::Exhausted { .. })
    }
}
