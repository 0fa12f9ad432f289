//! The remote creature source seen from the catch engine.

use thiserror::Error;

use crate::creature::Creature;

/// Failures reported by a [`CreatureSource`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The source has no creature under this identifier.
    #[error("no pokemon with id {0}")]
    NotFound(String),

    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not a creature record.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Looks creatures up by identifier.
///
/// Calls block until the source answers. Identifiers are passed in their
/// decimal string form.
pub trait CreatureSource {
    /// Fetch the creature with the given identifier.
    fn fetch(&self, id: &str) -> Result<Creature, SourceError>;
}

impl<S: CreatureSource + ?Sized> CreatureSource for &S {
    fn fetch(&self, id: &str) -> Result<Creature, SourceError> {
        (**self).fetch(id)
    }
}

impl<S: CreatureSource + ?Sized> CreatureSource for Box<S> {
    fn fetch(&self, id: &str) -> Result<Creature, SourceError> {
        (**self).fetch(id)
    }
}
