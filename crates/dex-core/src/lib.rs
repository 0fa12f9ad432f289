//! Core of the Pokedex terminal app.
//!
//! Provides the identifier generator over a bounded catalog, the session
//! registry of caught creatures, and the catcher that draws a fresh id,
//! asks a [`CreatureSource`] for the creature and reports the outcome.

pub mod catalog;
pub mod catcher;
pub mod config;
pub mod creature;
pub mod error;
pub mod registry;
pub mod source;

pub use catalog::{CatalogRange, IdSource, RandomIds};
pub use catcher::{Catch, Catcher, Phase};
pub use config::{DexConfig, FailurePolicy};
pub use creature::Creature;
pub use error::{CatchError, DexError, DexResult};
pub use registry::{CaughtEntry, Registry};
pub use source::{CreatureSource, SourceError};
