//! HTTP creature source backed by PokeAPI.
//!
//! [`PokeApiClient`] implements [`dex_core::CreatureSource`] with blocking
//! requests, so a fetch holds the caller until the API answers.

pub mod client;
pub mod error;

pub use client::PokeApiClient;
pub use error::ApiError;
