//! Terminal UI for catching random pokemon.
//!
//! The screen is driven by a single [`app::Model`] that every event moves
//! through [`app::Model::update`], which hands back the next model and the
//! commands the event loop should run.

pub mod app;
pub mod error;
pub mod keys;
pub mod logging;
pub mod terminal;
pub mod view;
