//! Scenario and property tests.
//!
//! - `integration.rs`: end-to-end scenarios through the game controller
//! - `determinism.rs`: identical configs produce identical games
//! - `properties.rs`: proptest checks of the core rules
//! - `helpers.rs`: world and scenario builders

mod helpers;
mod integration;

pub use helpers::*;
