//! # Campus Quest Core
//!
//! Turn-based simulation core for Campus Quest, a small arena game: one
//! hero with three weapons against a handful of pursuing enemies, with
//! scenery that blocks movement.
//!
//! ## Architecture
//!
//! - **World**: sole owner of every entity, with handle lookup, pruning and
//!   collision queries ([`world`])
//! - **Entities**: a closed set of kinds (player, enemy, decor, projectile)
//!   with per-kind components ([`entity`])
//! - **Behaviour**: weapons ([`weapon`]), combat and projectiles
//!   ([`combat`]), enemy pursuit ([`ai`]), player actions ([`player`]),
//!   per-kind dispatch ([`tick`]) and text rendering ([`render`])
//! - **Controller**: the turn state machine ([`game`])
//!
//! Entities refer to each other only through [`EntityId`] handles, resolved
//! through the [`World`] on every use.
//!
//! ## Usage
//!
//! ```
//! use campus_quest_core::{Game, GameConfig, GameState, NoInput};
//!
//! let mut game = Game::new(GameConfig::default());
//! let summary = game.run(&mut NoInput).unwrap();
//! assert_ne!(summary.state, GameState::Playing);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ai;
pub mod combat;
pub mod entity;
pub mod error;
pub mod game;
pub mod geometry;
pub mod player;
pub mod render;
pub mod tick;
pub mod weapon;
pub mod world;

pub use entity::{Entity, EntityId, EntityTag};
pub use error::{InvalidChoice, QuestError, Result};
pub use game::{
    ActionSource, Game, GameConfig, GameState, GameSummary, Mode, NoInput, PlayerAction,
    Scenario, TurnReport,
};
pub use geometry::Point2D;
pub use render::Renderable;
pub use weapon::{Weapon, WeaponKind};
pub use world::World;

#[cfg(test)]
mod tests;
