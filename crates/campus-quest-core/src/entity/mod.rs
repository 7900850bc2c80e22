//! Entity model for the Campus Quest simulation.
//!
//! This module provides the core entity types:
//! - [`EntityId`]: Stable handle for an entity owned by the [`World`](crate::world::World)
//! - [`EntityTag`]: Kind classification (player, enemy, decor, projectile)
//! - [`Capabilities`]: What an entity kind can do (render, tick, hold health)
//! - [`EntityInner`]: Type-safe storage for kind-specific components
//! - [`Entity`]: The complete entity container
//!
//! # Architecture
//!
//! Entity kinds form a closed sum type rather than a class hierarchy.
//! Shared behaviour is expressed through capability queries: every kind
//! renders and ticks; players and enemies additionally carry a
//! [`CharacterState`] with health.
//!
//! Entities never own each other. Links between them (targets, projectile
//! owners) are [`EntityId`] handles that may dangle once the referent is
//! pruned, and are resolved through the world on every use.
//!
//! # Example
//!
//! ```
//! use campus_quest_core::entity::{Entity, EntityId, EntityInner, EntityTag};
//! use campus_quest_core::entity::components::EnemyComponents;
//! use campus_quest_core::geometry::Point2D;
//!
//! let goblin = Entity::new(
//!     EntityId::new(1),
//!     "Goblin",
//!     Point2D::new(5.0, 0.0).unwrap(),
//!     EntityInner::Enemy(EnemyComponents::new(25, 6, None)),
//! );
//!
//! assert_eq!(goblin.tag(), EntityTag::Enemy);
//! assert!(goblin.is_live());
//! ```

pub mod components;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{
    CharacterState, DamageOutcome, DecorComponents, EnemyComponents, PlayerComponents,
    ProjectileComponents,
};

use crate::error::Result;
use crate::geometry::Point2D;

/// Stable handle to an entity.
///
/// `EntityId` is a newtype wrapper around `u64`. Handles are never reused
/// within a world, so a handle to a pruned entity simply resolves to
/// nothing.
///
/// # Example
///
/// ```
/// use campus_quest_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

bitflags! {
    /// Capability set of an entity kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capabilities: u8 {
        /// Can describe itself as a line of text.
        const RENDER = 1;
        /// Takes part in per-turn updates.
        const TICK = 1 << 1;
        /// Has health and an alive/dead status.
        const CHARACTER = 1 << 2;
    }
}

/// Entity kind tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// The hero controlled by the user or the scripted policy.
    Player,
    /// A hostile character driven by the pursuit AI.
    Enemy,
    /// Static scenery. Blocks movement, never acts.
    Decor,
    /// A one-shot ranged attack.
    Projectile,
}

impl EntityTag {
    /// Capabilities shared by every entity of this kind.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Player | Self::Enemy => Capabilities::RENDER
                .union(Capabilities::TICK)
                .union(Capabilities::CHARACTER),
            Self::Decor | Self::Projectile => Capabilities::RENDER.union(Capabilities::TICK),
        }
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Enemy => write!(f, "Enemy"),
            Self::Decor => write!(f, "Decor"),
            Self::Projectile => write!(f, "Projectile"),
        }
    }
}

/// Type-safe storage for kind-specific components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Player components (health, loadout, target)
    Player(PlayerComponents),
    /// Enemy components (health, target, melee stats)
    Enemy(EnemyComponents),
    /// Decor components (none)
    Decor(DecorComponents),
    /// Projectile components (damage, owner, target, resolution flag)
    Projectile(ProjectileComponents),
}

impl EntityInner {
    /// Returns the corresponding `EntityTag` for this inner storage.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Player(_) => EntityTag::Player,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Decor(_) => EntityTag::Decor,
            Self::Projectile(_) => EntityTag::Projectile,
        }
    }
}

impl From<PlayerComponents> for EntityInner {
    fn from(c: PlayerComponents) -> Self {
        Self::Player(c)
    }
}

impl From<EnemyComponents> for EntityInner {
    fn from(c: EnemyComponents) -> Self {
        Self::Enemy(c)
    }
}

impl From<DecorComponents> for EntityInner {
    fn from(c: DecorComponents) -> Self {
        Self::Decor(c)
    }
}

impl From<ProjectileComponents> for EntityInner {
    fn from(c: ProjectileComponents) -> Self {
        Self::Projectile(c)
    }
}

/// A complete entity: identity, name, position, and kind components.
///
/// # Invariants
///
/// - The `EntityId` is unique within a world
/// - The position is always finite (guaranteed by [`Point2D`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    name: String,
    position: Point2D,
    inner: EntityInner,
}

impl Entity {
    /// Creates a new entity.
    #[must_use]
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        position: Point2D,
        inner: impl Into<EntityInner>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            inner: inner.into(),
        }
    }

    /// Returns the entity's handle.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the entity's kind.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.inner.tag()
    }

    /// Returns the capability set of this entity's kind.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.tag().capabilities()
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Point2D {
        self.position
    }

    /// Replaces the position with an already validated point.
    pub fn set_position(&mut self, position: Point2D) {
        self.position = position;
    }

    /// Moves to raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`](crate::error::QuestError::InvalidArgument)
    /// if either coordinate is non-finite; the position is left unchanged.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.position = Point2D::new(x, y)?;
        Ok(())
    }

    /// Euclidean distance to another entity.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.position.distance(other.position)
    }

    /// Returns a reference to the inner component storage.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns a mutable reference to the inner component storage.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Health state, for character kinds.
    #[must_use]
    pub const fn character(&self) -> Option<&CharacterState> {
        match &self.inner {
            EntityInner::Player(p) => Some(&p.character),
            EntityInner::Enemy(e) => Some(&e.character),
            EntityInner::Decor(_) | EntityInner::Projectile(_) => None,
        }
    }

    /// Mutable health state, for character kinds.
    #[must_use]
    pub fn character_mut(&mut self) -> Option<&mut CharacterState> {
        match &mut self.inner {
            EntityInner::Player(p) => Some(&mut p.character),
            EntityInner::Enemy(e) => Some(&mut e.character),
            EntityInner::Decor(_) | EntityInner::Projectile(_) => None,
        }
    }

    /// Returns `true` if this is a character with health above zero.
    #[must_use]
    pub fn is_alive_character(&self) -> bool {
        self.character().is_some_and(CharacterState::is_alive)
    }

    /// Returns `true` if the entity still takes part in the world.
    ///
    /// Dead characters and resolved projectiles are not live; they linger
    /// only until the next cleanup.
    #[must_use]
    pub fn is_live(&self) -> bool {
        match &self.inner {
            EntityInner::Player(p) => p.character.is_alive(),
            EntityInner::Enemy(e) => e.character.is_alive(),
            EntityInner::Decor(_) => true,
            EntityInner::Projectile(p) => !p.is_expired(),
        }
    }

    /// Returns `true` if this entity is the player.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.inner, EntityInner::Player(_))
    }

    /// Returns `true` if this entity is an enemy.
    #[must_use]
    pub const fn is_enemy(&self) -> bool {
        matches!(self.inner, EntityInner::Enemy(_))
    }

    /// Returns `true` if this entity is decor.
    #[must_use]
    pub const fn is_decor(&self) -> bool {
        matches!(self.inner, EntityInner::Decor(_))
    }

    /// Returns `true` if this entity is a projectile.
    #[must_use]
    pub const fn is_projectile(&self) -> bool {
        matches!(self.inner, EntityInner::Projectile(_))
    }

    /// Returns the player components if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&PlayerComponents> {
        match &self.inner {
            EntityInner::Player(c) => Some(c),
            _ => None,
        }
    }

    /// Returns mutable player components if this is the player.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerComponents> {
        match &mut self.inner {
            EntityInner::Player(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the enemy components if this is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&EnemyComponents> {
        match &self.inner {
            EntityInner::Enemy(c) => Some(c),
            _ => None,
        }
    }

    /// Returns mutable enemy components if this is an enemy.
    #[must_use]
    pub fn as_enemy_mut(&mut self) -> Option<&mut EnemyComponents> {
        match &mut self.inner {
            EntityInner::Enemy(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the projectile components if this is a projectile.
    #[must_use]
    pub const fn as_projectile(&self) -> Option<&ProjectileComponents> {
        match &self.inner {
            EntityInner::Projectile(c) => Some(c),
            _ => None,
        }
    }

    /// Returns mutable projectile components if this is a projectile.
    #[must_use]
    pub fn as_projectile_mut(&mut self) -> Option<&mut ProjectileComponents> {
        match &mut self.inner {
            EntityInner::Projectile(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y).unwrap()
    }

    mod entity_id_tests {
        use super::*;

        #[test]
        fn ordering() {
            let mut ids = vec![EntityId::new(3), EntityId::new(1), EntityId::new(2)];
            ids.sort();
            assert_eq!(ids, vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)]);
        }

        #[test]
        fn debug_and_display_format() {
            let id = EntityId::new(42);
            assert_eq!(format!("{id:?}"), "EntityId(42)");
            assert_eq!(format!("{id}"), "42");
        }

        #[test]
        fn u64_conversions() {
            let id: EntityId = 7u64.into();
            let raw: u64 = id.into();
            assert_eq!(raw, 7);
        }
    }

    mod capability_tests {
        use super::*;

        #[test]
        fn characters_have_health_capability() {
            assert!(EntityTag::Player
                .capabilities()
                .contains(Capabilities::CHARACTER));
            assert!(EntityTag::Enemy
                .capabilities()
                .contains(Capabilities::CHARACTER));
        }

        #[test]
        fn decor_and_projectiles_do_not() {
            assert!(!EntityTag::Decor
                .capabilities()
                .contains(Capabilities::CHARACTER));
            assert!(!EntityTag::Projectile
                .capabilities()
                .contains(Capabilities::CHARACTER));
        }

        #[test]
        fn every_kind_renders_and_ticks() {
            for tag in [
                EntityTag::Player,
                EntityTag::Enemy,
                EntityTag::Decor,
                EntityTag::Projectile,
            ] {
                assert!(tag
                    .capabilities()
                    .contains(Capabilities::RENDER | Capabilities::TICK));
            }
        }
    }

    mod entity_tests {
        use super::*;

        #[test]
        fn tag_follows_inner() {
            let decor = Entity::new(EntityId::new(0), "Boulder", at(-2.0, 4.0), DecorComponents);
            assert_eq!(decor.tag(), EntityTag::Decor);
            assert!(decor.is_decor());
            assert!(decor.character().is_none());
        }

        #[test]
        fn move_to_rejects_non_finite_and_keeps_position() {
            let mut e = Entity::new(EntityId::new(0), "Hero", at(1.0, 1.0), PlayerComponents::new(80));
            assert!(e.move_to(f64::NAN, 0.0).is_err());
            assert_eq!(e.position(), at(1.0, 1.0));
            e.move_to(2.0, 3.0).unwrap();
            assert_eq!(e.position(), at(2.0, 3.0));
        }

        #[test]
        fn dead_character_is_not_live() {
            let mut e = Entity::new(
                EntityId::new(0),
                "Goblin",
                at(0.0, 0.0),
                EnemyComponents::new(5, 1, None),
            );
            assert!(e.is_live());
            e.character_mut().unwrap().set_health(0);
            assert!(!e.is_live());
            assert!(!e.is_alive_character());
        }

        #[test]
        fn resolved_projectile_is_not_live() {
            let mut e = Entity::new(
                EntityId::new(0),
                "Arrow",
                at(0.0, 0.0),
                ProjectileComponents::new(1, None, None),
            );
            assert!(e.is_live());
            e.as_projectile_mut().unwrap().has_hit = true;
            assert!(!e.is_live());
        }

        #[test]
        fn distance_between_entities() {
            let a = Entity::new(EntityId::new(0), "A", at(0.0, 0.0), DecorComponents);
            let b = Entity::new(EntityId::new(1), "B", at(0.0, 0.5), DecorComponents);
            assert!((a.distance(&b) - 0.5).abs() < 1e-12);
        }

        #[test]
        fn serialization_roundtrip() {
            let e = Entity::new(EntityId::new(3), "Hero", at(0.0, 0.0), PlayerComponents::new(80));
            let json = serde_json::to_string(&e).unwrap();
            let back: Entity = serde_json::from_str(&json).unwrap();
            assert_eq!(e, back);
        }
    }
}
