//! World registry: the sole owner of every entity.
//!
//! The World provides:
//! - Entity storage in insertion order (the order every phase iterates in)
//! - Handle allocation and handle resolution
//! - Pruning of dead characters and resolved projectiles
//! - Proximity queries for movement collision
//!
//! # Ownership
//!
//! Entities never hold each other. Everything outside the World keeps only
//! [`EntityId`] handles, and every handle must be resolved again on use:
//! once [`World::remove_dead`] or [`World::remove_expired_projectiles`]
//! drops an entity, handles to it resolve to `None`. Handles are never
//! reused.
//!
//! # Example
//!
//! ```
//! use campus_quest_core::world::World;
//! use campus_quest_core::entity::components::{DecorComponents, PlayerComponents};
//! use campus_quest_core::geometry::Point2D;
//!
//! let mut world = World::new();
//! let hero = world.create("Hero", Point2D::ORIGIN, PlayerComponents::new(80));
//! world.create("Boulder", Point2D::new(0.0, 0.3).unwrap(), DecorComponents);
//!
//! let target = Point2D::new(0.0, 0.3).unwrap();
//! assert!(!world.can_move_to(hero, target));
//! assert_eq!(world.blocking_object_at(hero, target).unwrap().name(), "Boulder");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entity::{Capabilities, CharacterState, Entity, EntityId, EntityInner};
use crate::error::{QuestError, Result};
use crate::geometry::Point2D;

/// Minimum allowed distance between a mover's destination and any other
/// live entity.
pub const COLLISION_RADIUS: f64 = 0.5;

/// Population counts reported at the end of a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    /// Every stored entity.
    pub total: usize,
    /// Entities with health.
    pub characters: usize,
    /// Characters with health above zero.
    pub alive: usize,
    /// Characters at zero health awaiting cleanup.
    pub dead: usize,
    /// Decor, projectiles, and anything else without health.
    pub others: usize,
}

/// Wire form of a world; handles are checked on the way back in.
#[derive(Deserialize)]
struct RawWorld {
    next_id: u64,
    entities: Vec<Entity>,
}

/// Registry of all simulation entities.
///
/// # Determinism
///
/// Entities are kept in a `Vec` in insertion order, and every iteration,
/// lookup, and query walks that order. Handles are assigned monotonically.
///
/// Deserializing rejects duplicate handles and moves the allocator past
/// the highest stored handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawWorld")]
pub struct World {
    /// Monotonically increasing handle counter.
    next_id: u64,
    /// Entity storage in insertion order.
    entities: Vec<Entity>,
}

impl TryFrom<RawWorld> for World {
    type Error = QuestError;

    fn try_from(raw: RawWorld) -> Result<Self> {
        let mut seen = HashSet::with_capacity(raw.entities.len());
        let mut next_id = raw.next_id;
        for entity in &raw.entities {
            let id = entity.id();
            if !seen.insert(id) {
                return Err(QuestError::DuplicateHandle(id));
            }
            let after = id
                .as_u64()
                .checked_add(1)
                .ok_or(QuestError::HandleExhausted(id))?;
            next_id = next_id.max(after);
        }
        Ok(Self {
            next_id,
            entities: raw.entities,
        })
    }
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entities: Vec::new(),
        }
    }

    /// Allocates a fresh handle for an entity built outside the world.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Transfers ownership of a pre-built entity into the world.
    ///
    /// Rejected, with a warning and no state change, when the entity has a
    /// blank name, its handle is already in use, or its handle is the last
    /// representable one.
    ///
    /// Returns `true` if the entity was stored.
    pub fn add(&mut self, entity: Entity) -> bool {
        if entity.name().trim().is_empty() {
            warn!(id = %entity.id(), "refusing to add entity with blank name");
            return false;
        }
        if self.index_of(entity.id()).is_some() {
            warn!(id = %entity.id(), name = entity.name(), "refusing to add entity with duplicate handle");
            return false;
        }
        let Some(after) = entity.id().as_u64().checked_add(1) else {
            warn!(id = %entity.id(), name = entity.name(), "refusing to add entity with exhausted handle");
            return false;
        };
        self.next_id = self.next_id.max(after);
        info!(id = %entity.id(), name = entity.name(), kind = %entity.tag(), "adding entity");
        self.entities.push(entity);
        true
    }

    /// Constructs an entity in place and returns its handle.
    ///
    /// The world keeps ownership; the handle is for immediate use and for
    /// later re-resolution.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        position: Point2D,
        inner: impl Into<EntityInner>,
    ) -> EntityId {
        let id = self.allocate_id();
        let entity = Entity::new(id, name, position, inner);
        debug!(id = %id, name = entity.name(), kind = %entity.tag(), %position, "creating entity");
        self.entities.push(entity);
        id
    }

    /// Number of stored entities.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the world holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drops every entity. Handle allocation continues from where it was.
    pub fn clear(&mut self) {
        info!(count = self.entities.len(), "clearing world");
        self.entities.clear();
    }

    /// Returns the entity at `index` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::OutOfRange`] when `index >= size()`.
    pub fn get(&self, index: usize) -> Result<&Entity> {
        let len = self.entities.len();
        self.entities
            .get(index)
            .ok_or(QuestError::OutOfRange { index, len })
    }

    /// Mutable variant of [`World::get`].
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::OutOfRange`] when `index >= size()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Entity> {
        let len = self.entities.len();
        self.entities
            .get_mut(index)
            .ok_or(QuestError::OutOfRange { index, len })
    }

    /// Resolves a handle.
    #[must_use]
    pub fn get_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Resolves a handle mutably.
    #[must_use]
    pub fn get_mut_by_id(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Position of a handle in insertion order.
    #[must_use]
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    /// Handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(Entity::id)
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    /// Mutable entities in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.iter_mut()
    }

    /// Resolves a handle to a character's health state.
    ///
    /// Returns `None` if the entity is gone or has no health.
    #[must_use]
    pub fn character(&self, id: EntityId) -> Option<&CharacterState> {
        self.get_by_id(id).and_then(Entity::character)
    }

    /// Mutable variant of [`World::character`].
    #[must_use]
    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut CharacterState> {
        self.get_mut_by_id(id).and_then(Entity::character_mut)
    }

    /// Returns `true` if the handle resolves to a living character.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.character(id).is_some_and(CharacterState::is_alive)
    }

    /// Removes every character whose health is zero.
    ///
    /// Entities without the [`Capabilities::CHARACTER`] capability are never
    /// matched. Returns the number removed.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| {
            let dead = e.capabilities().contains(Capabilities::CHARACTER)
                && !e.is_alive_character();
            if dead {
                info!(id = %e.id(), name = e.name(), "removing dead entity");
            }
            !dead
        });
        before - self.entities.len()
    }

    /// Removes every projectile that has resolved. Returns the number removed.
    pub fn remove_expired_projectiles(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| {
            let expired = e.as_projectile().is_some_and(|p| p.is_expired());
            if expired {
                debug!(id = %e.id(), name = e.name(), "removing expired projectile");
            }
            !expired
        });
        before - self.entities.len()
    }

    /// First entity with the given name, in insertion order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name() == name)
    }

    /// Distance between two entities, if both handles resolve.
    #[must_use]
    pub fn distance_between(&self, a: EntityId, b: EntityId) -> Option<f64> {
        let a = self.get_by_id(a)?;
        let b = self.get_by_id(b)?;
        Some(a.distance(b))
    }

    /// Returns `true` if `mover` may occupy `destination`.
    ///
    /// Blocked exactly when some other live entity lies strictly within
    /// [`COLLISION_RADIUS`] of the destination. The mover never blocks
    /// itself.
    #[must_use]
    pub fn can_move_to(&self, mover: EntityId, destination: Point2D) -> bool {
        self.blocking_object_at(mover, destination).is_none()
    }

    /// First live entity, other than `mover`, within [`COLLISION_RADIUS`]
    /// of `destination`.
    #[must_use]
    pub fn blocking_object_at(&self, mover: EntityId, destination: Point2D) -> Option<&Entity> {
        self.entities.iter().find(|other| {
            other.id() != mover
                && other.is_live()
                && other.position().distance(destination) < COLLISION_RADIUS
        })
    }

    /// Handles of every enemy, living or not, in insertion order.
    pub fn enemy_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(|e| e.is_enemy())
            .map(Entity::id)
    }

    /// Number of enemies still alive.
    #[must_use]
    pub fn living_enemies(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.is_enemy() && e.is_alive_character())
            .count()
    }

    /// First living enemy in insertion order.
    #[must_use]
    pub fn first_living_enemy(&self) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.is_enemy() && e.is_alive_character())
            .map(Entity::id)
    }

    /// Population counts.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        let mut stats = WorldStats {
            total: self.entities.len(),
            ..WorldStats::default()
        };
        for entity in &self.entities {
            match entity.character() {
                Some(c) => {
                    stats.characters += 1;
                    if c.is_alive() {
                        stats.alive += 1;
                    } else {
                        stats.dead += 1;
                    }
                }
                None => stats.others += 1,
            }
        }
        stats
    }
}

// =============================================================================
// Tests
// =============================================================================
