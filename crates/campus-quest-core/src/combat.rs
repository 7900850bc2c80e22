//! Combat resolution: damage application and instant-hit projectiles.
//!
//! Every source of harm funnels through the same rule: a living target
//! loses `amount` health, floored at zero; a dead or missing target is left
//! alone and the attempt is reported.
//!
//! # Projectiles
//!
//! Projectiles do not fly. A projectile resolves completely on its first
//! tick: if its target still resolves to a living character the damage is
//! applied, otherwise it misses. Either way it is marked as hit and is
//! pruned at the next cleanup. No distance or range check is applied to
//! the shot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::components::{DamageOutcome, ProjectileComponents};
use crate::entity::EntityId;
use crate::geometry::Point2D;
use crate::weapon::Weapon;
use crate::world::World;

/// Name given to projectiles fired from the bow.
pub const ARROW_NAME: &str = "Arrow";

/// Result of ticking a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOutcome {
    /// The projectile had already resolved; nothing happened.
    AlreadyResolved,
    /// The target was missing or already dead.
    Missed {
        /// The intended target, if the projectile had one.
        target: Option<EntityId>,
    },
    /// Damage was applied to the target.
    Hit {
        /// The target that was struck.
        target: EntityId,
        /// Health change on the target.
        damage: DamageOutcome,
    },
}

/// Result of a strike against a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeOutcome {
    /// The handle no longer resolves to a character.
    NoTarget,
    /// The target was resolved and the damage rule applied.
    Resolved(DamageOutcome),
}

/// Applies `amount` damage to the character behind `target`.
pub fn apply_damage(world: &mut World, target: EntityId, amount: i32) -> StrikeOutcome {
    match world.character_mut(target) {
        Some(character) => {
            let outcome = character.take_damage(amount);
            debug!(%target, amount, ?outcome, "damage applied");
            StrikeOutcome::Resolved(outcome)
        }
        None => StrikeOutcome::NoTarget,
    }
}

/// Strikes the character behind `target` with `weapon`.
pub fn strike(world: &mut World, weapon: &dyn Weapon, target: EntityId) -> StrikeOutcome {
    match world.character_mut(target) {
        Some(character) => StrikeOutcome::Resolved(weapon.attack(character)),
        None => StrikeOutcome::NoTarget,
    }
}

/// Ticks a projectile.
///
/// Returns `None` if `projectile` does not resolve to a projectile.
/// Idempotent after the first call.
pub fn tick_projectile(world: &mut World, projectile: EntityId) -> Option<ProjectileOutcome> {
    let state = world.get_by_id(projectile)?.as_projectile()?.clone();
    if state.has_hit {
        return Some(ProjectileOutcome::AlreadyResolved);
    }

    let outcome = match state.target {
        Some(target) if world.is_alive(target) => match apply_damage(world, target, state.damage) {
            StrikeOutcome::Resolved(damage) => ProjectileOutcome::Hit { target, damage },
            StrikeOutcome::NoTarget => ProjectileOutcome::Missed {
                target: Some(target),
            },
        },
        target => ProjectileOutcome::Missed { target },
    };

    if let Some(p) = world
        .get_mut_by_id(projectile)
        .and_then(|e| e.as_projectile_mut())
    {
        p.has_hit = true;
    }
    debug!(%projectile, ?outcome, "projectile resolved");
    Some(outcome)
}

/// Spawns an arrow at `origin` and resolves it immediately.
///
/// The arrow stays in the world, marked as hit, until the next cleanup.
pub fn fire_projectile(
    world: &mut World,
    origin: Point2D,
    owner: EntityId,
    target: EntityId,
    damage: i32,
) -> (EntityId, ProjectileOutcome) {
    let id = world.create(
        ARROW_NAME,
        origin,
        ProjectileComponents::new(damage, Some(owner), Some(target)),
    );
    let outcome = tick_projectile(world, id).unwrap_or(ProjectileOutcome::AlreadyResolved);
    (id, outcome)
}
