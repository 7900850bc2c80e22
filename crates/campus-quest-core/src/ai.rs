//! Enemy behaviour.
//!
//! Enemies have two implicit states, recomputed on every tick with nothing
//! persisted between turns:
//!
//! - **Attacking**: the target is within `attack_range`. The enemy deals
//!   `attack_damage` through the shared damage rule and does not move.
//! - **Seeking**: the target is further away. The enemy steps `move_speed`
//!   along the exact unit vector toward it.
//!
//! The step is tentative. [`tick_enemy`] moves unconditionally and reports
//! the old and new positions so the caller can validate the destination
//! against collision and revert it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::{apply_damage, StrikeOutcome};
use crate::entity::components::DamageOutcome;
use crate::entity::EntityId;
use crate::error::Result;
use crate::geometry::Point2D;
use crate::world::World;

/// Separations below this are treated as already arrived.
pub const ARRIVAL_EPSILON: f64 = 1e-4;

/// What an enemy did on its tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyAction {
    /// The enemy is dead or the handle is not an enemy.
    Inactive,
    /// The target is missing or dead. The caller should reassign it.
    NoTarget,
    /// The target was within reach and was struck.
    Attacked {
        /// Who was struck.
        target: EntityId,
        /// Health change on the target.
        outcome: DamageOutcome,
    },
    /// The enemy stepped toward its target.
    Moved {
        /// Position before the step.
        from: Point2D,
        /// Position after the step.
        to: Point2D,
    },
    /// The enemy sits on top of its target; no move was made.
    Arrived,
}

impl EnemyAction {
    /// Returns the tentative move, if one was made.
    #[must_use]
    pub const fn movement(&self) -> Option<(Point2D, Point2D)> {
        match *self {
            Self::Moved { from, to } => Some((from, to)),
            _ => None,
        }
    }
}

/// Runs one tick of the enemy behind `id`.
///
/// # Errors
///
/// Returns [`QuestError::InvalidArgument`](crate::error::QuestError) if the
/// step would produce a non-finite position (for example an unbounded
/// `move_speed`). The enemy is left where it was.
pub fn tick_enemy(world: &mut World, id: EntityId) -> Result<EnemyAction> {
    let Some(entity) = world.get_by_id(id) else {
        return Ok(EnemyAction::Inactive);
    };
    let Some(enemy) = entity.as_enemy() else {
        return Ok(EnemyAction::Inactive);
    };
    if !enemy.character.is_alive() {
        debug!(%id, "enemy is dead; no AI");
        return Ok(EnemyAction::Inactive);
    }

    let position = entity.position();
    let (attack_damage, attack_range, move_speed) =
        (enemy.attack_damage, enemy.attack_range, enemy.move_speed);

    let target_position = match enemy.target {
        Some(target) if world.is_alive(target) => world
            .get_by_id(target)
            .map(|t| (target, t.position())),
        _ => None,
    };
    let Some((target, target_position)) = target_position else {
        debug!(%id, "enemy has no valid target");
        return Ok(EnemyAction::NoTarget);
    };

    let distance = position.distance(target_position);
    if distance <= attack_range {
        return Ok(match apply_damage(world, target, attack_damage) {
            StrikeOutcome::Resolved(outcome) => {
                debug!(%id, %target, distance, ?outcome, "enemy attacks");
                EnemyAction::Attacked { target, outcome }
            }
            StrikeOutcome::NoTarget => EnemyAction::NoTarget,
        });
    }

    let delta = position.delta_to(target_position);
    let length = delta.length();
    if length < ARRIVAL_EPSILON {
        return Ok(EnemyAction::Arrived);
    }

    let to = position.offset(delta / length * move_speed)?;
    if let Some(entity) = world.get_mut_by_id(id) {
        entity.set_position(to);
    }
    debug!(%id, from = %position, %to, "enemy seeks target");
    Ok(EnemyAction::Moved { from: position, to })
}
