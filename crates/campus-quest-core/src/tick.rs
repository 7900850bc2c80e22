//! Per-kind tick dispatch.
//!
//! Every entity kind ticks, but each one needs something different from
//! the world: players fire arrows into it, enemies read their target's
//! position, projectiles resolve against their target. Ticks therefore run
//! as functions over the [`World`] and a handle rather than as methods on
//! the entity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::{tick_enemy, EnemyAction};
use crate::combat::{tick_projectile, ProjectileOutcome};
use crate::entity::{Capabilities, EntityId, EntityTag};
use crate::error::Result;
use crate::player::{tick_player, PlayerTick};
use crate::world::World;

/// What happened when one entity was ticked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Player turn.
    Player(PlayerTick),
    /// Enemy AI step.
    Enemy(EnemyAction),
    /// Decor does nothing.
    Decor,
    /// Projectile resolution.
    Projectile(ProjectileOutcome),
}

impl World {
    /// Ticks the entity behind `id` once.
    ///
    /// Returns `Ok(None)` if the handle does not resolve or the entity does
    /// not tick.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors from an enemy step.
    pub fn tick_entity(&mut self, id: EntityId) -> Result<Option<TickOutcome>> {
        let Some(tag) = self.get_by_id(id).map(|e| e.tag()) else {
            return Ok(None);
        };
        if !tag.capabilities().contains(Capabilities::TICK) {
            return Ok(None);
        }
        let outcome = match tag {
            EntityTag::Player => TickOutcome::Player(tick_player(self, id)),
            EntityTag::Enemy => TickOutcome::Enemy(tick_enemy(self, id)?),
            EntityTag::Decor => TickOutcome::Decor,
            EntityTag::Projectile => match tick_projectile(self, id) {
                Some(outcome) => TickOutcome::Projectile(outcome),
                None => return Ok(None),
            },
        };
        debug!(%id, kind = %tag, ?outcome, "ticked");
        Ok(Some(outcome))
    }

    /// Ticks every entity once, in insertion order.
    ///
    /// Entities spawned during the pass (arrows) are not ticked by it.
    /// Entities are not pruned; call [`World::remove_dead`] and
    /// [`World::remove_expired_projectiles`] afterwards.
    ///
    /// # Errors
    ///
    /// Stops at the first failing tick.
    pub fn tick_all(&mut self) -> Result<Vec<(EntityId, TickOutcome)>> {
        let ids: Vec<EntityId> = self.ids().collect();
        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(outcome) = self.tick_entity(id)? {
                outcomes.push((id, outcome));
            }
        }
        Ok(outcomes)
    }
}
