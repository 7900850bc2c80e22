//! Player actions.
//!
//! The automated player turn is [`tick_player`]: attack the current target
//! with the weapon in hand, then advance to the next weapon in the fixed
//! Bow, Spear, Sword cycle. The attack always comes first and the switch
//! always happens, hit or not.
//!
//! The Bow does not strike directly. It spawns an arrow through the world
//! and resolves it on the spot (see [`crate::combat`]).
//!
//! Interactive play uses the pieces separately: [`attack`] strikes without
//! cycling, and [`move_player`] performs a collision-checked step.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::{fire_projectile, strike, ProjectileOutcome, StrikeOutcome};
use crate::entity::components::DamageOutcome;
use crate::entity::EntityId;
use crate::error::{InvalidChoice, Result};
use crate::geometry::Point2D;
use crate::weapon::WeaponKind;
use crate::world::World;

/// Result of one attack attempt by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// The player has no target.
    NoTarget,
    /// The target is gone or already dead.
    TargetDown {
        /// The stale target handle.
        target: EntityId,
    },
    /// The weapon in hand struck directly.
    Melee {
        /// Weapon used.
        weapon: WeaponKind,
        /// Who was struck.
        target: EntityId,
        /// Health change on the target.
        damage: DamageOutcome,
    },
    /// An arrow was fired and resolved.
    Ranged {
        /// Who was aimed at.
        target: EntityId,
        /// The arrow, marked as hit until cleanup.
        projectile: EntityId,
        /// How the arrow resolved.
        outcome: ProjectileOutcome,
    },
}

impl AttackOutcome {
    /// Returns `true` if this attack took its target from alive to dead.
    #[must_use]
    pub const fn defeated(&self) -> bool {
        match self {
            Self::Melee { damage, .. }
            | Self::Ranged {
                outcome: ProjectileOutcome::Hit { damage, .. },
                ..
            } => damage.defeated(),
            _ => false,
        }
    }
}

/// Result of an automated player tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerTick {
    /// The player is dead or the handle is not a player.
    Inactive,
    /// The player attacked (or tried to) and switched weapons.
    Acted {
        /// The attack attempt.
        attack: AttackOutcome,
        /// Weapon now in hand.
        switched_to: WeaponKind,
    },
}

/// A movement direction on the keyboard layout used by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `w`: +y
    Up,
    /// `a`: -x
    Left,
    /// `s`: -y
    Down,
    /// `d`: +x
    Right,
}

impl Direction {
    /// Unit vector for this direction.
    #[must_use]
    pub const fn unit(self) -> DVec2 {
        match self {
            Self::Up => DVec2::new(0.0, 1.0),
            Self::Left => DVec2::new(-1.0, 0.0),
            Self::Down => DVec2::new(0.0, -1.0),
            Self::Right => DVec2::new(1.0, 0.0),
        }
    }

    /// Key used to select this direction.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Up => 'w',
            Self::Left => 'a',
            Self::Down => 's',
            Self::Right => 'd',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Left => "left",
            Self::Down => "down",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" => Ok(Self::Up),
            "a" => Ok(Self::Left),
            "s" => Ok(Self::Down),
            "d" => Ok(Self::Right),
            _ => Err(InvalidChoice::new(s)),
        }
    }
}

/// Result of a movement attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player is dead or the handle is not a player.
    Inactive,
    /// The move was committed.
    Moved {
        /// Position before.
        from: Point2D,
        /// Position after.
        to: Point2D,
    },
    /// The distance was zero, negative or NaN; nothing changed.
    InvalidDistance {
        /// The rejected distance.
        distance: f64,
    },
    /// Something occupies the destination; nothing changed.
    Blocked {
        /// The first blocker in registry order.
        by: EntityId,
        /// Its name, for narration.
        name: String,
    },
}

/// Attacks the player's current target with the weapon in hand.
///
/// Does not cycle weapons. Returns `None` if the handle is not a living
/// player.
pub fn attack(world: &mut World, player: EntityId) -> Option<AttackOutcome> {
    let entity = world.get_by_id(player)?;
    let position = entity.position();
    let components = entity.as_player()?;
    if !components.character.is_alive() {
        return None;
    }
    let loadout = components.loadout;
    let kind = components.current_kind();

    let Some(target) = components.target else {
        return Some(AttackOutcome::NoTarget);
    };
    if !world.is_alive(target) {
        return Some(AttackOutcome::TargetDown { target });
    }

    let outcome = if kind == WeaponKind::Bow {
        let (projectile, outcome) =
            fire_projectile(world, position, player, target, loadout.get(kind).power());
        AttackOutcome::Ranged {
            target,
            projectile,
            outcome,
        }
    } else {
        match strike(world, loadout.get(kind), target) {
            StrikeOutcome::Resolved(damage) => AttackOutcome::Melee {
                weapon: kind,
                target,
                damage,
            },
            StrikeOutcome::NoTarget => AttackOutcome::TargetDown { target },
        }
    };
    debug!(%player, ?outcome, "player attacks");
    Some(outcome)
}

/// Runs the automated player turn: attack, then switch weapon.
pub fn tick_player(world: &mut World, player: EntityId) -> PlayerTick {
    let Some(attack) = attack(world, player) else {
        return PlayerTick::Inactive;
    };
    let Some(components) = world
        .get_mut_by_id(player)
        .and_then(|e| e.as_player_mut())
    else {
        return PlayerTick::Inactive;
    };
    let switched_to = components.cycle_weapon();
    debug!(%player, weapon = %switched_to, "player switches weapon");
    PlayerTick::Acted {
        attack,
        switched_to,
    }
}

/// Moves the player `distance` units in `direction` if the destination is
/// free.
///
/// Only positive distances move; anything else is reported as
/// [`MoveOutcome::InvalidDistance`].
///
/// # Errors
///
/// Returns [`QuestError::InvalidArgument`](crate::error::QuestError) if the
/// destination is not finite.
pub fn move_player(
    world: &mut World,
    player: EntityId,
    direction: Direction,
    distance: f64,
) -> Result<MoveOutcome> {
    let Some(entity) = world.get_by_id(player) else {
        return Ok(MoveOutcome::Inactive);
    };
    if !entity.is_player() || !entity.is_alive_character() {
        return Ok(MoveOutcome::Inactive);
    }
    if distance.is_nan() || distance <= 0.0 {
        debug!(%player, distance, "player move rejected");
        return Ok(MoveOutcome::InvalidDistance { distance });
    }
    let from = entity.position();
    let to = from.offset(direction.unit() * distance)?;

    if let Some(blocker) = world.blocking_object_at(player, to) {
        debug!(%player, %to, blocker = blocker.name(), "player move blocked");
        return Ok(MoveOutcome::Blocked {
            by: blocker.id(),
            name: blocker.name().to_owned(),
        });
    }
    if let Some(entity) = world.get_mut_by_id(player) {
        entity.set_position(to);
    }
    debug!(%player, %from, %to, "player moves");
    Ok(MoveOutcome::Moved { from, to })
}
