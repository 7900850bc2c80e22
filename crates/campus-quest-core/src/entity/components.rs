//! Component structs for each entity kind.
//!
//! The component structs hold all kind-specific state. Cross-entity links
//! (targets, projectile owners) are stored as [`EntityId`] handles and must
//! be resolved through the [`World`](crate::world::World) on every use; the
//! referent may have been pruned since the handle was taken.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::weapon::{Loadout, Weapon, WeaponKind};

/// Default melee reach of an enemy.
pub const DEFAULT_ATTACK_RANGE: f64 = 1.0;

/// Default distance an enemy covers per turn.
pub const DEFAULT_MOVE_SPEED: f64 = 1.0;

// =============================================================================
// Character
// =============================================================================

/// Result of applying damage to a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// The target was already dead; nothing changed.
    AlreadyDead,
    /// Damage was applied.
    Hit {
        /// Damage requested.
        amount: i32,
        /// Health before the hit.
        before: i32,
        /// Health after the hit (never negative).
        after: i32,
    },
}

impl DamageOutcome {
    /// Returns `true` if this hit took the target from alive to dead.
    #[must_use]
    pub const fn defeated(&self) -> bool {
        matches!(self, Self::Hit { before, after, .. } if *before > 0 && *after == 0)
    }

    /// Returns `true` if health actually changed hands.
    #[must_use]
    pub const fn landed(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Health state shared by every character kind.
///
/// # Invariants
///
/// - `0 <= health <= max_health`
/// - alive exactly when `health > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    health: i32,
    max_health: i32,
}

impl CharacterState {
    /// Creates a character at full health. Negative input is clamped to 0.
    #[must_use]
    pub fn new(health: i32) -> Self {
        let health = health.max(0);
        Self {
            health,
            max_health: health,
        }
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Health at construction time.
    #[must_use]
    pub const fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Returns `true` while health is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Sets health, clamping into `[0, max_health]`.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Reduces health by `amount`.
    ///
    /// Dead targets are left untouched and report [`DamageOutcome::AlreadyDead`].
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::AlreadyDead;
        }
        let before = self.health;
        self.set_health(before.saturating_sub(amount));
        DamageOutcome::Hit {
            amount,
            before,
            after: self.health,
        }
    }
}

// =============================================================================
// Entity kinds
// =============================================================================

/// Components for the player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerComponents {
    /// Health state.
    pub character: CharacterState,
    /// The three owned weapons.
    pub loadout: Loadout,
    /// Which weapon of the loadout is in hand.
    current: WeaponKind,
    /// Handle to the character being attacked, if any.
    pub target: Option<EntityId>,
}

impl PlayerComponents {
    /// Creates a player with the full loadout, holding the Bow, no target.
    #[must_use]
    pub fn new(health: i32) -> Self {
        Self {
            character: CharacterState::new(health),
            loadout: Loadout::default(),
            current: WeaponKind::Bow,
            target: None,
        }
    }

    /// Kind of the weapon in hand.
    #[must_use]
    pub const fn current_kind(&self) -> WeaponKind {
        self.current
    }

    /// The weapon in hand.
    #[must_use]
    pub fn current_weapon(&self) -> &dyn Weapon {
        self.loadout.get(self.current)
    }

    /// Advances to the next weapon in the fixed Bow, Spear, Sword cycle.
    pub fn cycle_weapon(&mut self) -> WeaponKind {
        self.current = self.current.next();
        self.current
    }

    /// Equips a weapon by kind.
    pub fn equip_kind(&mut self, kind: WeaponKind) {
        self.current = kind;
    }

    /// Equips a weapon by name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChoice`](crate::error::InvalidChoice) for unknown
    /// names, leaving the current weapon unchanged.
    pub fn equip(&mut self, name: &str) -> Result<WeaponKind, crate::error::InvalidChoice> {
        let kind: WeaponKind = name.parse()?;
        self.current = kind;
        Ok(kind)
    }
}

/// Components for a hostile character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyComponents {
    /// Health state.
    pub character: CharacterState,
    /// Handle to the character being hunted, if any.
    pub target: Option<EntityId>,
    /// Damage dealt per melee attack.
    pub attack_damage: i32,
    /// Reach of the melee attack.
    pub attack_range: f64,
    /// Distance covered per turn while seeking.
    pub move_speed: f64,
}

impl EnemyComponents {
    /// Creates an enemy with default reach and speed.
    #[must_use]
    pub fn new(health: i32, attack_damage: i32, target: Option<EntityId>) -> Self {
        Self {
            character: CharacterState::new(health),
            target,
            attack_damage,
            attack_range: DEFAULT_ATTACK_RANGE,
            move_speed: DEFAULT_MOVE_SPEED,
        }
    }
}

/// Components for static scenery. Decor carries no state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorComponents;

/// Components for an instant-hit projectile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileComponents {
    /// Damage applied on hit.
    pub damage: i32,
    /// Handle to whoever fired it.
    pub owner: Option<EntityId>,
    /// Handle to the intended victim.
    pub target: Option<EntityId>,
    /// Set after the first tick, hit or miss.
    pub has_hit: bool,
}

impl ProjectileComponents {
    /// Creates an unresolved projectile.
    #[must_use]
    pub const fn new(damage: i32, owner: Option<EntityId>, target: Option<EntityId>) -> Self {
        Self {
            damage,
            owner,
            target,
            has_hit: false,
        }
    }

    /// A projectile expires as soon as it has resolved.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.has_hit
    }
}
