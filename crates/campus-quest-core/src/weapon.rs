//! Weapon strategies.
//!
//! A [`Weapon`] is a stateless attack behaviour with two descriptive stats,
//! range and power. Attacking reduces the target's health by `power`.
//!
//! Range is not checked at attack time. Damage lands regardless of the
//! actual distance between attacker and target; range is shown to the
//! player but has no rules effect.
//!
//! | Weapon | Range | Power |
//! |--------|-------|-------|
//! | Bow    | 4     | 1     |
//! | Spear  | 2     | 2     |
//! | Sword  | 1     | 4     |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::components::{CharacterState, DamageOutcome};
use crate::error::InvalidChoice;

/// An attack behaviour with descriptive range and power.
pub trait Weapon: fmt::Debug + Send + Sync {
    /// Which of the fixed weapon kinds this is.
    fn kind(&self) -> WeaponKind;

    /// Display name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Nominal reach. Informational only.
    fn range(&self) -> i32;

    /// Damage per attack.
    fn power(&self) -> i32;

    /// Strikes `target` for `power` damage.
    ///
    /// Dead targets are reported as [`DamageOutcome::AlreadyDead`] and left
    /// unchanged.
    fn attack(&self, target: &mut CharacterState) -> DamageOutcome {
        let outcome = target.take_damage(self.power());
        debug!(weapon = self.name(), ?outcome, "weapon attack");
        outcome
    }
}

/// Long reach, light damage. Fires projectiles when used by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bow;

/// Medium reach, medium damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spear;

/// Short reach, heavy damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sword;

impl Weapon for Bow {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Bow
    }
    fn range(&self) -> i32 {
        4
    }
    fn power(&self) -> i32 {
        1
    }
}

impl Weapon for Spear {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Spear
    }
    fn range(&self) -> i32 {
        2
    }
    fn power(&self) -> i32 {
        2
    }
}

impl Weapon for Sword {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Sword
    }
    fn range(&self) -> i32 {
        1
    }
    fn power(&self) -> i32 {
        4
    }
}

/// The three weapon kinds, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// See [`Bow`].
    Bow,
    /// See [`Spear`].
    Spear,
    /// See [`Sword`].
    Sword,
}

impl WeaponKind {
    /// All kinds in cycle order.
    pub const ALL: [Self; 3] = [Self::Bow, Self::Spear, Self::Sword];

    /// Next kind in the Bow, Spear, Sword cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Bow => Self::Spear,
            Self::Spear => Self::Sword,
            Self::Sword => Self::Bow,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bow => "Bow",
            Self::Spear => "Spear",
            Self::Sword => "Sword",
        }
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeaponKind {
    type Err = InvalidChoice;

    /// Parses a weapon name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidChoice::new(s))
    }
}

/// The player's three owned weapons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    bow: Bow,
    spear: Spear,
    sword: Sword,
}

impl Loadout {
    /// Returns the weapon of the given kind.
    #[must_use]
    pub fn get(&self, kind: WeaponKind) -> &dyn Weapon {
        match kind {
            WeaponKind::Bow => &self.bow,
            WeaponKind::Spear => &self.spear,
            WeaponKind::Sword => &self.sword,
        }
    }
}
