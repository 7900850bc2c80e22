//! Plain-text rendering of entities.
//!
//! Each kind renders to a single line:
//!
//! ```text
//! [PLAYER 'Hero'] Pos:(0.00, 0.00) HP: 80/80 Weapon: Bow (R:4, P:1)
//! [ENEMY 'Goblin'] Pos:(5.00, 0.00) HP: 25/25 Dmg:6 HOSTILE
//! [DECOR 'Boulder'] Pos:(-2.00, 4.00)
//! [PROJECTILE 'Arrow'] Pos:(0.00, 0.00) Dmg:1 Status: HIT
//! ```
//!
//! Colour and layout beyond this are the console's business.

use crate::entity::{Capabilities, Entity, EntityInner};
use crate::world::World;

/// Something that can describe itself as one line of text.
pub trait Renderable {
    /// Renders a one-line description.
    fn render(&self) -> String;
}

impl Renderable for Entity {
    fn render(&self) -> String {
        let pos = self.position();
        match self.inner() {
            EntityInner::Player(p) => {
                let weapon = p.current_weapon();
                format!(
                    "[PLAYER '{}'] Pos:{pos} HP: {}/{} Weapon: {} (R:{}, P:{})",
                    self.name(),
                    p.character.health(),
                    p.character.max_health(),
                    weapon.name(),
                    weapon.range(),
                    weapon.power(),
                )
            }
            EntityInner::Enemy(e) => format!(
                "[ENEMY '{}'] Pos:{pos} HP: {}/{} Dmg:{} {}",
                self.name(),
                e.character.health(),
                e.character.max_health(),
                e.attack_damage,
                if e.character.is_alive() {
                    "HOSTILE"
                } else {
                    "DEFEATED"
                },
            ),
            EntityInner::Decor(_) => format!("[DECOR '{}'] Pos:{pos}", self.name()),
            EntityInner::Projectile(p) => format!(
                "[PROJECTILE '{}'] Pos:{pos} Dmg:{} Status: {}",
                self.name(),
                p.damage,
                if p.has_hit { "HIT" } else { "FLYING" },
            ),
        }
    }
}

impl World {
    /// Renders every renderable entity, one line each, in insertion order.
    #[must_use]
    pub fn render_all(&self) -> Vec<String> {
        self.iter()
            .filter(|e| e.capabilities().contains(Capabilities::RENDER))
            .map(Renderable::render)
            .collect()
    }
}
