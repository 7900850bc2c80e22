//! Builders for test worlds and scenarios.

use crate::entity::components::{DecorComponents, EnemyComponents, PlayerComponents};
use crate::entity::EntityId;
use crate::game::{EnemySpec, Game, GameConfig, Mode, PlayerSpec, Scenario};
use crate::geometry::Point2D;
use crate::weapon::WeaponKind;
use crate::world::World;

/// Shorthand for a point known to be finite.
pub fn at(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y).expect("test coordinates are finite")
}

/// Spawns the default 80 HP hero.
pub fn spawn_player(world: &mut World, position: Point2D) -> EntityId {
    world.create("Hero", position, PlayerComponents::new(80))
}

/// Spawns an enemy hunting `target`.
pub fn spawn_enemy(
    world: &mut World,
    name: &str,
    position: Point2D,
    health: i32,
    damage: i32,
    target: Option<EntityId>,
) -> EntityId {
    world.create(name, position, EnemyComponents::new(health, damage, target))
}

/// Spawns a piece of scenery.
pub fn spawn_decor(world: &mut World, name: &str, position: Point2D) -> EntityId {
    world.create(name, position, DecorComponents)
}

/// Points the player at `target`.
pub fn set_target(world: &mut World, player: EntityId, target: Option<EntityId>) {
    world
        .get_mut_by_id(player)
        .and_then(|e| e.as_player_mut())
        .expect("handle is a player")
        .target = target;
}

/// Puts a specific weapon in the player's hand.
pub fn equip(world: &mut World, player: EntityId, kind: WeaponKind) {
    world
        .get_mut_by_id(player)
        .and_then(|e| e.as_player_mut())
        .expect("handle is a player")
        .equip_kind(kind);
}

/// Weapon currently in the player's hand.
pub fn current_weapon(world: &World, player: EntityId) -> WeaponKind {
    world
        .get_by_id(player)
        .and_then(|e| e.as_player())
        .expect("handle is a player")
        .current_kind()
}

/// Health behind a handle, `None` once pruned.
pub fn health(world: &World, id: EntityId) -> Option<i32> {
    world.character(id).map(|c| c.health())
}

/// A hero at the origin facing a single enemy.
pub fn duel_scenario(enemy: EnemySpec) -> Scenario {
    Scenario {
        player: PlayerSpec {
            name: "Hero".to_owned(),
            position: Point2D::ORIGIN,
            health: 80,
        },
        enemies: vec![enemy],
        decor: Vec::new(),
    }
}

/// An automated game over `scenario`.
pub fn automated_game(scenario: Scenario) -> Game {
    Game::new(GameConfig {
        mode: Mode::Automated,
        scenario,
        ..GameConfig::default()
    })
}
