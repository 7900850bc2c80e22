//! End-to-end scenarios.
//!
//! These tests drive the world and the controller the way a game does:
//! - Player weapon turns (melee, arrows, cycling)
//! - Movement collision against scenery
//! - Enemy pursuit and attack
//! - Cleanup of dead characters and spent arrows
//! - Terminal states (victory, defeat, draw at the turn limit)

use crate::ai::{tick_enemy, EnemyAction};
use crate::combat::{fire_projectile, ProjectileOutcome};
use crate::game::{
    DecorSpec, EnemySpec, Game, GameConfig, GameState, Mode, NoInput, PlayerAction,
    PlayerOutcome, ScriptedInput,
};
use crate::player::{move_player, tick_player, AttackOutcome, Direction, MoveOutcome, PlayerTick};
use crate::weapon::WeaponKind;
use crate::world::World;

use super::helpers::{
    at, automated_game, current_weapon, duel_scenario, equip, health, set_target, spawn_decor,
    spawn_enemy, spawn_player,
};

// =============================================================================
// Player Turn Tests
// =============================================================================

#[test]
fn test_sword_turn_hits_adjacent_enemy_and_switches() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let goblin = spawn_enemy(&mut world, "Goblin", at(0.0, 0.5), 25, 6, Some(hero));
    set_target(&mut world, hero, Some(goblin));
    equip(&mut world, hero, WeaponKind::Sword);

    let tick = tick_player(&mut world, hero);

    assert_eq!(health(&world, goblin), Some(21));
    // The cycle wraps after the Sword.
    assert_eq!(current_weapon(&world, hero), WeaponKind::Bow);
    assert!(matches!(
        tick,
        PlayerTick::Acted {
            attack: AttackOutcome::Melee {
                weapon: WeaponKind::Sword,
                ..
            },
            switched_to: WeaponKind::Bow,
        }
    ));
}

#[test]
fn test_three_turns_visit_every_weapon_in_order() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let troll = spawn_enemy(&mut world, "Troll", at(8.0, 6.0), 40, 10, Some(hero));
    set_target(&mut world, hero, Some(troll));

    let mut used = Vec::new();
    for _ in 0..3 {
        used.push(current_weapon(&world, hero));
        tick_player(&mut world, hero);
    }
    used.push(current_weapon(&world, hero));

    assert_eq!(
        used,
        [
            WeaponKind::Bow,
            WeaponKind::Spear,
            WeaponKind::Sword,
            WeaponKind::Bow
        ]
    );
    // 1 + 2 + 4 damage regardless of the 10 unit distance.
    assert_eq!(health(&world, troll), Some(33));
}

#[test]
fn test_bow_hits_wear_enemy_down_then_cleanup_removes_it() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let goblin = spawn_enemy(&mut world, "Goblin", at(5.0, 0.0), 5, 6, Some(hero));

    let mut history = vec![health(&world, goblin).unwrap()];
    for _ in 0..5 {
        let (_, outcome) = fire_projectile(&mut world, at(0.0, 0.0), hero, goblin, 1);
        assert!(matches!(outcome, ProjectileOutcome::Hit { .. }));
        history.push(health(&world, goblin).unwrap());
        assert_eq!(world.remove_expired_projectiles(), 1);
        if world.is_alive(goblin) {
            assert_eq!(world.remove_dead(), 0);
        }
    }

    assert_eq!(history, [5, 4, 3, 2, 1, 0]);
    assert!(!world.is_alive(goblin));
    assert_eq!(world.remove_dead(), 1);
    assert!(world.get_by_id(goblin).is_none());
    assert_eq!(world.size(), 1);
}

#[test]
fn test_arrow_at_pruned_target_misses() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let goblin = spawn_enemy(&mut world, "Goblin", at(5.0, 0.0), 1, 6, Some(hero));
    world.character_mut(goblin).unwrap().set_health(0);
    world.remove_dead();

    let (_, outcome) = fire_projectile(&mut world, at(0.0, 0.0), hero, goblin, 1);

    assert_eq!(
        outcome,
        ProjectileOutcome::Missed {
            target: Some(goblin)
        }
    );
}

// =============================================================================
// Collision Tests
// =============================================================================

#[test]
fn test_decor_blocks_destination() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let tree = spawn_decor(&mut world, "Ancient Tree", at(0.0, 0.3));

    assert!(!world.can_move_to(hero, at(0.0, 0.3)));
    assert_eq!(world.blocking_object_at(hero, at(0.0, 0.3)).unwrap().id(), tree);
}

#[test]
fn test_interactive_move_into_decor_is_refused() {
    let mut scenario = duel_scenario(EnemySpec::new("Goblin", at(10.0, 0.0), 25, 6));
    scenario.decor.push(DecorSpec {
        name: "Boulder".to_owned(),
        position: at(0.0, 2.0),
    });
    let mut game = Game::new(GameConfig {
        mode: Mode::Interactive,
        scenario,
        ..GameConfig::default()
    });
    let hero = game.setup();

    let report = game
        .play_turn(&mut ScriptedInput::new([PlayerAction::Move {
            direction: Direction::Up,
            distance: 2.2,
        }]))
        .unwrap();

    assert!(matches!(
        report.player,
        PlayerOutcome::Moved(MoveOutcome::Blocked { ref name, .. }) if name == "Boulder"
    ));
    assert_eq!(game.world().get_by_id(hero).unwrap().position(), at(0.0, 0.0));
}

#[test]
fn test_dead_enemy_does_not_block_until_pruned() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let goblin = spawn_enemy(&mut world, "Goblin", at(3.0, 0.0), 25, 6, Some(hero));
    world.character_mut(goblin).unwrap().set_health(0);

    let outcome = move_player(&mut world, hero, Direction::Right, 3.0).unwrap();

    assert!(matches!(outcome, MoveOutcome::Moved { .. }));
}

// =============================================================================
// Enemy Tests
// =============================================================================

#[test]
fn test_enemy_closes_in_then_attacks() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let orc = spawn_enemy(&mut world, "Orc", at(3.0, 0.0), 35, 8, Some(hero));

    let actions: Vec<_> = (0..3).map(|_| tick_enemy(&mut world, orc).unwrap()).collect();

    assert!(matches!(actions[0], EnemyAction::Moved { .. }));
    assert!(matches!(actions[1], EnemyAction::Moved { .. }));
    assert!(matches!(actions[2], EnemyAction::Attacked { target, .. } if target == hero));
    assert_eq!(world.get_by_id(orc).unwrap().position(), at(1.0, 0.0));
    assert_eq!(health(&world, hero), Some(72));
}

#[test]
fn test_enemy_with_dead_target_waits() {
    let mut world = World::new();
    let hero = spawn_player(&mut world, at(0.0, 0.0));
    let orc = spawn_enemy(&mut world, "Orc", at(3.0, 0.0), 35, 8, Some(hero));
    world.character_mut(hero).unwrap().set_health(0);

    assert_eq!(tick_enemy(&mut world, orc).unwrap(), EnemyAction::NoTarget);
}

// =============================================================================
// Game Flow Tests
// =============================================================================

#[test]
fn test_victory_on_first_turn() {
    let mut game = automated_game(duel_scenario(EnemySpec::new(
        "Goblin",
        at(0.0, 0.5),
        1,
        6,
    )));

    let summary = game.run(&mut NoInput).unwrap();

    assert_eq!(summary.state, GameState::Victory);
    assert_eq!(summary.turns, 1);
    assert_eq!(summary.living_enemies, 0);
    assert_eq!(summary.player_health, 80);
}

#[test]
fn test_defeat_when_player_falls() {
    let mut game = automated_game(duel_scenario(EnemySpec::new(
        "Dragon",
        at(1.0, 0.0),
        1000,
        100,
    )));

    let summary = game.run(&mut NoInput).unwrap();

    assert_eq!(summary.state, GameState::Defeat);
    assert_eq!(summary.turns, 1);
    assert_eq!(summary.player_health, 0);
    assert_eq!(summary.stats.characters, 1);
}

#[test]
fn test_draw_exactly_at_turn_limit() {
    let mut game = automated_game(duel_scenario(EnemySpec::new(
        "Statue",
        at(0.0, 0.8),
        1_000_000,
        0,
    )));
    game.setup();

    for turn in 1..=49 {
        let report = game.play_turn(&mut NoInput).unwrap();
        assert_eq!(report.turn, turn);
        assert_eq!(report.state, GameState::Playing, "ended early at turn {turn}");
    }
    let last = game.play_turn(&mut NoInput).unwrap();

    assert_eq!(last.turn, 50);
    assert_eq!(last.state, GameState::Draw);
    assert!(game.play_turn(&mut NoInput).is_err());
    assert_eq!(game.summary().turns, 50);
}

#[test]
fn test_default_game_reaches_a_consistent_end() {
    let mut game = Game::new(GameConfig::default());
    let mut reports = Vec::new();

    let summary = game
        .run_with(&mut NoInput, |_, report| reports.push(report.clone()))
        .unwrap();

    assert!(summary.state.is_terminal());
    assert_eq!(reports.len(), summary.turns as usize);
    assert!(reports[..reports.len() - 1]
        .iter()
        .all(|r| r.state == GameState::Playing));
    match summary.state {
        GameState::Victory => assert_eq!(summary.living_enemies, 0),
        GameState::Defeat => assert_eq!(summary.player_health, 0),
        GameState::Draw => assert_eq!(summary.turns, 50),
        other => panic!("non-terminal end state {other}"),
    }
    // Arrows never survive a turn.
    assert!(game.world().iter().all(|e| !e.is_projectile()));
}

#[test]
fn test_turn_report_serializes_to_json() {
    let mut game = Game::new(GameConfig::default());
    game.setup();

    let report = game.play_turn(&mut NoInput).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["turn"], 1);
    assert_eq!(json["state"], "PLAYING");
    assert_eq!(json["enemies"].as_array().unwrap().len(), 3);
    assert_eq!(json["removed_projectiles"], 1);
}
