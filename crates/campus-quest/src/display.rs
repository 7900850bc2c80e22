//! Text narration of the game.
//!
//! Everything here writes plain text to a `Write`. Nothing reads input.

use std::collections::HashMap;
use std::io::{self, Write};

use campus_quest_core::ai::EnemyAction;
use campus_quest_core::combat::ProjectileOutcome;
use campus_quest_core::entity::components::DamageOutcome;
use campus_quest_core::game::{GameSummary, PlayerOutcome, PlayerSnapshot};
use campus_quest_core::player::{AttackOutcome, MoveOutcome, PlayerTick};
use campus_quest_core::{EntityId, Game, GameConfig, GameState, Mode, TurnReport, WeaponKind, World};

const RULE: &str = "==================================================";

/// Opening banner.
pub fn intro(out: &mut impl Write, config: &GameConfig) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "  CAMPUS QUEST: ARENA BATTLE")?;
    writeln!(
        out,
        "  {}",
        match config.mode {
            Mode::Interactive => "PLAYER CONTROLLED MODE",
            Mode::Automated => "AUTOMATED MODE",
        }
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Objective: defeat all enemies before you fall!")?;
    writeln!(out, "Victory:   all enemies defeated")?;
    writeln!(out, "Defeat:    player health reaches 0")?;
    writeln!(out, "Turn limit: {} turns", config.max_turns)
}

/// Roster after setup.
pub fn setup(out: &mut impl Write, world: &World, interactive: bool) -> io::Result<()> {
    writeln!(out, "\n[SETUP] World initialized with {} objects", world.size())?;
    for line in world.render_all() {
        writeln!(out, "  {line}")?;
    }
    if interactive {
        writeln!(out, "\nTIP: choose [6] during the game for help!")?;
    }
    Ok(())
}

/// Player and target summary shown before each decision.
pub fn dashboard(out: &mut impl Write, s: &PlayerSnapshot) -> io::Result<()> {
    writeln!(out, "\n--- TURN {} / {} ---", s.turn, s.max_turns)?;
    writeln!(
        out,
        "{} at {}  HP {}/{}  Weapon: {} (R:{}, P:{})",
        s.name, s.position, s.health, s.max_health, s.weapon, s.weapon_range, s.weapon_power
    )?;
    match &s.target {
        Some(t) => writeln!(
            out,
            "Target: {}  HP {}/{}  Distance {:.2}",
            t.name, t.health, t.max_health, t.distance
        )?,
        None => writeln!(out, "Target: none")?,
    }
    writeln!(out, "Enemies remaining: {}", s.living_enemies)
}

/// The numbered action menu.
pub fn action_menu(out: &mut impl Write, s: &PlayerSnapshot) -> io::Result<()> {
    let target = s.target.as_ref().map_or("No target", |t| t.name.as_str());
    writeln!(out, "\nCHOOSE YOUR ACTION")?;
    writeln!(out, "  [1] Move (WASD)")?;
    writeln!(out, "  [2] Attack ({target})")?;
    writeln!(out, "  [3] Change Weapon ({})", s.weapon)?;
    writeln!(out, "  [4] View Status")?;
    writeln!(out, "  [5] Pass Turn")?;
    writeln!(out, "  [6] Help")?;
    write!(out, "Your choice: ")
}

/// Rules summary.
pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nHELP")?;
    writeln!(out, "GOAL: Defeat all enemies!")?;
    writeln!(out, "\nACTIONS:")?;
    writeln!(out, "  Move:   change position (WASD + distance)")?;
    writeln!(out, "  Attack: deal damage with the current weapon")?;
    writeln!(out, "  Weapon: switch between Bow/Spear/Sword")?;
    writeln!(out, "\nWEAPONS:")?;
    writeln!(out, "  Bow:   long range (4), low power (1)")?;
    writeln!(out, "  Spear: medium range (2), medium power (2)")?;
    writeln!(out, "  Sword: melee (1), high power (4)")?;
    writeln!(out, "\nENEMIES:")?;
    writeln!(out, "  Enemies move 1 unit per turn towards you")?;
    writeln!(out, "  and attack when within range 1")
}

/// Names every entity it has seen, so reports can be narrated after
/// cleanup has removed the dead.
#[derive(Debug, Default)]
pub struct Narrator {
    names: HashMap<EntityId, String>,
}

impl Narrator {
    /// Remembers the names of everything currently in `world`.
    pub fn remember(&mut self, world: &World) {
        for entity in world.iter() {
            self.names
                .entry(entity.id())
                .or_insert_with(|| entity.name().to_owned());
        }
    }

    fn name(&self, id: EntityId) -> &str {
        self.names.get(&id).map_or("unknown", String::as_str)
    }

    /// Narrates one turn, then lists the surviving objects.
    pub fn turn(&mut self, out: &mut impl Write, game: &Game, report: &TurnReport) -> io::Result<()> {
        self.remember(game.world());
        writeln!(out, "\n{RULE}")?;
        writeln!(out, "TURN {} / {}", report.turn, game.config().max_turns)?;
        writeln!(out, "{RULE}")?;

        writeln!(out, "[PLAYER PHASE]")?;
        self.player(out, &report.player)?;
        if let Some(target) = report.retargeted {
            writeln!(out, "  Current target defeated. New target: {}", self.name(target))?;
        }

        writeln!(out, "[ENEMY PHASE]")?;
        for enemy in &report.enemies {
            self.enemy(out, &enemy.name, &enemy.action)?;
            if let Some(blocker) = &enemy.blocked_by {
                writeln!(out, "    {} blocked by {blocker}", enemy.name)?;
            }
        }

        writeln!(out, "[CLEANUP PHASE]")?;
        if report.removed_dead > 0 {
            writeln!(out, "  Removed {} dead object(s)", report.removed_dead)?;
        }
        if report.removed_projectiles > 0 {
            writeln!(out, "  Removed {} expired projectile(s)", report.removed_projectiles)?;
        }
        if report.removed_dead == 0 && report.removed_projectiles == 0 {
            writeln!(out, "  No objects to remove")?;
        }

        writeln!(out, "\nALL OBJECTS")?;
        for line in game.world().render_all() {
            writeln!(out, "  {line}")?;
        }
        Ok(())
    }

    fn player(&self, out: &mut impl Write, outcome: &PlayerOutcome) -> io::Result<()> {
        match outcome {
            PlayerOutcome::Inactive | PlayerOutcome::Auto(PlayerTick::Inactive) => {
                writeln!(out, "  The hero cannot act.")
            }
            PlayerOutcome::Auto(PlayerTick::Acted {
                attack,
                switched_to,
            }) => {
                self.attack(out, attack)?;
                writeln!(out, "  Switched to {switched_to}")
            }
            PlayerOutcome::Attacked(attack) => self.attack(out, attack),
            PlayerOutcome::Moved(MoveOutcome::Moved { from, to }) => {
                writeln!(out, "  Moved from {from} to {to}")
            }
            PlayerOutcome::Moved(MoveOutcome::Blocked { name, .. }) => {
                writeln!(out, "  COLLISION! Movement blocked by {name}")
            }
            PlayerOutcome::Moved(MoveOutcome::InvalidDistance { distance }) => {
                writeln!(out, "  Cannot move {distance} units; distance must be positive")
            }
            PlayerOutcome::Moved(MoveOutcome::Inactive) => writeln!(out, "  The hero cannot move."),
            PlayerOutcome::WeaponChanged { from, to } => {
                writeln!(out, "  Swapped {from} for {to}")
            }
            PlayerOutcome::Status(snapshot) => {
                writeln!(out, "  PLAYER STATUS")?;
                dashboard(out, snapshot)
            }
            PlayerOutcome::Passed => writeln!(out, "  Turn passed."),
        }
    }

    fn attack(&self, out: &mut impl Write, attack: &AttackOutcome) -> io::Result<()> {
        match *attack {
            AttackOutcome::NoTarget => writeln!(out, "  No target selected!"),
            AttackOutcome::TargetDown { target } => {
                writeln!(out, "  {} is already dead!", self.name(target))
            }
            AttackOutcome::Melee {
                weapon,
                target,
                damage,
            } => {
                write!(out, "  Attacking {} with {weapon}: ", self.name(target))?;
                damage_line(out, damage)
            }
            AttackOutcome::Ranged {
                target,
                outcome: ProjectileOutcome::Hit { damage, .. },
                ..
            } => {
                write!(out, "  Firing {} at {}: ", WeaponKind::Bow, self.name(target))?;
                damage_line(out, damage)
            }
            AttackOutcome::Ranged { target, .. } => {
                writeln!(out, "  Arrow missed {}", self.name(target))
            }
        }
    }

    fn enemy(&self, out: &mut impl Write, name: &str, action: &EnemyAction) -> io::Result<()> {
        match *action {
            EnemyAction::Inactive => Ok(()),
            EnemyAction::NoTarget => writeln!(out, "  {name} has no valid target"),
            EnemyAction::Attacked { target, outcome } => {
                write!(out, "  {name} attacks {}: ", self.name(target))?;
                damage_line(out, outcome)
            }
            EnemyAction::Moved { to, .. } => writeln!(out, "  {name} moves to {to}"),
            EnemyAction::Arrived => writeln!(out, "  {name} holds position"),
        }
    }
}

fn damage_line(out: &mut impl Write, damage: DamageOutcome) -> io::Result<()> {
    match damage {
        DamageOutcome::AlreadyDead => writeln!(out, "already dead"),
        DamageOutcome::Hit { amount, after, .. } if damage.defeated() => {
            writeln!(out, "{amount} damage, DEFEATED (HP {after})")
        }
        DamageOutcome::Hit { amount, after, .. } => writeln!(out, "{amount} damage (HP {after})"),
    }
}

/// Final banner and statistics.
pub fn result(out: &mut impl Write, summary: &GameSummary) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    let headline = match summary.state {
        GameState::Victory => "VICTORY! All enemies have been defeated!",
        GameState::Defeat => "DEFEAT. The hero has fallen...",
        GameState::Draw => "DRAW. Turn limit reached, no winner",
        GameState::Setup | GameState::Playing => "Game interrupted",
    };
    writeln!(out, "  {headline}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Turns played:    {}", summary.turns)?;
    writeln!(out, "Player health:   {}", summary.player_health)?;
    writeln!(out, "Enemies alive:   {}", summary.living_enemies)?;
    writeln!(
        out,
        "Objects:         {} ({} characters, {} alive, {} other)",
        summary.stats.total, summary.stats.characters, summary.stats.alive, summary.stats.others
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_quest_core::{GameConfig, NoInput};

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn narrates_first_automated_turn() {
        let mut game = Game::new(GameConfig::default());
        game.setup();
        let mut narrator = Narrator::default();
        narrator.remember(game.world());

        let report = game.play_turn(&mut NoInput).unwrap();
        let mut out = Vec::new();
        narrator.turn(&mut out, &game, &report).unwrap();

        let out = text(out);
        assert!(out.contains("TURN 1 / 50"));
        assert!(out.contains("Firing Bow at Goblin: 1 damage (HP 24)"));
        assert!(out.contains("Switched to Spear"));
        assert!(out.contains("Goblin moves to (4.00, 0.00)"));
        assert!(out.contains("Removed 1 expired projectile(s)"));
    }

    #[test]
    fn result_banner_names_outcome() {
        let mut game = Game::new(GameConfig::default());
        let summary = game.run(&mut NoInput).unwrap();
        let mut out = Vec::new();
        result(&mut out, &summary).unwrap();
        assert!(text(out).contains(&format!("Turns played:    {}", summary.turns)));
    }

    #[test]
    fn menu_shows_target_and_weapon() {
        let mut game = Game::new(GameConfig::default());
        game.setup();
        let snapshot = game.player_snapshot().unwrap();
        let mut out = Vec::new();
        action_menu(&mut out, &snapshot).unwrap();
        let out = text(out);
        assert!(out.contains("[2] Attack (Goblin)"));
        assert!(out.contains("[3] Change Weapon (Bow)"));
    }
}
