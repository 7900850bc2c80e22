//! Game controller with the turn state machine.
//!
//! The `Game` struct owns the [`World`] for its whole lifetime and drives it
//! through a fixed sequence of phases each turn:
//!
//! 1. **PLAYER**: the scripted policy ([`tick_player`]) in automated mode,
//!    or one [`PlayerAction`] from an [`ActionSource`] in interactive mode
//! 2. **RETARGET**: if the player's target is missing or dead, the first
//!    living enemy in registry order becomes the new target
//! 3. **ENEMY**: every enemy ticks in registry order; in automated mode a
//!    tentative move into an occupied spot is reverted
//! 4. **CLEANUP**: [`World::remove_dead`] then
//!    [`World::remove_expired_projectiles`]
//! 5. **TRANSITION**: DEFEAT if the player is gone, VICTORY if no enemy
//!    lives, DRAW once the turn counter reaches the limit while still
//!    PLAYING
//!
//! # States
//!
//! ```text
//! SETUP -> PLAYING -> { VICTORY | DEFEAT | DRAW }
//! ```
//!
//! Terminal states are final; [`Game::play_turn`] refuses to run in them.
//!
//! # Example
//!
//! ```
//! use campus_quest_core::game::{Game, GameConfig, GameState, Mode, NoInput};
//!
//! let mut game = Game::new(GameConfig {
//!     mode: Mode::Automated,
//!     ..GameConfig::default()
//! });
//! let summary = game.run(&mut NoInput).unwrap();
//!
//! assert!(summary.state.is_terminal());
//! assert!(summary.turns <= 50);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::{tick_enemy, EnemyAction};
use crate::entity::components::{
    DecorComponents, EnemyComponents, PlayerComponents, DEFAULT_ATTACK_RANGE, DEFAULT_MOVE_SPEED,
};
use crate::entity::EntityId;
use crate::error::{InvalidChoice, QuestError, Result};
use crate::geometry::Point2D;
use crate::player::{attack, move_player, tick_player, AttackOutcome, Direction, MoveOutcome, PlayerTick};
use crate::weapon::WeaponKind;
use crate::world::{World, WorldStats};

/// Turn limit used when none is configured.
pub const DEFAULT_MAX_TURNS: u32 = 50;

// =============================================================================
// State
// =============================================================================

/// Phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// The world is not yet populated.
    Setup,
    /// Turns are being played.
    Playing,
    /// Every enemy is dead.
    Victory,
    /// The player is dead.
    Defeat,
    /// The turn limit was reached with both sides standing.
    Draw,
}

impl GameState {
    /// Returns `true` for VICTORY, DEFEAT and DRAW.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Draw)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "SETUP",
            Self::Playing => "PLAYING",
            Self::Victory => "VICTORY",
            Self::Defeat => "DEFEAT",
            Self::Draw => "DRAW",
        };
        f.write_str(name)
    }
}

/// Who chooses the player's actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// An [`ActionSource`] picks one action per turn.
    Interactive,
    /// The player attacks and cycles weapons every turn.
    #[default]
    Automated,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "interactive"),
            Self::Automated => write!(f, "automated"),
        }
    }
}

impl FromStr for Mode {
    type Err = InvalidChoice;

    /// Accepts the mode names and the menu numbers `1` and `2`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "i" | "interactive" => Ok(Self::Interactive),
            "2" | "a" | "auto" | "automated" => Ok(Self::Automated),
            _ => Err(InvalidChoice::new(s)),
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Starting state of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Display name.
    pub name: String,
    /// Spawn point.
    pub position: Point2D,
    /// Starting and maximum health.
    pub health: i32,
}

/// Starting state of one enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    /// Display name.
    pub name: String,
    /// Spawn point.
    pub position: Point2D,
    /// Starting and maximum health.
    pub health: i32,
    /// Damage per melee attack.
    pub attack_damage: i32,
    /// Melee reach.
    #[serde(default = "default_attack_range")]
    pub attack_range: f64,
    /// Step length while seeking.
    #[serde(default = "default_move_speed")]
    pub move_speed: f64,
}

const fn default_attack_range() -> f64 {
    DEFAULT_ATTACK_RANGE
}

const fn default_move_speed() -> f64 {
    DEFAULT_MOVE_SPEED
}

impl EnemySpec {
    /// An enemy with default reach and speed.
    pub fn new(name: impl Into<String>, position: Point2D, health: i32, attack_damage: i32) -> Self {
        Self {
            name: name.into(),
            position,
            health,
            attack_damage,
            attack_range: DEFAULT_ATTACK_RANGE,
            move_speed: DEFAULT_MOVE_SPEED,
        }
    }
}

/// A piece of scenery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorSpec {
    /// Display name.
    pub name: String,
    /// Where it stands.
    pub position: Point2D,
}

/// The roster placed in the world during setup.
///
/// The player's first target is the first enemy listed; every enemy hunts
/// the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// The hero.
    pub player: PlayerSpec,
    /// Enemies, in the order they act.
    pub enemies: Vec<EnemySpec>,
    /// Scenery.
    #[serde(default)]
    pub decor: Vec<DecorSpec>,
}

fn point(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y).unwrap_or(Point2D::ORIGIN)
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            player: PlayerSpec {
                name: "Hero".to_owned(),
                position: Point2D::ORIGIN,
                health: 80,
            },
            enemies: vec![
                EnemySpec::new("Goblin", point(5.0, 0.0), 25, 6),
                EnemySpec::new("Orc", point(10.0, 0.0), 35, 8),
                EnemySpec::new("Troll", point(8.0, 6.0), 40, 10),
            ],
            decor: vec![
                DecorSpec {
                    name: "Ancient Tree".to_owned(),
                    position: point(3.0, 3.0),
                },
                DecorSpec {
                    name: "Boulder".to_owned(),
                    position: point(-2.0, 4.0),
                },
                DecorSpec {
                    name: "Ruins".to_owned(),
                    position: point(7.0, -3.0),
                },
            ],
        }
    }
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Who drives the player.
    pub mode: Mode,
    /// Turn at which a game still in progress ends in a draw.
    pub max_turns: u32,
    /// Setup roster.
    pub scenario: Scenario,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            max_turns: DEFAULT_MAX_TURNS,
            scenario: Scenario::default(),
        }
    }
}

// =============================================================================
// Player input
// =============================================================================

/// One interactive player choice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Step `distance` units in `direction`, if the destination is free.
    Move {
        /// Which way.
        direction: Direction,
        /// How far. Must be positive and finite.
        distance: f64,
    },
    /// Attack the current target with the weapon in hand.
    Attack,
    /// Equip a specific weapon.
    ChangeWeapon(WeaponKind),
    /// Inspect the player and target.
    Status,
    /// Do nothing this turn.
    Pass,
    /// Show help and choose again.
    Help,
}

impl PlayerAction {
    /// Returns `false` only for actions after which the player picks again.
    #[must_use]
    pub const fn consumes_turn(&self) -> bool {
        !matches!(self, Self::Help)
    }
}

/// The player's target as seen at decision time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    /// Handle of the target.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Distance from the player.
    pub distance: f64,
}

/// What the player knows when choosing an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Current turn number.
    pub turn: u32,
    /// Turn limit.
    pub max_turns: u32,
    /// Player name.
    pub name: String,
    /// Player position.
    pub position: Point2D,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Weapon in hand.
    pub weapon: WeaponKind,
    /// Its nominal range.
    pub weapon_range: i32,
    /// Its power.
    pub weapon_power: i32,
    /// Current target, if it still lives.
    pub target: Option<TargetSnapshot>,
    /// Enemies still standing.
    pub living_enemies: usize,
}

/// Supplies player actions in interactive mode.
pub trait ActionSource {
    /// Chooses the next action.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Input`] when no more input can be obtained.
    fn choose_action(&mut self, snapshot: &PlayerSnapshot) -> Result<PlayerAction>;

    /// Presents help after [`PlayerAction::Help`].
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Input`] if the help cannot be shown.
    fn show_help(&mut self) -> Result<()> {
        Ok(())
    }

    /// Waits for the user to continue after setup and between turns.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Input`] when no more input can be obtained.
    fn acknowledge(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Source for automated games. Passes if ever asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl ActionSource for NoInput {
    fn choose_action(&mut self, _snapshot: &PlayerSnapshot) -> Result<PlayerAction> {
        Ok(PlayerAction::Pass)
    }
}

/// Replays a fixed list of actions, then passes forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    actions: VecDeque<PlayerAction>,
    helps_shown: usize,
    acknowledgements: usize,
}

impl ScriptedInput {
    /// Creates a script from actions in play order.
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Actions not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }

    /// How many times help was requested.
    #[must_use]
    pub const fn helps_shown(&self) -> usize {
        self.helps_shown
    }

    /// How many acknowledgements were requested.
    #[must_use]
    pub const fn acknowledgements(&self) -> usize {
        self.acknowledgements
    }
}

impl ActionSource for ScriptedInput {
    fn choose_action(&mut self, _snapshot: &PlayerSnapshot) -> Result<PlayerAction> {
        Ok(self.actions.pop_front().unwrap_or(PlayerAction::Pass))
    }

    fn show_help(&mut self) -> Result<()> {
        self.helps_shown += 1;
        Ok(())
    }

    fn acknowledge(&mut self) -> Result<()> {
        self.acknowledgements += 1;
        Ok(())
    }
}

// =============================================================================
// Reports
// =============================================================================

/// What the player did in the player phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerOutcome {
    /// The player could not act.
    Inactive,
    /// Automated turn: attack then weapon switch.
    Auto(PlayerTick),
    /// Movement attempt.
    Moved(MoveOutcome),
    /// Explicit attack, without weapon switch.
    Attacked(AttackOutcome),
    /// Explicit weapon change.
    WeaponChanged {
        /// Weapon before.
        from: WeaponKind,
        /// Weapon after.
        to: WeaponKind,
    },
    /// Status inspection.
    Status(PlayerSnapshot),
    /// Turn passed.
    Passed,
}

/// One enemy's part of the enemy phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyReport {
    /// The enemy.
    pub id: EntityId,
    /// Its name.
    pub name: String,
    /// What its AI did.
    pub action: EnemyAction,
    /// Name of whatever blocked a tentative move, which was then reverted.
    pub blocked_by: Option<String>,
}

/// Everything that happened in one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Player phase.
    pub player: PlayerOutcome,
    /// New target chosen after the player phase.
    pub retargeted: Option<EntityId>,
    /// Enemy phase, in registry order.
    pub enemies: Vec<EnemyReport>,
    /// Dead characters removed in cleanup.
    pub removed_dead: usize,
    /// Resolved projectiles removed in cleanup.
    pub removed_projectiles: usize,
    /// State after the transition check.
    pub state: GameState,
}

/// Final statistics of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Final state.
    pub state: GameState,
    /// Turns played.
    pub turns: u32,
    /// Player health at the end (0 once removed).
    pub player_health: i32,
    /// Enemies still alive.
    pub living_enemies: usize,
    /// Registry population.
    pub stats: WorldStats,
}

// =============================================================================
// Game
// =============================================================================

/// The game controller.
///
/// Owns the [`World`]; nothing else holds entities across turns.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    world: World,
    state: GameState,
    turn: u32,
    player: Option<EntityId>,
}

impl Game {
    /// Creates a game in the SETUP state with an empty world.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        info!(mode = %config.mode, max_turns = config.max_turns, "game created");
        Self {
            config,
            world: World::new(),
            state: GameState::Setup,
            turn: 0,
            player: None,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for scenario tweaks and tests.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Turns played so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Handle of the player, once set up.
    #[must_use]
    pub const fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// Populates the world from the scenario and enters PLAYING.
    ///
    /// Any previous world contents are dropped and the turn counter is
    /// reset.
    pub fn setup(&mut self) -> EntityId {
        self.world.clear();
        self.turn = 0;
        let scenario = &self.config.scenario;

        let player = self.world.create(
            scenario.player.name.clone(),
            scenario.player.position,
            PlayerComponents::new(scenario.player.health),
        );

        let mut first_enemy = None;
        for spec in &scenario.enemies {
            let mut enemy = EnemyComponents::new(spec.health, spec.attack_damage, Some(player));
            enemy.attack_range = spec.attack_range;
            enemy.move_speed = spec.move_speed;
            let id = self.world.create(spec.name.clone(), spec.position, enemy);
            first_enemy.get_or_insert(id);
        }

        for spec in &scenario.decor {
            self.world
                .create(spec.name.clone(), spec.position, DecorComponents);
        }

        if let Some(p) = self
            .world
            .get_mut_by_id(player)
            .and_then(|e| e.as_player_mut())
        {
            p.target = first_enemy;
        }

        self.player = Some(player);
        self.state = GameState::Playing;
        info!(
            entities = self.world.size(),
            enemies = scenario.enemies.len(),
            "world initialized"
        );
        player
    }

    /// What the player currently sees.
    ///
    /// Returns `None` once the player has been removed.
    #[must_use]
    pub fn player_snapshot(&self) -> Option<PlayerSnapshot> {
        let entity = self.world.get_by_id(self.player?)?;
        let player = entity.as_player()?;
        let weapon = player.current_weapon();

        let target = player
            .target
            .filter(|&t| self.world.is_alive(t))
            .and_then(|t| self.world.get_by_id(t))
            .and_then(|t| {
                let character = t.character()?;
                Some(TargetSnapshot {
                    id: t.id(),
                    name: t.name().to_owned(),
                    health: character.health(),
                    max_health: character.max_health(),
                    distance: entity.distance(t),
                })
            });

        Some(PlayerSnapshot {
            turn: self.turn,
            max_turns: self.config.max_turns,
            name: entity.name().to_owned(),
            position: entity.position(),
            health: player.character.health(),
            max_health: player.character.max_health(),
            weapon: player.current_kind(),
            weapon_range: weapon.range(),
            weapon_power: weapon.power(),
            target,
            living_enemies: self.world.living_enemies(),
        })
    }

    /// Plays one full turn.
    ///
    /// # Errors
    ///
    /// - [`QuestError::NotPlaying`] outside the PLAYING state
    /// - [`QuestError::Input`] if the action source fails
    /// - [`QuestError::InvalidArgument`] if a move leaves the finite plane
    pub fn play_turn(&mut self, input: &mut dyn ActionSource) -> Result<TurnReport> {
        if self.state != GameState::Playing {
            return Err(QuestError::NotPlaying(self.state));
        }
        self.turn += 1;
        debug!(turn = self.turn, "turn started");

        let player = self.player_phase(input)?;
        let retargeted = self.retarget();
        let enemies = self.enemy_phase()?;

        let removed_dead = self.world.remove_dead();
        let removed_projectiles = self.world.remove_expired_projectiles();
        if removed_dead > 0 || removed_projectiles > 0 {
            info!(removed_dead, removed_projectiles, "cleanup");
        }

        self.transition();

        Ok(TurnReport {
            turn: self.turn,
            player,
            retargeted,
            enemies,
            removed_dead,
            removed_projectiles,
            state: self.state,
        })
    }

    /// Plays until a terminal state and returns the summary.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Game::play_turn`] or the action source.
    pub fn run(&mut self, input: &mut dyn ActionSource) -> Result<GameSummary> {
        self.run_with(input, |_, _| {})
    }

    /// Like [`Game::run`], calling `on_turn` after every turn.
    ///
    /// Sets the world up first if still in SETUP. In interactive mode the
    /// source is asked to acknowledge after setup and after every turn that
    /// does not end the game.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Game::play_turn`] or the action source.
    pub fn run_with(
        &mut self,
        input: &mut dyn ActionSource,
        mut on_turn: impl FnMut(&Self, &TurnReport),
    ) -> Result<GameSummary> {
        if self.state == GameState::Setup {
            self.setup();
            if self.config.mode == Mode::Interactive {
                input.acknowledge()?;
            }
        }
        while self.state == GameState::Playing {
            let report = self.play_turn(input)?;
            on_turn(&*self, &report);
            if self.config.mode == Mode::Interactive && self.state == GameState::Playing {
                input.acknowledge()?;
            }
        }
        Ok(self.summary())
    }

    /// Final (or current) statistics.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            state: self.state,
            turns: self.turn,
            player_health: self
                .player
                .and_then(|p| self.world.character(p))
                .map_or(0, |c| c.health()),
            living_enemies: self.world.living_enemies(),
            stats: self.world.stats(),
        }
    }

    fn player_alive(&self) -> bool {
        self.player.is_some_and(|p| self.world.is_alive(p))
    }

    fn player_phase(&mut self, input: &mut dyn ActionSource) -> Result<PlayerOutcome> {
        let Some(player) = self.player.filter(|_| self.player_alive()) else {
            return Ok(PlayerOutcome::Inactive);
        };
        if self.config.mode == Mode::Automated {
            return Ok(PlayerOutcome::Auto(tick_player(&mut self.world, player)));
        }

        loop {
            let Some(snapshot) = self.player_snapshot() else {
                return Ok(PlayerOutcome::Inactive);
            };
            let action = input.choose_action(&snapshot)?;
            debug!(turn = self.turn, ?action, "player action");
            if !action.consumes_turn() {
                input.show_help()?;
                continue;
            }
            return self.apply(player, action, snapshot);
        }
    }

    fn apply(
        &mut self,
        player: EntityId,
        action: PlayerAction,
        snapshot: PlayerSnapshot,
    ) -> Result<PlayerOutcome> {
        Ok(match action {
            PlayerAction::Move {
                direction,
                distance,
            } => PlayerOutcome::Moved(move_player(&mut self.world, player, direction, distance)?),
            PlayerAction::Attack => attack(&mut self.world, player)
                .map_or(PlayerOutcome::Inactive, PlayerOutcome::Attacked),
            PlayerAction::ChangeWeapon(to) => {
                match self
                    .world
                    .get_mut_by_id(player)
                    .and_then(|e| e.as_player_mut())
                {
                    Some(p) => {
                        let from = p.current_kind();
                        p.equip_kind(to);
                        PlayerOutcome::WeaponChanged { from, to }
                    }
                    None => PlayerOutcome::Inactive,
                }
            }
            PlayerAction::Status => PlayerOutcome::Status(snapshot),
            PlayerAction::Pass | PlayerAction::Help => PlayerOutcome::Passed,
        })
    }

    fn retarget(&mut self) -> Option<EntityId> {
        let player = self.player.filter(|_| self.player_alive())?;
        let current = self.world.get_by_id(player)?.as_player()?.target;
        if current.is_some_and(|t| self.world.is_alive(t)) {
            return None;
        }
        let next = self.world.first_living_enemy()?;
        if let Some(p) = self
            .world
            .get_mut_by_id(player)
            .and_then(|e| e.as_player_mut())
        {
            p.target = Some(next);
        }
        info!(target = %next, "player acquires new target");
        Some(next)
    }

    fn enemy_phase(&mut self) -> Result<Vec<EnemyReport>> {
        let ids: Vec<EntityId> = self.world.enemy_ids().collect();
        let validate = self.config.mode == Mode::Automated;
        let mut reports = Vec::with_capacity(ids.len());

        for id in ids {
            let action = tick_enemy(&mut self.world, id)?;
            let mut blocked_by = None;
            if let Some((from, to)) = action.movement().filter(|_| validate) {
                if let Some(blocker) = self.world.blocking_object_at(id, to) {
                    blocked_by = Some(blocker.name().to_owned());
                    if let Some(enemy) = self.world.get_mut_by_id(id) {
                        enemy.set_position(from);
                    }
                    debug!(%id, %to, "enemy move reverted");
                }
            }
            let name = self
                .world
                .get_by_id(id)
                .map(|e| e.name().to_owned())
                .unwrap_or_default();
            reports.push(EnemyReport {
                id,
                name,
                action,
                blocked_by,
            });
        }
        Ok(reports)
    }

    fn transition(&mut self) {
        let next = if !self.player_alive() {
            GameState::Defeat
        } else if self.world.living_enemies() == 0 {
            GameState::Victory
        } else if self.turn >= self.config.max_turns {
            GameState::Draw
        } else {
            GameState::Playing
        };
        if next != self.state {
            info!(from = %self.state, to = %next, turn = self.turn, "state transition");
        }
        self.state = next;
    }
}
