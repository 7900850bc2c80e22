//! Campus Quest console front end.

mod cli;
mod console;
mod display;
mod telemetry;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use campus_quest_core::{ActionSource, Game, GameConfig, Mode};
use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::console::ConsoleInput;
use crate::display::Narrator;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match telemetry::init(cli.log_level.as_deref()).and_then(|()| run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut console = ConsoleInput::new(io::stdin().lock(), io::stdout());
    let mode = match cli.mode {
        Some(arg) => Mode::from(arg),
        None => console.choose_mode().context("reading game mode")?,
    };
    let config = GameConfig {
        mode,
        max_turns: cli.max_turns,
        ..GameConfig::default()
    };
    info!(?mode, max_turns = config.max_turns, "starting game");

    let mut out = io::stdout();
    display::intro(&mut out, &config)?;

    let mut game = Game::new(config);
    game.setup();
    let interactive = mode == Mode::Interactive;
    display::setup(&mut out, game.world(), interactive)?;
    out.flush()?;
    if interactive {
        console.acknowledge()?;
    }

    let mut narrator = Narrator::default();
    narrator.remember(game.world());

    let mut narration_error = None;
    let summary = game
        .run_with(&mut console, |game, report| {
            if narration_error.is_some() {
                return;
            }
            let mut out = io::stdout().lock();
            if let Err(err) = narrator.turn(&mut out, game, report).and_then(|()| out.flush()) {
                narration_error = Some(err);
            }
        })
        .context("playing the game")?;
    if let Some(err) = narration_error {
        return Err(err).context("writing turn narration");
    }

    display::result(&mut out, &summary)?;
    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    }
    out.flush()?;
    Ok(())
}
