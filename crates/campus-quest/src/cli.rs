//! Command line arguments.

use campus_quest_core::game::DEFAULT_MAX_TURNS;
use campus_quest_core::Mode;
use clap::{Parser, ValueEnum};

/// Campus Quest: a turn-based arena battle
#[derive(Parser, Debug)]
#[command(name = "campus-quest", version, about, long_about = None)]
pub struct Cli {
    /// Who controls the hero. Asked on startup when omitted
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Turn at which an undecided battle ends in a draw
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_turns: u32,

    /// Log filter (e.g. `debug`, `campus_quest_core=trace`). Falls back to `RUST_LOG`, then `warn`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Mode as spelled on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Choose every action from a menu
    Interactive,
    /// Watch the scripted hero fight
    Auto,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Interactive => Self::Interactive,
            ModeArg::Auto => Self::Automated,
        }
    }
}
