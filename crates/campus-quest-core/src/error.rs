//! Error types for the Campus Quest core.
//!
//! Two families of failure exist:
//!
//! - [`QuestError`]: invariant violations that abort the run (non-finite
//!   coordinates, bad registry indices or handles, turns requested outside
//!   play, a player input source that closed). These propagate with `?` up to the
//!   binary, which reports them and exits non-zero.
//! - [`InvalidChoice`]: unrecognised player input (weapon names, menu
//!   tokens, directions). This is part of normal play and is handled by
//!   re-prompting, never by aborting.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;
use crate::game::GameState;

/// Coordinate axis, used to report which component of a point was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal component.
    X,
    /// Vertical component.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Errors raised by the simulation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestError {
    /// A coordinate was NaN or infinite.
    #[error("invalid argument: {axis} coordinate must be finite (got {value})")]
    InvalidArgument {
        /// The offending axis.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },

    /// A registry index was past the end of the collection.
    #[error("index {index} out of range for registry of {len} entities")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The registry size at the time of the request.
        len: usize,
    },

    /// A turn was requested while the game was not being played.
    #[error("no turn can be played in the {0} state")]
    NotPlaying(GameState),

    /// Two stored entities carry the same handle.
    #[error("handle {0} is used by more than one entity")]
    DuplicateHandle(EntityId),

    /// A handle is the last representable one, leaving none to allocate.
    #[error("handle {0} leaves no room for new handles")]
    HandleExhausted(EntityId),

    /// The source of player actions failed or closed.
    #[error("player input failed: {0}")]
    Input(String),
}

/// Convenience alias for results carrying a [`QuestError`].
pub type Result<T> = std::result::Result<T, QuestError>;

/// An input token that does not name any known option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized choice `{0}`")]
pub struct InvalidChoice(pub String);

impl InvalidChoice {
    /// Creates an `InvalidChoice` for the given raw input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self(input.into())
    }
}
