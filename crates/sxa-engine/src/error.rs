//! Error types for the game engine.

use std::fmt;

use thiserror::Error;

use crate::session::SessionStatus;

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

/// The energy-consuming actions a player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Moving to an adjacent location.
    Move,
    /// Engaging an enemy.
    Combat,
    /// Running a property search.
    Search,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => write!(f, "movement"),
            Self::Combat => write!(f, "combat"),
            Self::Search => write!(f, "search"),
        }
    }
}

/// Errors that can occur during a game session.
///
/// Every variant is reported before any state is touched, so the session
/// is unchanged when one of these comes back.
#[derive(Debug, Error)]
pub enum GameError {
    /// The destination is not directly connected to the current location.
    #[error("Cannot move to {to} from {from}.")]
    InvalidMove {
        /// Current location.
        from: String,
        /// Requested destination.
        to: String,
    },

    /// Not enough energy to pay for an action.
    #[error("Insufficient energy for {action}! (need {required}, have {available})")]
    InsufficientEnergy {
        /// The attempted action.
        action: ActionKind,
        /// Energy the action requires.
        required: i32,
        /// Energy the player has.
        available: i32,
    },

    /// No enemy at the current location matches the given name fragment.
    #[error("No such enemy here: {0}")]
    EnemyNotHere(String),

    /// A location id did not resolve.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// The session has ended and only accepts restart or load.
    #[error("the game has ended ({0}); restart or load to keep playing")]
    SessionOver(SessionStatus),

    /// A mission catalog must hold at least one mission.
    #[error("mission catalog is empty")]
    EmptyCatalog,

    /// A command was missing its arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// The input did not match any known command.
    #[error("Unknown command: {0}. Type 'help' for commands.")]
    UnknownCommand(String),

    /// Reading or writing a save file failed.
    #[error("save file error: {0}")]
    Io(#[from] std::io::Error),

    /// A save file could not be encoded or decoded.
    #[error("corrupt save file: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The save file was written by an incompatible version.
    #[error("unsupported save file version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    /// The save file is well-formed but inconsistent.
    #[error("invalid save file: {0}")]
    InvalidSnapshot(String),

    /// World graph error.
    #[error(transparent)]
    World(#[from] sxa_core::WorldError),
}
