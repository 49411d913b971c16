//! Game session engine for Space Exploration Adventure.
//!
//! A [`GameSession`] owns the world graph and the player's progress. Front
//! ends drive it with [`Command`]s (or the individual action methods) and
//! receive feedback through an [`EventSink`]. Randomness is injected through
//! the [`Randomness`] capability so fights and mission draws can be replayed.

/// Combat resolution between the player and a single enemy.
pub mod combat;
/// Player command parsing.
pub mod command;
/// Session configuration.
pub mod config;
/// Error types for the engine.
pub mod error;
/// Feedback events and sinks.
pub mod event;
/// Missions and the mission catalog.
pub mod mission;
/// Save-game snapshots.
pub mod persistence;
/// Injectable randomness.
pub mod random;
/// The game session orchestrator.
pub mod session;
/// Victory condition evaluation.
pub mod victory;

pub use combat::{CombatOutcome, CombatReport, CombatResolver, CombatRound};
pub use command::{Command, parse_command};
pub use config::GameConfig;
pub use error::{ActionKind, GameError, GameResult};
pub use event::{EventLog, EventSink, GameEvent};
pub use mission::{Mission, MissionCatalog};
pub use persistence::{SNAPSHOT_VERSION, Snapshot};
pub use random::{Randomness, ScriptedRandomness};
pub use session::{GameSession, SessionStatus};
pub use victory::{VictoryConditions, VictoryEvaluator, VictorySummary};
