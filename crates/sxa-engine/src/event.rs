//! Feedback from the engine to whatever front end is attached.

use crate::victory::VictorySummary;

/// Something the player should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A line of narration or feedback.
    Message(String),
    /// Player energy changed to the given value.
    EnergyChanged(i32),
    /// Player moved to (or was restored at) the given location.
    LocationChanged(String),
    /// Score changed to the given value.
    ScoreChanged(u32),
    /// The active mission changed; `None` when no mission is active.
    MissionChanged(Option<String>),
    /// The player ran out of energy.
    GameOver,
    /// The player won.
    Victory(VictorySummary),
}

/// Receives engine events.
pub trait EventSink {
    /// Handle one event.
    fn emit(&mut self, event: GameEvent);
}

/// An in-memory sink that records every event.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// The text of every recorded message, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any message contains `needle`.
    pub fn contains_message(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}
