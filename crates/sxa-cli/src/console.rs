//! Terminal rendering of game events.

use std::io::{self, Stdout, Write};

use colored::Colorize;
use sxa_engine::{EventSink, GameEvent};

/// Writes game narration to a terminal (or any writer).
///
/// Status changes (energy, score, location, mission) are shown in the
/// prompt rather than echoed here.
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
}

impl ConsoleSink<Stdout> {
    /// A sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// A sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        // write errors are ignored
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::Message(text) => {
                if text.starts_with("Warning") {
                    self.line(text.yellow());
                } else if text.starts_with("Victory!") || text.starts_with("🎉") {
                    self.line(text.green());
                } else if text.starts_with("🌟") || text.starts_with("📍") || text.starts_with("🎯") {
                    self.line(text.cyan());
                } else {
                    self.line(text);
                }
            }
            GameEvent::Victory(summary) => {
                self.line("");
                self.line(summary.to_string().green().bold());
            }
            GameEvent::GameOver => {
                self.line("");
                self.line("GAME OVER".red().bold());
            }
            GameEvent::EnergyChanged(energy) => tracing::trace!(energy, "energy changed"),
            GameEvent::ScoreChanged(score) => tracing::trace!(score, "score changed"),
            GameEvent::LocationChanged(location) => tracing::trace!(%location, "location changed"),
            GameEvent::MissionChanged(mission) => tracing::trace!(?mission, "mission changed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sxa_engine::{VictoryConditions, VictorySummary};

    fn render(events: Vec<GameEvent>) -> String {
        colored::control::set_override(false);
        let mut sink = ConsoleSink::new(Vec::new());
        for event in events {
            sink.emit(event);
        }
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn messages_are_printed_in_order() {
        let out = render(vec![
            GameEvent::Message("Arrived at mars".into()),
            GameEvent::EnergyChanged(90),
            GameEvent::Message("Warning: Enemies detected!".into()),
        ]);
        assert_eq!(out, "Arrived at mars\nWarning: Enemies detected!\n");
    }

    #[test]
    fn victory_prints_summary() {
        let out = render(vec![GameEvent::Victory(VictorySummary {
            conditions: VictoryConditions {
                missions: true,
                score: false,
                exploration: false,
            },
            score: 1200,
            completed_missions: 5,
            locations_visited: 7,
            energy: 10,
            missions_required: 5,
            score_required: 1000,
        })]);
        assert!(out.contains("You've won the game"));
        assert!(out.contains("- Completing 5 missions (required: 5)"));
    }

    #[test]
    fn game_over_banner() {
        let out = render(vec![GameEvent::GameOver]);
        assert!(out.contains("GAME OVER"));
    }
}
