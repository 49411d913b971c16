//! Victory condition evaluation.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::GameConfig;

/// Which victory conditions are currently met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VictoryConditions {
    /// Enough missions completed.
    pub missions: bool,
    /// Score threshold reached.
    pub score: bool,
    /// Every critical location discovered.
    pub exploration: bool,
}

impl VictoryConditions {
    /// Whether any condition is met.
    pub fn any(&self) -> bool {
        self.missions || self.score || self.exploration
    }
}

/// Stateless check of the three alternative win conditions.
#[derive(Debug, Clone)]
pub struct VictoryEvaluator {
    missions_required: u32,
    score_required: u32,
    critical_locations: BTreeSet<String>,
}

impl VictoryEvaluator {
    /// Build an evaluator from the session config.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            missions_required: config.missions_for_victory,
            score_required: config.score_for_victory,
            critical_locations: config.critical_locations.clone(),
        }
    }

    /// Evaluate the conditions against the player's progress.
    pub fn evaluate(
        &self,
        completed_missions: u32,
        score: u32,
        discovered: &BTreeSet<String>,
    ) -> VictoryConditions {
        VictoryConditions {
            missions: completed_missions >= self.missions_required,
            score: score >= self.score_required,
            exploration: self.critical_locations.is_subset(discovered),
        }
    }

    /// Whether `id` belongs to the critical set.
    pub fn is_critical(&self, id: &str) -> bool {
        self.critical_locations.contains(id)
    }

    /// Size of the critical set.
    pub fn critical_count(&self) -> usize {
        self.critical_locations.len()
    }

    /// Completed missions needed to win.
    pub fn missions_required(&self) -> u32 {
        self.missions_required
    }

    /// Score needed to win.
    pub fn score_required(&self) -> u32 {
        self.score_required
    }
}

/// Final report shown when the player wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictorySummary {
    /// Conditions that triggered the win.
    pub conditions: VictoryConditions,
    /// Final score.
    pub score: u32,
    /// Missions completed.
    pub completed_missions: u32,
    /// Distinct locations visited.
    pub locations_visited: usize,
    /// Energy left.
    pub energy: i32,
    /// Missions that were required.
    pub missions_required: u32,
    /// Score that was required.
    pub score_required: u32,
}

impl fmt::Display for VictorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🎉 CONGRATULATIONS! You've won the game! 🎉")?;
        writeln!(f)?;
        writeln!(f, "Victory achieved through:")?;
        if self.conditions.missions {
            writeln!(
                f,
                "- Completing {} missions (required: {})",
                self.completed_missions, self.missions_required
            )?;
        }
        if self.conditions.score {
            writeln!(
                f,
                "- Achieving a score of {} (required: {})",
                self.score, self.score_required
            )?;
        }
        if self.conditions.exploration {
            writeln!(f, "- Discovering all critical locations in the galaxy")?;
        }
        writeln!(f)?;
        writeln!(f, "Final Statistics:")?;
        writeln!(f, "- Total Score: {}", self.score)?;
        writeln!(f, "- Missions Completed: {}", self.completed_missions)?;
        writeln!(f, "- Locations Discovered: {}", self.locations_visited)?;
        write!(f, "- Energy Remaining: {}", self.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> VictoryEvaluator {
        VictoryEvaluator::from_config(&GameConfig::default())
    }

    fn discovered(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn nothing_met() {
        let c = evaluator().evaluate(4, 999, &discovered(&["mars", "venus"]));
        assert_eq!(c, VictoryConditions::default());
        assert!(!c.any());
    }

    #[test]
    fn missions_alone() {
        let c = evaluator().evaluate(5, 0, &BTreeSet::new());
        assert!(c.missions && !c.score && !c.exploration);
        assert!(c.any());
    }

    #[test]
    fn score_alone() {
        let c = evaluator().evaluate(0, 1000, &BTreeSet::new());
        assert!(!c.missions && c.score && !c.exploration);
        assert!(c.any());
    }

    #[test]
    fn exploration_alone() {
        let mut all = discovered(&["mars", "jupiter", "titan", "venus", "europa"]);
        all.insert("proxima_centauri_b".into());
        let c = evaluator().evaluate(0, 0, &all);
        assert!(!c.missions && !c.score && c.exploration);
    }

    #[test]
    fn combined() {
        let mut all = discovered(&["mars", "jupiter", "titan", "venus"]);
        all.insert("proxima_centauri_b".into());
        let c = evaluator().evaluate(6, 1500, &all);
        assert!(c.missions && c.score && c.exploration);
    }

    #[test]
    fn critical_membership() {
        let e = evaluator();
        assert!(e.is_critical("titan"));
        assert!(!e.is_critical("earth"));
        assert_eq!(e.critical_count(), 5);
    }

    #[test]
    fn summary_lists_only_triggered_conditions() {
        let summary = VictorySummary {
            conditions: VictoryConditions {
                missions: false,
                score: true,
                exploration: false,
            },
            score: 1050,
            completed_missions: 2,
            locations_visited: 4,
            energy: 30,
            missions_required: 5,
            score_required: 1000,
        };
        let text = summary.to_string();
        assert!(text.contains("- Achieving a score of 1050 (required: 1000)"));
        assert!(!text.contains("- Completing"));
        assert!(!text.contains("critical locations"));
        assert!(text.contains("- Locations Discovered: 4"));
        assert!(text.ends_with("- Energy Remaining: 30"));
    }
}
