//! Configuration for a game session.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// The five locations whose discovery wins the game by exploration.
pub const CRITICAL_LOCATIONS: [&str; 5] = [
    "mars",
    "jupiter",
    "titan",
    "proxima_centauri_b",
    "venus",
];

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible fights and mission draws.
    pub seed: u64,
    /// Energy at the start of every game.
    pub initial_energy: i32,
    /// Energy spent per move.
    pub move_cost: i32,
    /// Minimum energy required to keep fighting.
    pub combat_cost: i32,
    /// Energy spent per property search.
    pub search_cost: i32,
    /// Flat score awarded for each enemy defeated.
    pub combat_reward: u32,
    /// Completed missions needed to win.
    pub missions_for_victory: u32,
    /// Score needed to win.
    pub score_for_victory: u32,
    /// Locations that must all be discovered for an exploration victory.
    pub critical_locations: BTreeSet<String>,
    /// Where every new game begins.
    pub start_location: String,
    /// Default save file.
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_energy: 100,
            move_cost: 10,
            combat_cost: 15,
            search_cost: 5,
            combat_reward: 100,
            missions_for_victory: 5,
            score_for_victory: 1000,
            critical_locations: CRITICAL_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            start_location: "earth".to_string(),
            save_path: PathBuf::from("saves/savegame.json"),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting energy.
    pub fn with_initial_energy(mut self, energy: i32) -> Self {
        self.initial_energy = energy;
        self
    }

    /// Set the starting location (normalized to lower case).
    pub fn with_start_location(mut self, id: &str) -> Self {
        self.start_location = sxa_core::normalize_id(id);
        self
    }

    /// Set the default save file.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Replace the critical location set.
    pub fn with_critical_locations<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.critical_locations = ids
            .into_iter()
            .map(|id| sxa_core::normalize_id(id.as_ref()))
            .collect();
        self
    }

    /// Set the victory thresholds for missions and score.
    pub fn with_victory_thresholds(mut self, missions: u32, score: u32) -> Self {
        self.missions_for_victory = missions;
        self.score_for_victory = score;
        self
    }
}
