//! Save-game snapshots.
//!
//! A [`Snapshot`] is a plain serializable record of a session, addressed
//! entirely by location ids. It is written as pretty JSON with camelCase
//! keys. Writes go to a temporary sibling file that is then renamed over
//! the target, so an interrupted save never leaves a truncated file.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sxa_core::{Enemy, Location};

use crate::error::{GameError, GameResult};
use crate::mission::Mission;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A complete, self-contained record of a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Format version.
    pub version: u32,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// Player location id.
    pub current_location: String,
    /// Player energy.
    pub energy: i32,
    /// Player score.
    pub score: u32,
    /// Active mission, if any.
    pub current_mission: Option<MissionRecord>,
    /// Every location id the player has visited.
    pub visited_locations: BTreeSet<String>,
    /// Missions completed so far.
    #[serde(default)]
    pub completed_missions: u32,
    /// Critical locations discovered so far.
    #[serde(default)]
    pub discovered_critical_locations: BTreeSet<String>,
    /// Every location in the world, keyed by id.
    pub locations: BTreeMap<String, LocationRecord>,
}

/// Saved form of a [`Mission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRecord {
    /// Mission title.
    pub title: String,
    /// Target location id.
    pub target_location: String,
    /// Target enemy name, if a combat mission.
    #[serde(default)]
    pub target_enemy: Option<String>,
    /// Flavour text.
    pub description: String,
    /// Score reward.
    pub reward: u32,
    /// Whether the mission was already complete.
    pub completed: bool,
}

/// Saved form of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Location id.
    pub name: String,
    /// Description.
    pub description: String,
    /// Visited flag.
    pub visited: bool,
    /// Property map.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Enemies still present.
    #[serde(default)]
    pub enemies: Vec<EnemyRecord>,
}

/// Saved form of an [`Enemy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyRecord {
    /// Enemy name.
    pub name: String,
    /// Full health.
    pub max_health: u32,
    /// Remaining health.
    pub current_health: u32,
    /// Attack power.
    pub attack_power: u32,
    /// Defeated flag.
    pub defeated: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<&Mission> for MissionRecord {
    fn from(mission: &Mission) -> Self {
        Self {
            title: mission.title().to_string(),
            target_location: mission.target_location().to_string(),
            target_enemy: mission.target_enemy().map(str::to_string),
            description: mission.description().to_string(),
            reward: mission.reward(),
            completed: mission.is_completed(),
        }
    }
}

impl From<&MissionRecord> for Mission {
    fn from(record: &MissionRecord) -> Self {
        let mut mission = match &record.target_enemy {
            Some(enemy) => Mission::combat(
                record.title.clone(),
                &record.target_location,
                enemy.clone(),
                record.description.clone(),
                record.reward,
            ),
            None => Mission::exploration(
                record.title.clone(),
                &record.target_location,
                record.description.clone(),
                record.reward,
            ),
        };
        mission.set_completed(record.completed);
        mission
    }
}

impl From<&Enemy> for EnemyRecord {
    fn from(enemy: &Enemy) -> Self {
        Self {
            name: enemy.name().to_string(),
            max_health: enemy.max_health(),
            current_health: enemy.current_health(),
            attack_power: enemy.attack_power(),
            defeated: enemy.is_defeated(),
        }
    }
}

impl EnemyRecord {
    /// Rebuild the enemy, rejecting impossible health values.
    pub fn to_enemy(&self) -> GameResult<Enemy> {
        if self.current_health > self.max_health {
            return Err(GameError::InvalidSnapshot(format!(
                "enemy {} has {} health but a maximum of {}",
                self.name, self.current_health, self.max_health
            )));
        }
        if self.defeated != (self.current_health == 0) {
            return Err(GameError::InvalidSnapshot(format!(
                "enemy {} defeated flag disagrees with its health",
                self.name
            )));
        }
        Ok(Enemy::with_health(
            self.name.clone(),
            self.max_health,
            self.current_health,
            self.attack_power,
        ))
    }
}

impl From<&Location> for LocationRecord {
    fn from(location: &Location) -> Self {
        Self {
            name: location.id().to_string(),
            description: location.description.clone(),
            visited: location.is_visited(),
            properties: location
                .properties()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            enemies: location.enemies().iter().map(EnemyRecord::from).collect(),
        }
    }
}

impl LocationRecord {
    /// Rebuild the location stored under `key`.
    pub fn to_location(&self, key: &str) -> GameResult<Location> {
        if sxa_core::normalize_id(&self.name) != key {
            return Err(GameError::InvalidSnapshot(format!(
                "location stored under {key} is named {}",
                self.name
            )));
        }

        let mut location = Location::new(&self.name).with_description(self.description.clone());
        location.set_visited(self.visited);
        for (k, v) in &self.properties {
            location.set_property(k.clone(), v.clone());
        }
        for enemy in &self.enemies {
            location.add_enemy(enemy.to_enemy()?);
        }
        Ok(location)
    }
}

// ---------------------------------------------------------------------------
// Encoding and file I/O
// ---------------------------------------------------------------------------

impl Snapshot {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON, rejecting other format versions.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GameError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> GameResult<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = temp_path(path);
        if let Err(e) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::info!(path = %path.display(), "game saved");
        Ok(())
    }

    /// Read and decode a snapshot file.
    pub fn read_from(path: &Path) -> GameResult<Self> {
        let json = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), saved_at = %snapshot.saved_at, "game loaded");
        Ok(snapshot)
    }

    /// Rebuild every location, validating each record.
    pub fn restore_locations(&self) -> GameResult<Vec<Location>> {
        self.locations
            .iter()
            .map(|(key, record)| record.to_location(key))
            .collect()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
