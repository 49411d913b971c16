//! The game session: the player's state and every action they can take.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sxa_core::{WorldGraph, normalize_id};

use crate::combat::{CombatOutcome, CombatReport, CombatResolver};
use crate::command::{Command, parse_command};
use crate::config::GameConfig;
use crate::error::{ActionKind, GameError, GameResult};
use crate::event::{EventLog, EventSink, GameEvent};
use crate::mission::{Mission, MissionCatalog};
use crate::persistence::{LocationRecord, MissionRecord, SNAPSHOT_VERSION, Snapshot};
use crate::random::Randomness;
use crate::victory::{VictoryEvaluator, VictorySummary};

/// Whether the session still accepts actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Play is in progress.
    Active,
    /// The player has won.
    Victory,
    /// The player ran out of energy.
    GameOver,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Victory => write!(f, "victory"),
            Self::GameOver => write!(f, "game over"),
        }
    }
}

const HELP_TEXT: &str = "\
Available commands:
  move <destination>     Travel to an adjacent location (10 energy)
  look                   Describe the current location
  moves                  List locations reachable in one move
  status                 Show energy, score, and progress
  mission                Show the active mission
  fight <enemy>          Fight an enemy here (needs 15 energy per exchange)
  search <key> <value>   Find reachable locations by property (5 energy)
  save                   Save the game
  load                   Load the last saved game
  restart                Start a new game
  help                   Show this help
  quit                   Leave the game

Ways to win:
  - Complete 5 missions
  - Reach a score of 1000
  - Discover Mars, Jupiter, Titan, Proxima Centauri b, and Venus";

/// A single-player game session.
///
/// The session owns the world graph and all player progress. Actions that
/// fail leave every piece of state exactly as it was. Feedback is pushed
/// to the sink `S` as [`GameEvent`]s; errors are returned to the caller.
///
/// Once the session reaches [`SessionStatus::Victory`] or
/// [`SessionStatus::GameOver`], actions fail with [`GameError::SessionOver`]
/// until [`restart`](Self::restart) or a successful load. Informational
/// commands (look, moves, status, mission, help) are always allowed.
pub struct GameSession<S: EventSink = EventLog> {
    world: WorldGraph,
    catalog: MissionCatalog,
    config: GameConfig,
    combat: CombatResolver,
    victory: VictoryEvaluator,
    rng: Box<dyn Randomness + Send>,
    sink: S,
    status: SessionStatus,
    current_location: String,
    energy: i32,
    score: u32,
    current_mission: Option<Mission>,
    visited: BTreeSet<String>,
    completed_missions: u32,
    discovered_critical: BTreeSet<String>,
}

impl<S: EventSink> GameSession<S> {
    /// Start a new game with a [`StdRng`] seeded from `config.seed`.
    pub fn new(
        world: WorldGraph,
        catalog: MissionCatalog,
        config: GameConfig,
        sink: S,
    ) -> GameResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_randomness(world, catalog, config, sink, rng)
    }

    /// Start a new game drawing from the given randomness source.
    pub fn with_randomness<R>(
        world: WorldGraph,
        catalog: MissionCatalog,
        config: GameConfig,
        sink: S,
        rng: R,
    ) -> GameResult<Self>
    where
        R: Randomness + Send + 'static,
    {
        let start = normalize_id(&config.start_location);
        if !world.contains(&start) {
            return Err(GameError::LocationNotFound(start));
        }

        let mut session = Self {
            world,
            catalog,
            combat: CombatResolver::new(config.combat_cost),
            victory: VictoryEvaluator::from_config(&config),
            rng: Box::new(rng),
            sink,
            status: SessionStatus::Active,
            current_location: start,
            energy: config.initial_energy,
            score: 0,
            current_mission: None,
            visited: BTreeSet::new(),
            completed_missions: 0,
            discovered_critical: BTreeSet::new(),
            config,
        };
        session.start();
        Ok(session)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The world graph in its current state.
    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    /// The session config.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether the game has ended in victory or defeat.
    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::Active
    }

    /// Id of the player's location.
    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    /// Player energy. May be negative after a lost fight.
    pub fn energy(&self) -> i32 {
        self.energy
    }

    /// Player score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The active mission.
    pub fn current_mission(&self) -> Option<&Mission> {
        self.current_mission.as_ref()
    }

    /// Every location the player has been to.
    pub fn visited_locations(&self) -> &BTreeSet<String> {
        &self.visited
    }

    /// Missions completed this game.
    pub fn completed_missions(&self) -> u32 {
        self.completed_missions
    }

    /// Critical locations discovered this game.
    pub fn discovered_critical_locations(&self) -> &BTreeSet<String> {
        &self.discovered_critical
    }

    /// Locations reachable in one move, sorted.
    pub fn possible_moves(&self) -> Vec<&str> {
        self.world.neighbors(&self.current_location)
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the event sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Parse and run one line of player input.
    pub fn process(&mut self, input: &str) -> GameResult<()> {
        self.execute(parse_command(input))
    }

    /// Run a parsed command. `Quit` is a no-op; leaving is up to the caller.
    pub fn execute(&mut self, command: Command) -> GameResult<()> {
        match command {
            Command::Move { destination } => self.move_to(&destination),
            Command::Look => {
                self.look();
                Ok(())
            }
            Command::Moves => {
                self.moves();
                Ok(())
            }
            Command::Status => {
                self.show_status();
                Ok(())
            }
            Command::Mission => {
                self.show_mission();
                Ok(())
            }
            Command::Fight { enemy } => self.fight(&enemy).map(|_| ()),
            Command::Search { key, value } => self.search(&key, &value).map(|_| ()),
            Command::Save => self.save().map(|_| ()),
            Command::Load => self.load(),
            Command::Help => {
                self.help();
                Ok(())
            }
            Command::Restart => {
                self.restart();
                Ok(())
            }
            Command::Quit => Ok(()),
            Command::Incomplete { usage } => Err(GameError::Usage(usage)),
            Command::Unknown { input } => Err(GameError::UnknownCommand(input)),
        }
    }

    /// Travel to a location directly connected to the current one.
    pub fn move_to(&mut self, destination: &str) -> GameResult<()> {
        self.ensure_active()?;
        let destination = normalize_id(destination);

        if !self.world.is_adjacent(&self.current_location, &destination) {
            return Err(GameError::InvalidMove {
                from: self.current_location.clone(),
                to: destination,
            });
        }
        if self.energy < self.config.move_cost {
            return Err(GameError::InsufficientEnergy {
                action: ActionKind::Move,
                required: self.config.move_cost,
                available: self.energy,
            });
        }

        tracing::info!(from = %self.current_location, to = %destination, "move");
        self.energy -= self.config.move_cost;
        self.current_location = destination.clone();
        self.visited.insert(destination.clone());
        if let Some(location) = self.world.location_mut(&destination) {
            location.set_visited(true);
        }

        if self.victory.is_critical(&destination)
            && self.discovered_critical.insert(destination.clone())
        {
            self.message(format!(
                "🌟 You've discovered a critical location: {destination}!"
            ));
            if self.discovered_critical.len() >= self.victory.critical_count() {
                self.message("📍 You've discovered all critical locations in the galaxy!");
            }
        }

        self.sink.emit(GameEvent::EnergyChanged(self.energy));
        self.sink.emit(GameEvent::LocationChanged(destination));
        self.arrive(true);
        self.check_victory();
        self.check_energy();
        Ok(())
    }

    /// Fight the first enemy here whose name contains `fragment`
    /// (case-insensitive).
    pub fn fight(&mut self, fragment: &str) -> GameResult<CombatReport> {
        self.ensure_active()?;

        let index = self
            .world
            .location(&self.current_location)
            .and_then(|loc| loc.find_enemy(fragment))
            .ok_or_else(|| GameError::EnemyNotHere(fragment.to_string()))?;
        let location = self
            .world
            .location_mut(&self.current_location)
            .ok_or_else(|| GameError::LocationNotFound(self.current_location.clone()))?;
        let enemy = location
            .enemy_mut(index)
            .ok_or_else(|| GameError::EnemyNotHere(fragment.to_string()))?;

        let report = self
            .combat
            .resolve(enemy, &mut self.energy, self.rng.as_mut())?;
        self.report_combat(&report);

        match report.outcome {
            CombatOutcome::Victory => {
                if let Some(location) = self.world.location_mut(&self.current_location) {
                    location.remove_enemy(index);
                }
                self.message(format!("Victory! {} has been defeated!", report.enemy));
                self.score += self.config.combat_reward;
                self.sink.emit(GameEvent::ScoreChanged(self.score));
                tracing::info!(enemy = %report.enemy, score = self.score, "enemy defeated");

                let location = self.current_location.clone();
                let enemy = report.enemy.as_str();
                let mission_done = self
                    .current_mission
                    .as_mut()
                    .is_some_and(|m| m.check_completion(&location, Some(enemy)));
                if mission_done {
                    self.complete_mission();
                }
                self.check_victory();
            }
            CombatOutcome::Defeat => {
                self.message("Combat failed - insufficient energy!");
                tracing::info!(enemy = %report.enemy, energy = self.energy, "combat lost");
                self.check_energy();
            }
        }

        Ok(report)
    }

    /// Search every location reachable from here for `key == value`.
    ///
    /// The search costs energy whether or not anything is found.
    pub fn search(&mut self, key: &str, value: &str) -> GameResult<Vec<String>> {
        self.ensure_active()?;
        if self.energy < self.config.search_cost {
            return Err(GameError::InsufficientEnergy {
                action: ActionKind::Search,
                required: self.config.search_cost,
                available: self.energy,
            });
        }

        self.energy -= self.config.search_cost;
        let found = self
            .world
            .search_properties(&self.current_location, key, value);
        self.sink.emit(GameEvent::EnergyChanged(self.energy));

        if found.is_empty() {
            self.message(format!("No locations found with {key} = {value}."));
        } else {
            self.message(format!(
                "Found locations with {key} = {value}: {}",
                found.join(", ")
            ));
        }
        self.check_energy();
        Ok(found)
    }

    /// Describe the current location.
    pub fn look(&mut self) {
        let text = self
            .world
            .location(&self.current_location)
            .map(ToString::to_string)
            .unwrap_or_else(|| "Unknown location.".to_string());
        self.message(text);
        self.moves();
    }

    /// List the locations reachable in one move.
    pub fn moves(&mut self) {
        let moves = self.possible_moves().join(", ");
        if moves.is_empty() {
            self.message("No routes lead away from here.");
        } else {
            self.message(format!("Possible moves: {moves}"));
        }
    }

    /// Report energy, score, the active mission, and progress toward each
    /// victory condition.
    pub fn show_status(&mut self) {
        let mission = self.current_mission().map_or("None", Mission::title);
        let text = format!(
            "Location: {}\n\
             Energy: {}\n\
             Score: {}\n\
             Current Mission: {mission}\n\
             Missions Completed: {}/{}\n\
             Critical Locations Discovered: {}/{}\n\
             Locations Visited: {}",
            self.current_location,
            self.energy,
            self.score,
            self.completed_missions,
            self.victory.missions_required(),
            self.discovered_critical.len(),
            self.victory.critical_count(),
            self.visited.len(),
        );
        self.message(text);
        self.moves();
    }

    /// Describe the active mission.
    pub fn show_mission(&mut self) {
        let text = match &self.current_mission {
            Some(mission) => format!("Current Mission:\n{mission}"),
            None => "No active mission.".to_string(),
        };
        self.message(text);
    }

    /// Show the command reference.
    pub fn help(&mut self) {
        self.message(HELP_TEXT);
    }

    /// Start over with full energy, no score and no missions.
    ///
    /// The world is left as it is: defeated enemies stay gone and
    /// locations keep their visited flags.
    pub fn restart(&mut self) {
        tracing::info!("restarting game");
        self.start();
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the full session state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            current_location: self.current_location.clone(),
            energy: self.energy,
            score: self.score,
            current_mission: self.current_mission.as_ref().map(MissionRecord::from),
            visited_locations: self.visited.clone(),
            completed_missions: self.completed_missions,
            discovered_critical_locations: self.discovered_critical.clone(),
            locations: self
                .world
                .locations()
                .map(|loc| (loc.id().to_string(), LocationRecord::from(loc)))
                .collect(),
        }
    }

    /// Save to the configured save path. Returns the path written.
    pub fn save(&mut self) -> GameResult<PathBuf> {
        let path = self.config.save_path.clone();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`.
    pub fn save_to(&mut self, path: &Path) -> GameResult<()> {
        self.ensure_active()?;
        self.snapshot().write_to(path)?;
        self.message(format!("Game saved to {}", path.display()));
        Ok(())
    }

    /// Load from the configured save path.
    pub fn load(&mut self) -> GameResult<()> {
        let path = self.config.save_path.clone();
        self.load_from(&path)
    }

    /// Load from `path`. On any error the session is left untouched.
    pub fn load_from(&mut self, path: &Path) -> GameResult<()> {
        let snapshot = Snapshot::read_from(path)?;
        self.restore(snapshot)?;
        self.message(format!("Game loaded from {}", path.display()));
        Ok(())
    }

    /// Replace the session state with a snapshot.
    ///
    /// The snapshot is validated in full before anything changes. The
    /// restored location is reported as on arrival, but no energy is
    /// charged and no mission is completed.
    pub fn restore(&mut self, snapshot: Snapshot) -> GameResult<()> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GameError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let locations = snapshot.restore_locations()?;
        let current = normalize_id(&snapshot.current_location);
        if !locations.iter().any(|loc| loc.id() == current) {
            return Err(GameError::InvalidSnapshot(format!(
                "current location {current} is not in the saved world"
            )));
        }
        self.world.replace_locations(locations)?;

        self.current_location = current;
        self.energy = snapshot.energy;
        self.score = snapshot.score;
        self.current_mission = snapshot.current_mission.as_ref().map(Mission::from);
        self.visited = snapshot.visited_locations;
        self.completed_missions = snapshot.completed_missions;
        self.discovered_critical = snapshot
            .discovered_critical_locations
            .into_iter()
            .filter(|id| self.victory.is_critical(id))
            .collect();
        self.status = if self.energy <= 0 {
            SessionStatus::GameOver
        } else {
            SessionStatus::Active
        };

        self.sink
            .emit(GameEvent::LocationChanged(self.current_location.clone()));
        self.sink.emit(GameEvent::EnergyChanged(self.energy));
        self.sink.emit(GameEvent::ScoreChanged(self.score));
        self.sink.emit(GameEvent::MissionChanged(
            self.current_mission.as_ref().map(|m| m.title().to_string()),
        ));
        self.arrive(false);
        if self.status == SessionStatus::GameOver {
            self.message("You have run out of energy. Game over.");
            self.sink.emit(GameEvent::GameOver);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn start(&mut self) {
        self.status = SessionStatus::Active;
        self.energy = self.config.initial_energy;
        self.score = 0;
        self.completed_missions = 0;
        self.current_mission = None;
        self.visited.clear();
        self.discovered_critical.clear();

        self.current_location = normalize_id(&self.config.start_location);
        self.visited.insert(self.current_location.clone());
        let description = match self.world.location_mut(&self.current_location) {
            Some(location) => {
                location.set_visited(true);
                location.description.clone()
            }
            None => String::new(),
        };

        self.sink
            .emit(GameEvent::LocationChanged(self.current_location.clone()));
        self.message(format!("Starting exploration at {}", self.current_location));
        self.message(description);
        self.assign_mission();
        self.sink.emit(GameEvent::ScoreChanged(self.score));
        self.sink.emit(GameEvent::EnergyChanged(self.energy));
    }

    fn ensure_active(&self) -> GameResult<()> {
        if self.status == SessionStatus::Active {
            Ok(())
        } else {
            Err(GameError::SessionOver(self.status))
        }
    }

    fn message(&mut self, text: impl Into<String>) {
        self.sink.emit(GameEvent::Message(text.into()));
    }

    fn assign_mission(&mut self) {
        if self.current_mission.is_some() {
            return;
        }
        let mission = self.catalog.draw(self.rng.as_mut());
        tracing::debug!(title = mission.title(), "mission assigned");
        self.sink
            .emit(GameEvent::MissionChanged(Some(mission.title().to_string())));
        self.message(format!("New Mission Acquired!\n{mission}"));
        self.current_mission = Some(mission);
    }

    fn complete_mission(&mut self) {
        let Some(mission) = self.current_mission.take() else {
            return;
        };

        self.score += mission.reward();
        self.completed_missions += 1;
        tracing::info!(
            title = mission.title(),
            reward = mission.reward(),
            completed = self.completed_missions,
            "mission complete"
        );
        self.message(format!(
            "🎉 Mission Complete: {}\nReward: {} points\nTotal Missions Completed: {}/{}",
            mission.title(),
            mission.reward(),
            self.completed_missions,
            self.victory.missions_required()
        ));
        self.sink.emit(GameEvent::ScoreChanged(self.score));
        self.sink.emit(GameEvent::MissionChanged(None));

        self.assign_mission();
        self.check_victory();
    }

    /// Report the current location; optionally settle an exploration
    /// mission that targets it.
    fn arrive(&mut self, complete_missions: bool) {
        let mut lines = Vec::new();
        if let Some(location) = self.world.location(&self.current_location) {
            lines.push(format!("Arrived at {}", location.id()));
            lines.push(location.description.clone());
            if location.has_enemies() {
                lines.push("Warning: Enemies detected!".to_string());
                lines.extend(location.enemies().iter().map(|e| format!("- {e}")));
            }
        }
        for line in lines {
            self.message(line);
        }

        if !complete_missions {
            return;
        }
        let location = self.current_location.clone();
        let reached = self
            .current_mission
            .as_mut()
            .is_some_and(|m| m.check_completion(&location, None));
        if reached {
            self.message("🎯 You've reached the mission target location!");
            self.complete_mission();
        }
    }

    fn report_combat(&mut self, report: &CombatReport) {
        self.message(format!("Engaging in combat with {}", report.enemy));
        for round in &report.rounds {
            if round.critical {
                self.message(format!(
                    "Critical hit! You deal {} damage to {}",
                    round.player_damage, report.enemy
                ));
            } else {
                self.message(format!(
                    "You deal {} damage to {}",
                    round.player_damage, report.enemy
                ));
            }
            if let Some(damage) = round.enemy_damage {
                self.message(format!("{} deals {damage} damage", report.enemy));
            }
            self.message(format!(
                "Status - Enemy Health: {}%, Your Energy: {}",
                round.enemy_health_pct, round.energy_after
            ));
        }
        if report.damage_taken() > 0 {
            self.sink.emit(GameEvent::EnergyChanged(self.energy));
        }
    }

    fn check_victory(&mut self) {
        if self.status != SessionStatus::Active {
            return;
        }
        let conditions = self.victory.evaluate(
            self.completed_missions,
            self.score,
            &self.discovered_critical,
        );
        if !conditions.any() {
            return;
        }

        self.status = SessionStatus::Victory;
        tracing::info!(?conditions, score = self.score, "victory");
        let summary = VictorySummary {
            conditions,
            score: self.score,
            completed_missions: self.completed_missions,
            locations_visited: self.visited.len(),
            energy: self.energy,
            missions_required: self.victory.missions_required(),
            score_required: self.victory.score_required(),
        };
        self.sink.emit(GameEvent::Victory(summary));
    }

    fn check_energy(&mut self) {
        if self.status == SessionStatus::Active && self.energy <= 0 {
            self.status = SessionStatus::GameOver;
            tracing::warn!(energy = self.energy, "out of energy");
            self.message("You have run out of energy. Game over.");
            self.sink.emit(GameEvent::GameOver);
        }
    }
}
