//! Missions and the catalog they are drawn from.

use std::fmt;

use crate::error::{GameError, GameResult};
use crate::random::Randomness;

/// A goal the player can complete for a score reward.
///
/// A mission without a target enemy is an exploration mission: reaching
/// the target location completes it. Otherwise the named enemy must be
/// defeated at the target location. Once complete, a mission stays
/// complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    title: String,
    target_location: String,
    target_enemy: Option<String>,
    description: String,
    reward: u32,
    completed: bool,
}

impl Mission {
    /// Create a combat mission.
    pub fn combat(
        title: impl Into<String>,
        target_location: &str,
        target_enemy: impl Into<String>,
        description: impl Into<String>,
        reward: u32,
    ) -> Self {
        Self {
            title: title.into(),
            target_location: sxa_core::normalize_id(target_location),
            target_enemy: Some(target_enemy.into()),
            description: description.into(),
            reward,
            completed: false,
        }
    }

    /// Create an exploration mission.
    pub fn exploration(
        title: impl Into<String>,
        target_location: &str,
        description: impl Into<String>,
        reward: u32,
    ) -> Self {
        Self {
            title: title.into(),
            target_location: sxa_core::normalize_id(target_location),
            target_enemy: None,
            description: description.into(),
            reward,
            completed: false,
        }
    }

    /// Check the mission against the player's location and, after a fight,
    /// the name of the enemy just defeated.
    ///
    /// The result is cached: once this returns `true` it always will.
    pub fn check_completion(&mut self, location: &str, defeated_enemy: Option<&str>) -> bool {
        if !self.completed {
            let location_matches = location.eq_ignore_ascii_case(&self.target_location);
            let enemy_matches = match (&self.target_enemy, defeated_enemy) {
                (None, _) => true,
                (Some(target), Some(defeated)) => target.eq_ignore_ascii_case(defeated),
                (Some(_), None) => false,
            };
            self.completed = location_matches && enemy_matches;
        }
        self.completed
    }

    /// Mission title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Normalized id of the target location.
    pub fn target_location(&self) -> &str {
        &self.target_location
    }

    /// Enemy that must be defeated, if any.
    pub fn target_enemy(&self) -> Option<&str> {
        self.target_enemy.as_deref()
    }

    /// Flavour text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Score awarded on completion.
    pub fn reward(&self) -> u32 {
        self.reward
    }

    /// Whether the mission has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether this is an exploration mission.
    pub fn is_exploration(&self) -> bool {
        self.target_enemy.is_none()
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Target Location: {}", self.target_location)?;
        if let Some(enemy) = &self.target_enemy {
            write!(f, "\nTarget Enemy: {enemy}")?;
        }
        write!(f, "\nReward: {} points", self.reward)
    }
}

/// The fixed pool of mission templates.
#[derive(Debug, Clone)]
pub struct MissionCatalog {
    templates: Vec<Mission>,
}

impl MissionCatalog {
    /// Build a catalog from templates. An empty catalog is rejected.
    pub fn new(templates: Vec<Mission>) -> GameResult<Self> {
        if templates.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(Self { templates })
    }

    /// The standard ten missions matching the bundled world.
    pub fn standard() -> Self {
        Self {
            templates: vec![
                Mission::combat(
                    "Space Pirate Hunt",
                    "jupiter",
                    "Pirate",
                    "Eliminate the Pirate terrorizing Jupiter's shipping lanes.",
                    300,
                ),
                Mission::combat(
                    "Scout Elimination",
                    "ganymede",
                    "Scout",
                    "Neutralize the Scout before it can report back to its fleet.",
                    350,
                ),
                Mission::combat(
                    "Colony Defense",
                    "proxima_centauri_b",
                    "Invader",
                    "Defend the colony from the Invader.",
                    400,
                ),
                Mission::combat(
                    "Quantum Crisis",
                    "neptune",
                    "Quantum",
                    "Stop the Quantum entity threatening deep space operations.",
                    450,
                ),
                Mission::combat(
                    "AI Containment",
                    "kepler_186f",
                    "DefenseAI",
                    "Contain the rogue DefenseAI system.",
                    375,
                ),
                Mission::exploration(
                    "Methane Study",
                    "titan",
                    "Study the Beast's territory in Titan's methane lakes.",
                    200,
                ),
                Mission::exploration(
                    "Mars Investigation",
                    "mars",
                    "Investigate the Warrior's impact on Mars ruins.",
                    250,
                ),
                Mission::exploration(
                    "Venus Analysis",
                    "venus",
                    "Research the Plasma's effect on Venus's atmosphere.",
                    275,
                ),
                Mission::exploration(
                    "Europa Discovery",
                    "europa",
                    "Study the Leviathan's underwater habitat.",
                    225,
                ),
                Mission::exploration(
                    "Saturn Survey",
                    "saturn",
                    "Assess the Raider's damage to Saturn's rings.",
                    325,
                ),
            ],
        }
    }

    /// Draw a fresh copy of a uniformly chosen template.
    ///
    /// Draws are with replacement: the same mission may come up again
    /// right after it was completed.
    pub fn draw(&self, rng: &mut dyn Randomness) -> Mission {
        let bound = u32::try_from(self.templates.len()).unwrap_or(u32::MAX);
        let index = rng.next_int(bound) as usize;
        let mut mission = self.templates[index.min(self.templates.len() - 1)].clone();
        mission.set_completed(false);
        mission
    }

    /// Look up a template by title.
    pub fn find(&self, title: &str) -> Option<&Mission> {
        self.templates.iter().find(|m| m.title == title)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always false; an empty catalog cannot be built.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All templates, in catalog order.
    pub fn templates(&self) -> &[Mission] {
        &self.templates
    }
}

impl Default for MissionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandomness;

    fn pirate_hunt() -> Mission {
        Mission::combat("Space Pirate Hunt", "Jupiter", "Pirate", "Hunt.", 300)
    }

    #[test]
    fn target_location_normalized() {
        assert_eq!(pirate_hunt().target_location(), "jupiter");
    }

    #[test]
    fn combat_mission_needs_enemy() {
        let mut m = pirate_hunt();
        assert!(!m.check_completion("jupiter", None));
        assert!(!m.check_completion("jupiter", Some("Scout")));
        assert!(!m.check_completion("mars", Some("Pirate")));
        assert!(m.check_completion("JUPITER", Some("pirate")));
        assert!(m.is_completed());
    }

    #[test]
    fn exploration_mission_completes_on_location() {
        let mut m = Mission::exploration("Mars Investigation", "mars", "Look.", 250);
        assert!(m.is_exploration());
        assert!(!m.check_completion("earth", None));
        assert!(m.check_completion("Mars", None));
    }

    #[test]
    fn exploration_mission_completes_after_any_fight_at_target() {
        let mut m = Mission::exploration("Mars Investigation", "mars", "Look.", 250);
        assert!(m.check_completion("mars", Some("Raider")));
    }

    #[test]
    fn completion_is_cached() {
        let mut m = pirate_hunt();
        assert!(m.check_completion("jupiter", Some("Pirate")));
        assert!(m.check_completion("earth", None));
        assert!(m.is_completed());
    }

    #[test]
    fn display_combat_mission() {
        let text = pirate_hunt().to_string();
        assert_eq!(
            text,
            "Space Pirate Hunt\nDescription: Hunt.\nTarget Location: jupiter\nTarget Enemy: Pirate\nReward: 300 points"
        );
    }

    #[test]
    fn display_exploration_mission() {
        let text = Mission::exploration("Saturn Survey", "saturn", "Rings.", 325).to_string();
        assert!(!text.contains("Target Enemy"));
        assert!(text.ends_with("Reward: 325 points"));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            MissionCatalog::new(vec![]),
            Err(GameError::EmptyCatalog)
        ));
    }

    #[test]
    fn standard_catalog() {
        let catalog = MissionCatalog::standard();
        assert_eq!(catalog.len(), 10);
        let exploration = catalog
            .templates()
            .iter()
            .filter(|m| m.is_exploration())
            .count();
        assert_eq!(exploration, 5);
        assert_eq!(
            catalog.find("Colony Defense").map(Mission::reward),
            Some(400)
        );
    }

    #[test]
    fn draw_uses_next_int() {
        let catalog = MissionCatalog::standard();
        let mut rng = ScriptedRandomness::new().with_ints([6]);
        assert_eq!(catalog.draw(&mut rng).title(), "Mars Investigation");
    }

    #[test]
    fn draws_are_with_replacement() {
        let catalog = MissionCatalog::standard();
        let mut rng = ScriptedRandomness::new().with_ints([0, 0]);
        let mut first = catalog.draw(&mut rng);
        assert!(first.check_completion("jupiter", Some("Pirate")));
        let second = catalog.draw(&mut rng);
        assert_eq!(second.title(), "Space Pirate Hunt");
        assert!(!second.is_completed());
    }
}
