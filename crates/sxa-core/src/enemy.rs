use std::fmt;

/// A hostile entity stationed at a location.
///
/// Health never drops below zero, and an enemy counts as defeated exactly
/// when its current health is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    name: String,
    max_health: u32,
    current_health: u32,
    attack_power: u32,
    defeated: bool,
}

impl Enemy {
    /// Create an enemy at full health.
    pub fn new(name: impl Into<String>, health: u32, attack_power: u32) -> Self {
        Self::with_health(name, health, health, attack_power)
    }

    /// Create an enemy with explicit current health (clamped to `max_health`).
    ///
    /// Used when restoring a saved roster where enemies may be wounded.
    pub fn with_health(
        name: impl Into<String>,
        max_health: u32,
        current_health: u32,
        attack_power: u32,
    ) -> Self {
        let current_health = current_health.min(max_health);
        Self {
            name: name.into(),
            max_health,
            current_health,
            attack_power,
            defeated: current_health == 0,
        }
    }

    /// Apply damage. Health saturates at zero, which marks the enemy defeated.
    pub fn take_damage(&mut self, damage: u32) {
        self.current_health = self.current_health.saturating_sub(damage);
        if self.current_health == 0 {
            self.defeated = true;
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Health at full strength.
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Remaining health.
    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    /// Base damage dealt per retaliation.
    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    /// Whether the enemy has been reduced to zero health.
    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Remaining health as a whole percentage (0-100).
    pub fn health_percentage(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        (u64::from(self.current_health) * 100 / u64::from(self.max_health)) as u32
    }

    /// Case-insensitive substring match against the enemy's name.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }
}

impl fmt::Display for Enemy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Health: {}/{}, Attack: {})",
            self.name, self.current_health, self.max_health, self.attack_power
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_enemy_is_at_full_health() {
        let enemy = Enemy::new("Pirate", 80, 20);
        assert_eq!(enemy.current_health(), 80);
        assert_eq!(enemy.max_health(), 80);
        assert!(!enemy.is_defeated());
        assert_eq!(enemy.health_percentage(), 100);
    }

    #[test]
    fn overkill_clamps_to_zero() {
        let mut enemy = Enemy::new("Scout", 30, 10);
        enemy.take_damage(48);
        assert_eq!(enemy.current_health(), 0);
        assert!(enemy.is_defeated());
    }

    #[test]
    fn with_health_clamps_and_derives_defeated() {
        let wounded = Enemy::with_health("Raider", 50, 70, 12);
        assert_eq!(wounded.current_health(), 50);
        assert!(!wounded.is_defeated());

        let dead = Enemy::with_health("Raider", 50, 0, 12);
        assert!(dead.is_defeated());
    }

    #[test]
    fn display_matches_roster_format() {
        let mut enemy = Enemy::new("Pirate", 80, 20);
        enemy.take_damage(15);
        assert_eq!(enemy.to_string(), "Pirate (Health: 65/80, Attack: 20)");
    }

    #[test]
    fn name_contains_is_case_insensitive() {
        let enemy = Enemy::new("Space Pirate", 80, 20);
        assert!(enemy.name_contains("pirate"));
        assert!(enemy.name_contains("SPACE"));
        assert!(!enemy.name_contains("scout"));
    }

    #[test]
    fn zero_max_health_percentage() {
        let enemy = Enemy::new("Ghost", 0, 1);
        assert_eq!(enemy.health_percentage(), 0);
        assert!(enemy.is_defeated());
    }

    proptest! {
        #[test]
        fn damage_saturates_and_tracks_defeat(health in 0u32..500, hits in prop::collection::vec(0u32..200, 0..10)) {
            let mut enemy = Enemy::new("Target", health, 10);
            for d in hits {
                let before = enemy.current_health();
                enemy.take_damage(d);
                prop_assert_eq!(enemy.current_health(), before.saturating_sub(d));
                prop_assert_eq!(enemy.is_defeated(), enemy.current_health() == 0);
                prop_assert!(enemy.current_health() <= enemy.max_health());
            }
        }
    }
}
