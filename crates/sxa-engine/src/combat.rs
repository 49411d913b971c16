//! Combat resolution.
//!
//! A fight is a loop of exchanges: the player strikes, and if the enemy
//! survives it strikes back against the player's energy. The loop ends when
//! the enemy falls or the player's energy drops below the combat threshold.
//! The threshold is only a gate; it is never deducted itself.

use sxa_core::Enemy;

use crate::error::{ActionKind, GameError, GameResult};
use crate::random::Randomness;

/// Base player damage per strike.
const BASE_DAMAGE: u32 = 15;
/// Exclusive upper bound of the random bonus added to each strike.
const DAMAGE_SPREAD: u32 = 10;
/// Chance that a strike lands as a critical hit (double damage).
const CRITICAL_CHANCE: f64 = 0.2;
/// Minimum damage an enemy deals when it retaliates.
const MIN_ENEMY_DAMAGE: i32 = 5;

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The enemy was defeated.
    Victory,
    /// The player ran out of energy to keep fighting.
    Defeat,
}

/// One exchange of blows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatRound {
    /// Damage the player dealt.
    pub player_damage: u32,
    /// Whether the strike was a critical hit.
    pub critical: bool,
    /// Damage the enemy dealt back, if it survived the strike.
    pub enemy_damage: Option<i32>,
    /// Enemy health percentage after the exchange.
    pub enemy_health_pct: u32,
    /// Player energy after the exchange.
    pub energy_after: i32,
}

/// Full record of a fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatReport {
    /// Name of the enemy fought.
    pub enemy: String,
    /// Every exchange, in order.
    pub rounds: Vec<CombatRound>,
    /// How the fight ended.
    pub outcome: CombatOutcome,
}

impl CombatReport {
    /// Total damage the player dealt.
    pub fn damage_dealt(&self) -> u32 {
        self.rounds.iter().map(|r| r.player_damage).sum()
    }

    /// Total damage the player took.
    pub fn damage_taken(&self) -> i32 {
        self.rounds.iter().filter_map(|r| r.enemy_damage).sum()
    }
}

/// Resolves fights between the player and one enemy.
#[derive(Debug, Clone, Copy)]
pub struct CombatResolver {
    combat_cost: i32,
}

impl CombatResolver {
    /// Create a resolver with the given energy threshold.
    pub fn new(combat_cost: i32) -> Self {
        Self { combat_cost }
    }

    /// The energy needed to start or continue a fight.
    pub fn combat_cost(&self) -> i32 {
        self.combat_cost
    }

    /// Fight `enemy` to a conclusion.
    ///
    /// Fails without touching anything if `energy` is below the combat
    /// threshold. Otherwise mutates the enemy's health and the player's
    /// energy in place and returns the round-by-round report.
    pub fn resolve(
        &self,
        enemy: &mut Enemy,
        energy: &mut i32,
        rng: &mut dyn Randomness,
    ) -> GameResult<CombatReport> {
        if *energy < self.combat_cost {
            return Err(GameError::InsufficientEnergy {
                action: ActionKind::Combat,
                required: self.combat_cost,
                available: *energy,
            });
        }

        let mut rounds = Vec::new();
        while !enemy.is_defeated() && *energy >= self.combat_cost {
            let (player_damage, critical) = player_strike(rng);
            enemy.take_damage(player_damage);

            let enemy_damage = if enemy.is_defeated() {
                None
            } else {
                let damage = enemy_strike(enemy, rng);
                *energy -= damage;
                Some(damage)
            };

            rounds.push(CombatRound {
                player_damage,
                critical,
                enemy_damage,
                enemy_health_pct: enemy.health_percentage(),
                energy_after: *energy,
            });
        }

        let outcome = if enemy.is_defeated() {
            CombatOutcome::Victory
        } else {
            CombatOutcome::Defeat
        };

        tracing::debug!(
            enemy = enemy.name(),
            rounds = rounds.len(),
            ?outcome,
            energy = *energy,
            "combat resolved"
        );

        Ok(CombatReport {
            enemy: enemy.name().to_string(),
            rounds,
            outcome,
        })
    }
}

fn player_strike(rng: &mut dyn Randomness) -> (u32, bool) {
    let base = BASE_DAMAGE + rng.next_int(DAMAGE_SPREAD);
    let critical = rng.next_float() < CRITICAL_CHANCE;
    if critical {
        (base * 2, true)
    } else {
        (base, false)
    }
}

fn enemy_strike(enemy: &Enemy, rng: &mut dyn Randomness) -> i32 {
    let attack = i32::try_from(enemy.attack_power()).unwrap_or(i32::MAX);
    let roll = rng.next_int(DAMAGE_SPREAD) as i32;
    attack.saturating_add(roll - 5).max(MIN_ENEMY_DAMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandomness;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fight(
        enemy: &mut Enemy,
        energy: &mut i32,
        rng: &mut dyn Randomness,
    ) -> GameResult<CombatReport> {
        CombatResolver::new(15).resolve(enemy, energy, rng)
    }

    #[test]
    fn rejects_low_energy_without_mutation() {
        let mut enemy = Enemy::new("Pirate", 80, 20);
        let mut energy = 14;
        let mut rng = ScriptedRandomness::new();
        let err = fight(&mut enemy, &mut energy, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientEnergy {
                action: ActionKind::Combat,
                required: 15,
                available: 14,
            }
        ));
        assert_eq!(energy, 14);
        assert_eq!(enemy.current_health(), 80);
    }

    #[test]
    fn one_hit_kill_costs_nothing() {
        let mut enemy = Enemy::new("Drone", 20, 30);
        let mut energy = 80;
        // 15 + 9 = 24 damage, no critical
        let mut rng = ScriptedRandomness::new().with_ints([9]).with_floats([0.5]);
        let report = fight(&mut enemy, &mut energy, &mut rng).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Victory);
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.rounds[0].enemy_damage, None);
        assert_eq!(energy, 80);
        assert!(enemy.is_defeated());
    }

    #[test]
    fn critical_doubles_damage() {
        let mut enemy = Enemy::new("Brute", 100, 10);
        let mut energy = 100;
        // strike 1: 15+5 crit = 40; enemy 10+0-5 -> 5 (floor)
        // strike 2: 15+5 crit = 40; enemy 10+9-5 = 14
        // strike 3: 15+5 crit = 40 -> dead
        let mut rng = ScriptedRandomness::new()
            .with_ints([5, 0, 5, 9, 5])
            .with_floats([0.1, 0.1, 0.1]);
        let report = fight(&mut enemy, &mut energy, &mut rng).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Victory);
        assert_eq!(report.rounds.len(), 3);
        assert!(report.rounds.iter().all(|r| r.critical));
        assert!(report.rounds.iter().all(|r| r.player_damage == 40));
        assert_eq!(report.rounds[0].enemy_damage, Some(5));
        assert_eq!(report.rounds[1].enemy_damage, Some(14));
        assert_eq!(report.rounds[0].enemy_health_pct, 60);
        assert_eq!(report.damage_taken(), 19);
        assert_eq!(energy, 81);
    }

    #[test]
    fn defeat_when_energy_drops_below_threshold() {
        let mut enemy = Enemy::new("Leviathan", 500, 40);
        let mut energy = 50;
        // every strike 15 damage, every retaliation 40 + 9 - 5 = 44
        let mut rng = ScriptedRandomness::new().with_ints([0, 9, 0, 9]);
        let report = fight(&mut enemy, &mut energy, &mut rng).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Defeat);
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(energy, 6);
        assert_eq!(enemy.current_health(), 485);
        assert!(!enemy.is_defeated());
    }

    #[test]
    fn energy_can_go_negative() {
        let mut enemy = Enemy::new("Leviathan", 500, 40);
        let mut energy = 20;
        let mut rng = ScriptedRandomness::new().with_ints([0, 9]);
        let report = fight(&mut enemy, &mut energy, &mut rng).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Defeat);
        assert_eq!(energy, -24);
    }

    #[test]
    fn same_seed_same_fight() {
        let run = || {
            let mut enemy = Enemy::new("Warrior", 120, 18);
            let mut energy = 100;
            let mut rng = StdRng::seed_from_u64(42);
            let report = fight(&mut enemy, &mut energy, &mut rng).unwrap();
            (report, energy, enemy.current_health())
        };
        assert_eq!(run(), run());
    }

    proptest! {
        #[test]
        fn enemy_health_and_defeat_stay_consistent(
            health in 1u32..400,
            attack in 0u32..60,
            energy in 15i32..200,
            seed in any::<u64>(),
        ) {
            let mut enemy = Enemy::new("Target", health, attack);
            let mut energy = energy;
            let mut rng = StdRng::seed_from_u64(seed);
            let report = fight(&mut enemy, &mut energy, &mut rng).unwrap();

            prop_assert!(enemy.current_health() <= enemy.max_health());
            prop_assert_eq!(enemy.is_defeated(), enemy.current_health() == 0);
            match report.outcome {
                CombatOutcome::Victory => prop_assert!(enemy.is_defeated()),
                CombatOutcome::Defeat => prop_assert!(energy < 15),
            }
            for round in &report.rounds {
                if let Some(d) = round.enemy_damage {
                    prop_assert!(d >= 5);
                }
            }
        }
    }
}
