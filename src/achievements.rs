//! End-of-round achievements
//!
//! Earned achievements are counted across rounds and persisted as a JSON map
//! of `{"KEY": count}` under `achievementStats`.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};
use crate::sim::GameStats;

const STORAGE_KEY: &str = "achievementStats";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Achievement {
    SharpShooter,
    SpeedDemon,
    ComboMaster,
    BabyBoss,
    HumanHero,
    DestructionKing,
    PerfectRound,
}

impl Achievement {
    pub const ALL: [Achievement; 7] = [
        Achievement::SharpShooter,
        Achievement::SpeedDemon,
        Achievement::ComboMaster,
        Achievement::BabyBoss,
        Achievement::HumanHero,
        Achievement::DestructionKing,
        Achievement::PerfectRound,
    ];

    /// Storage key
    pub fn key(&self) -> &'static str {
        match self {
            Achievement::SharpShooter => "SHARP_SHOOTER",
            Achievement::SpeedDemon => "SPEED_DEMON",
            Achievement::ComboMaster => "COMBO_MASTER",
            Achievement::BabyBoss => "BABY_BOSS",
            Achievement::HumanHero => "HUMAN_HERO",
            Achievement::DestructionKing => "DESTRUCTION_KING",
            Achievement::PerfectRound => "PERFECT_ROUND",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Achievement::SharpShooter => "🎯",
            Achievement::SpeedDemon => "⚡",
            Achievement::ComboMaster => "🔥",
            Achievement::BabyBoss => "👶",
            Achievement::HumanHero => "🦸",
            Achievement::DestructionKing => "💥",
            Achievement::PerfectRound => "✨",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::SharpShooter => "Sharp Shooter",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::ComboMaster => "Combo Master",
            Achievement::BabyBoss => "Baby Boss",
            Achievement::HumanHero => "Human Hero",
            Achievement::DestructionKing => "Destruction King",
            Achievement::PerfectRound => "Perfect Round",
        }
    }

    pub fn requirement(&self) -> &'static str {
        match self {
            Achievement::SharpShooter => "Achieve 80%+ accuracy",
            Achievement::SpeedDemon => "Hit a target in under 2 seconds",
            Achievement::ComboMaster => "Get a 5x combo",
            Achievement::BabyBoss => "Launch 10 babies successfully",
            Achievement::HumanHero => "Destroy 10 Cybertrucks",
            Achievement::DestructionKing => "Cause $1M+ in damage",
            Achievement::PerfectRound => "No ground hits in a game",
        }
    }

    /// Whether a finished round earns this achievement
    pub fn is_earned(&self, stats: &GameStats, best_combo: u32) -> bool {
        match self {
            Achievement::SharpShooter => stats.accuracy >= 80,
            Achievement::SpeedDemon => stats.has_hit() && stats.fastest_hit <= 2.0,
            Achievement::ComboMaster => best_combo >= 5,
            Achievement::BabyBoss => stats.baby.target_hits >= 10,
            Achievement::HumanHero => stats.human.trucks_destroyed >= 10,
            Achievement::DestructionKing => stats.human.property_damage >= 1_000_000,
            Achievement::PerfectRound => stats.ground_hits == 0,
        }
    }
}

/// All achievements a finished round earns, in display order
pub fn earned(stats: &GameStats, best_combo: u32) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| a.is_earned(stats, best_combo))
        .collect()
}

/// Lifetime earn counts
pub struct AchievementLedger {
    counts: BTreeMap<String, u32>,
    store: Rc<dyn KeyValueStore>,
}

impl AchievementLedger {
    /// Load counts, seeding every key with 0 on first run
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let counts = match persistence::load_json::<BTreeMap<String, u32>>(&*store, STORAGE_KEY) {
            Ok(Some(counts)) => counts,
            Ok(None) => {
                let counts: BTreeMap<String, u32> = Achievement::ALL
                    .iter()
                    .map(|a| (a.key().to_string(), 0))
                    .collect();
                if let Err(e) = persistence::save_json(&*store, STORAGE_KEY, &counts) {
                    log::error!("Error saving achievement stats: {e}");
                }
                counts
            }
            Err(e) => {
                log::error!("Error loading achievement stats: {e}");
                BTreeMap::new()
            }
        };
        Self { counts, store }
    }

    /// Bump the count of each earned achievement and save
    pub fn record(&mut self, earned: &[Achievement]) {
        for a in earned {
            *self.counts.entry(a.key().to_string()).or_insert(0) += 1;
        }
        if let Err(e) = persistence::save_json(&*self.store, STORAGE_KEY, &self.counts) {
            log::error!("Error saving achievement stats: {e}");
        }
    }

    /// Times `achievement` has been earned
    pub fn count(&self, achievement: Achievement) -> u32 {
        self.counts.get(achievement.key()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::persistence::testing::BrokenStore;

    #[test]
    fn test_perfect_fast_round() {
        let stats = GameStats {
            accuracy: 100,
            fastest_hit: 1.5,
            target_hits: 9,
            ..Default::default()
        };
        assert_eq!(
            earned(&stats, 5),
            vec![
                Achievement::SharpShooter,
                Achievement::SpeedDemon,
                Achievement::ComboMaster,
                Achievement::PerfectRound,
            ]
        );
    }

    #[test]
    fn test_speed_demon_needs_a_hit() {
        let stats = GameStats::default();
        assert!(!Achievement::SpeedDemon.is_earned(&stats, 0));
    }

    #[test]
    fn test_variant_achievements() {
        let mut stats = GameStats {
            ground_hits: 3,
            ..Default::default()
        };
        stats.baby.target_hits = 10;
        stats.human.trucks_destroyed = 10;
        stats.human.property_damage = 1_000_000;
        let got = earned(&stats, 0);
        assert!(got.contains(&Achievement::BabyBoss));
        assert!(got.contains(&Achievement::HumanHero));
        assert!(got.contains(&Achievement::DestructionKing));
        assert!(!got.contains(&Achievement::PerfectRound));
    }

    #[test]
    fn test_ledger_seeds_and_counts() {
        let store = Rc::new(MemoryStore::new());
        let mut ledger = AchievementLedger::load(store.clone());
        assert_eq!(ledger.count(Achievement::ComboMaster), 0);
        assert!(!store.is_empty());

        ledger.record(&[Achievement::ComboMaster, Achievement::PerfectRound]);
        ledger.record(&[Achievement::ComboMaster]);
        assert_eq!(ledger.count(Achievement::ComboMaster), 2);

        let reloaded = AchievementLedger::load(store);
        assert_eq!(reloaded.count(Achievement::ComboMaster), 2);
        assert_eq!(reloaded.count(Achievement::PerfectRound), 1);
        assert_eq!(reloaded.count(Achievement::BabyBoss), 0);
    }

    #[test]
    fn test_ledger_survives_broken_store() {
        let mut ledger = AchievementLedger::load(Rc::new(BrokenStore));
        ledger.record(&[Achievement::SharpShooter]);
        assert_eq!(ledger.count(Achievement::SharpShooter), 1);
    }

    #[test]
    fn test_serde_keys_match_storage_keys() {
        for a in Achievement::ALL {
            assert_eq!(serde_json::to_string(&a).unwrap(), format!("\"{}\"", a.key()));
        }
    }
}
