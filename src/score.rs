//! Score, high score and combo multiplier
//!
//! Hits within `COMBO_WINDOW_MS` of each other build a combo; the combo picks
//! the multiplier. The high score is written through to storage the moment it
//! is beaten. Storage trouble is logged and otherwise ignored.

use serde::{Deserialize, Serialize};

use crate::consts::COMBO_WINDOW_MS;
use crate::iso8601;
use crate::persistence::{self, Stores};

/// Primary-store key for the JSON high score record
const SCORES_KEY: &str = "gameScores";
/// Fallback-store key for the bare high score
const HIGH_SCORE_KEY: &str = "highScore";

/// Persisted high score record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreRecord {
    pub high_score: u64,
    /// ISO8601
    pub last_updated: String,
}

/// Read-only view for the HUD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreData {
    pub current_score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub multiplier: f32,
    /// Longest combo this round
    pub best_combo: u32,
}

/// Multiplier for a combo count
pub fn multiplier_for_combo(combo: u32) -> f32 {
    match combo {
        5.. => 4.0,
        3..=4 => 2.0,
        2 => 1.5,
        _ => 1.0,
    }
}

/// Bonus for hitting far from the launcher: 50 per full 100 pixels
pub fn distance_bonus(distance: f32) -> u32 {
    ((distance.max(0.0) / 100.0).floor() as u32).saturating_mul(50)
}

pub struct ScoreManager {
    current_score: u64,
    high_score: u64,
    combo: u32,
    best_combo: u32,
    multiplier: f32,
    last_hit_ms: Option<f64>,
    stores: Stores,
}

impl ScoreManager {
    /// Create a score manager, loading the saved high score
    pub fn new(stores: Stores) -> Self {
        let high_score = load_high_score(&stores);
        Self {
            current_score: 0,
            high_score,
            combo: 0,
            best_combo: 0,
            multiplier: 1.0,
            last_hit_ms: None,
            stores,
        }
    }

    /// Award a hit. Returns the points actually added (after the multiplier).
    pub fn add_points(&mut self, base_points: u32, distance: f32, now_ms: f64) -> u32 {
        let combo_expired = self
            .last_hit_ms
            .is_none_or(|last| now_ms - last > COMBO_WINDOW_MS);
        if combo_expired {
            self.reset_combo();
        }

        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);
        self.multiplier = multiplier_for_combo(self.combo);
        self.last_hit_ms = Some(now_ms);

        let earned = base_points.saturating_add(distance_bonus(distance));
        let total = (earned as f32 * self.multiplier).floor() as u32;
        self.current_score += u64::from(total);

        if self.current_score > self.high_score {
            self.high_score = self.current_score;
            self.persist_high_score(now_ms);
        }

        total
    }

    /// A shot missed: the streak is over
    pub fn reset_combo_on_miss(&mut self) {
        self.reset_combo();
    }

    fn reset_combo(&mut self) {
        self.combo = 0;
        self.multiplier = 1.0;
    }

    /// Persist the current score if it beats the high score. Returns whether it did.
    pub fn save_high_score(&mut self, now_ms: f64) -> bool {
        if self.current_score > self.high_score {
            self.high_score = self.current_score;
            self.persist_high_score(now_ms);
            log::info!("New high score: {}", self.high_score);
            return true;
        }
        false
    }

    /// Zero the score for a new round
    pub fn reset_score(&mut self, now_ms: f64) {
        self.save_high_score(now_ms);
        self.current_score = 0;
        self.best_combo = 0;
        self.last_hit_ms = None;
        self.reset_combo();
    }

    pub fn score_data(&self) -> ScoreData {
        ScoreData {
            current_score: self.current_score,
            high_score: self.high_score,
            combo: self.combo,
            multiplier: self.multiplier,
            best_combo: self.best_combo,
        }
    }

    pub fn current_score(&self) -> u64 {
        self.current_score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    fn persist_high_score(&self, now_ms: f64) {
        let record = HighScoreRecord {
            high_score: self.high_score,
            last_updated: iso8601(now_ms),
        };
        if let Err(e) = persistence::save_json(&*self.stores.primary, SCORES_KEY, &record) {
            log::error!("Error saving high score: {e}");
        }
        // Always mirror into the fallback so a broken primary still has a copy
        if let Err(e) = self
            .stores
            .fallback
            .set(HIGH_SCORE_KEY, &self.high_score.to_string())
        {
            log::warn!("Error saving high score backup: {e}");
        }
    }
}

/// Load the high score: primary record first, then the fallback, else 0
pub fn load_high_score(stores: &Stores) -> u64 {
    match persistence::load_json::<HighScoreRecord>(&*stores.primary, SCORES_KEY) {
        Ok(Some(record)) => return record.high_score,
        Ok(None) => {}
        Err(e) => log::error!("Error loading high score: {e}"),
    }

    match stores.fallback.get(HIGH_SCORE_KEY) {
        Ok(Some(value)) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unreadable high score backup: {value:?}");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            log::warn!("Error loading high score backup: {e}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::testing::BrokenStore;
    use crate::persistence::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn manager() -> ScoreManager {
        ScoreManager::new(Stores::in_memory())
    }

    #[test]
    fn test_combo_multiplier_sequence() {
        let mut sm = manager();
        let expected = [1.0, 1.5, 2.0, 2.0, 4.0, 4.0];
        for (i, want) in expected.iter().enumerate() {
            sm.add_points(100, 0.0, i as f64 * 1000.0);
            assert_eq!(sm.multiplier(), *want, "after hit {}", i + 1);
        }
        assert_eq!(sm.combo(), 6);
        assert_eq!(sm.best_combo(), 6);
    }

    #[test]
    fn test_base_and_distance_points() {
        let mut sm = manager();
        assert_eq!(sm.add_points(100, 0.0, 0.0), 100);
        sm.reset_combo_on_miss();
        assert_eq!(sm.add_points(100, 250.0, 100.0), 200);
        assert_eq!(sm.current_score(), 300);
    }

    #[test]
    fn test_huge_distance_saturates() {
        assert_eq!(distance_bonus(1e12), u32::MAX);
        assert_eq!(distance_bonus(-5.0), 0);
        let mut sm = manager();
        assert_eq!(sm.add_points(u32::MAX, 1e12, 0.0), u32::MAX);
        assert_eq!(sm.current_score(), u64::from(u32::MAX));
    }

    #[test]
    fn test_multiplier_applies_to_total() {
        let mut sm = manager();
        sm.add_points(100, 0.0, 0.0);
        // second hit: (101 + 50) * 1.5 = 226.5 -> 226
        assert_eq!(sm.add_points(101, 150.0, 10.0), 226);
    }

    #[test]
    fn test_miss_resets_combo() {
        let mut sm = manager();
        for i in 0..4 {
            sm.add_points(100, 0.0, i as f64);
        }
        assert_eq!(sm.multiplier(), 2.0);
        sm.reset_combo_on_miss();
        assert_eq!(sm.combo(), 0);
        assert_eq!(sm.multiplier(), 1.0);
        assert_eq!(sm.add_points(100, 0.0, 10.0), 100);
        // Best combo survives the miss
        assert_eq!(sm.best_combo(), 4);
    }

    #[test]
    fn test_combo_window_expires() {
        let mut sm = manager();
        sm.add_points(100, 0.0, 0.0);
        sm.add_points(100, 0.0, 5000.0);
        assert_eq!(sm.combo(), 2);
        // 5001 ms after the last hit is outside the window
        assert_eq!(sm.add_points(100, 0.0, 10_001.0), 100);
        assert_eq!(sm.combo(), 1);
    }

    #[test]
    fn test_high_score_persisted_to_both_stores() {
        let primary = Rc::new(MemoryStore::new());
        let fallback = Rc::new(MemoryStore::new());
        let stores = Stores::new(primary.clone(), fallback.clone());

        let mut sm = ScoreManager::new(stores.clone());
        assert_eq!(sm.high_score(), 0);
        sm.add_points(300, 0.0, 1_700_000_000_000.0);
        assert_eq!(sm.high_score(), 300);

        let record: HighScoreRecord = persistence::load_json(&*primary, SCORES_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(record.high_score, 300);
        assert_eq!(record.last_updated, "2023-11-14T22:13:20.000Z");
        assert_eq!(fallback.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("300"));

        // A new manager picks it up
        assert_eq!(ScoreManager::new(stores).high_score(), 300);
    }

    #[test]
    fn test_high_score_record_format() {
        let json = serde_json::to_string(&HighScoreRecord {
            high_score: 5,
            last_updated: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"highScore":5,"lastUpdated":"x"}"#);
    }

    #[test]
    fn test_load_falls_back_when_primary_broken_or_corrupt() {
        let fallback = Rc::new(MemoryStore::new());
        fallback.set(HIGH_SCORE_KEY, "1234").unwrap();

        let stores = Stores::new(Rc::new(BrokenStore), fallback.clone());
        assert_eq!(load_high_score(&stores), 1234);

        let corrupt = Rc::new(MemoryStore::new());
        corrupt.set(SCORES_KEY, "{{{").unwrap();
        let stores = Stores::new(corrupt, fallback);
        assert_eq!(load_high_score(&stores), 1234);
    }

    #[test]
    fn test_everything_broken_defaults_to_zero() {
        let stores = Stores::new(Rc::new(BrokenStore), Rc::new(BrokenStore));
        let mut sm = ScoreManager::new(stores);
        assert_eq!(sm.high_score(), 0);
        // Saving must not panic
        assert_eq!(sm.add_points(100, 0.0, 0.0), 100);
        assert_eq!(sm.high_score(), 100);
    }

    #[test]
    fn test_reset_score() {
        let mut sm = manager();
        sm.add_points(100, 0.0, 0.0);
        sm.add_points(100, 0.0, 1.0);
        sm.reset_score(2.0);
        let data = sm.score_data();
        assert_eq!(data.current_score, 0);
        assert_eq!(data.high_score, 250);
        assert_eq!(data.combo, 0);
        assert_eq!(data.best_combo, 0);
        assert_eq!(data.multiplier, 1.0);
    }
}
