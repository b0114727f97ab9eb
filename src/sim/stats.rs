//! Per-round statistics shown on the win screen

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectiles::ProjectileKind;

/// Extra counters for human shots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanStats {
    pub launched: u32,
    pub trucks_destroyed: u32,
    pub insurance_claims: u32,
    /// Dollars, randomized per hit
    pub property_damage: u64,
}

/// Extra counters for baby shots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabyStats {
    pub launched: u32,
    pub ground_splats: u32,
    pub target_hits: u32,
    /// Seconds, randomized per shot
    pub total_crying_time: f32,
}

/// Cumulative stats for one round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    /// Percent of shots that hit, filled in at round end
    pub accuracy: u32,
    /// Seconds from launch to impact of the quickest hit (0 = no hit yet)
    pub fastest_hit: f32,
    pub target_hits: u32,
    /// Misses, including shots that left the screen sideways
    pub ground_hits: u32,
    pub human: HumanStats,
    pub baby: BabyStats,
}

impl GameStats {
    /// Record the outcome of one shot
    pub fn record<R: Rng>(&mut self, hit: bool, kind: ProjectileKind, hit_time: f32, rng: &mut R) {
        if hit {
            self.target_hits += 1;
            if self.fastest_hit == 0.0 || hit_time < self.fastest_hit {
                self.fastest_hit = hit_time;
            }
            match kind {
                ProjectileKind::Human => {
                    self.human.launched += 1;
                    self.human.trucks_destroyed += 1;
                    self.human.insurance_claims += 1;
                    self.human.property_damage += rng.random_range(0..=50_000u64) + 10_000;
                }
                ProjectileKind::Baby => {
                    self.baby.launched += 1;
                    self.baby.target_hits += 1;
                    self.baby.total_crying_time += rng.random_range(1.0..3.0);
                }
            }
        } else {
            self.ground_hits += 1;
            match kind {
                ProjectileKind::Human => self.human.launched += 1,
                ProjectileKind::Baby => {
                    self.baby.launched += 1;
                    self.baby.ground_splats += 1;
                    self.baby.total_crying_time += rng.random_range(2.0..7.0);
                }
            }
        }
    }

    /// Rounded hit percentage; 0 when nothing was fired
    pub fn compute_accuracy(&self) -> u32 {
        let shots = self.target_hits + self.ground_hits;
        if shots == 0 {
            return 0;
        }
        (self.target_hits as f64 / shots as f64 * 100.0).round() as u32
    }

    pub fn has_hit(&self) -> bool {
        self.target_hits > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fastest_hit_tracks_minimum() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut stats = GameStats::default();
        stats.record(true, ProjectileKind::Human, 2.5, &mut rng);
        assert_eq!(stats.fastest_hit, 2.5);
        stats.record(true, ProjectileKind::Human, 3.0, &mut rng);
        assert_eq!(stats.fastest_hit, 2.5);
        stats.record(true, ProjectileKind::Baby, 1.25, &mut rng);
        assert_eq!(stats.fastest_hit, 1.25);
        // Misses never touch it
        stats.record(false, ProjectileKind::Baby, 0.0, &mut rng);
        assert_eq!(stats.fastest_hit, 1.25);
    }

    #[test]
    fn test_variant_counters() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut stats = GameStats::default();
        stats.record(true, ProjectileKind::Human, 1.0, &mut rng);
        stats.record(false, ProjectileKind::Human, 0.0, &mut rng);
        stats.record(true, ProjectileKind::Baby, 1.0, &mut rng);
        stats.record(false, ProjectileKind::Baby, 0.0, &mut rng);

        assert_eq!(stats.target_hits, 2);
        assert_eq!(stats.ground_hits, 2);
        assert_eq!(stats.human.launched, 2);
        assert_eq!(stats.human.trucks_destroyed, 1);
        assert_eq!(stats.human.insurance_claims, 1);
        assert!((10_000..=60_000).contains(&stats.human.property_damage));
        assert_eq!(stats.baby.launched, 2);
        assert_eq!(stats.baby.target_hits, 1);
        assert_eq!(stats.baby.ground_splats, 1);
        assert!(stats.baby.total_crying_time >= 3.0 && stats.baby.total_crying_time < 10.0);
    }

    #[test]
    fn test_accuracy() {
        let mut stats = GameStats::default();
        assert_eq!(stats.compute_accuracy(), 0);
        stats.target_hits = 2;
        stats.ground_hits = 1;
        assert_eq!(stats.compute_accuracy(), 67);
        stats.ground_hits = 0;
        assert_eq!(stats.compute_accuracy(), 100);
    }
}
