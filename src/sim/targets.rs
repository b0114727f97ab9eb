//! Target layout, round statistics and round completion
//!
//! The target manager is the only thing that adds or removes targets. A round
//! ends when the last target is removed; the summary is handed out exactly
//! once per round.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::projectiles::ProjectileKind;
use super::stats::GameStats;
use super::vector::Vector2D;
use crate::consts::*;
use crate::score::ScoreData;

/// Rectangle targets are placed in, plus the spacing rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    /// Accepted targets are strictly farther apart than this
    pub min_spacing: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            min_x: 200.0,
            max_x: 700.0,
            min_y: 50.0,
            max_y: 300.0,
            min_spacing: 80.0,
        }
    }
}

/// A target to hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    /// Center
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score_value: u32,
}

impl Target {
    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }

    /// Radius within which a projectile center counts as a hit
    pub fn hitbox_radius(&self) -> f32 {
        self.width.min(self.height) * COLLISION_THRESHOLD
    }
}

/// Everything the win screen needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub final_score: u64,
    pub high_score: u64,
    pub best_combo: u32,
    pub stats: GameStats,
}

/// Rejection-sample up to `count` points inside `area`.
///
/// Gives up after `attempts` draws, so fewer than `count` points may come back.
/// An area with no width or no height yields nothing.
pub fn place_points<R: Rng>(area: &PlayArea, count: usize, attempts: usize, rng: &mut R) -> Vec<Vector2D> {
    let mut points: Vec<Vector2D> = Vec::with_capacity(count);
    if area.min_x >= area.max_x || area.min_y >= area.max_y {
        return points;
    }

    for _ in 0..attempts {
        if points.len() >= count {
            break;
        }
        let candidate = Vector2D::new(
            rng.random_range(area.min_x..area.max_x),
            rng.random_range(area.min_y..area.max_y),
        );
        if points
            .iter()
            .all(|p| p.distance_to(candidate) > area.min_spacing)
        {
            points.push(candidate);
        }
    }

    points
}

/// Score for a target at `pos`: higher up and farther from the launcher is worth more
pub fn target_score<R: Rng>(area: &PlayArea, pos: Vector2D, rng: &mut R) -> u32 {
    let height_multiplier = 1.0 - (pos.y - area.min_y) / (area.max_y - area.min_y);
    let distance_multiplier = pos.distance_to(Vector2D::new(LAUNCH_X, LAUNCH_Y)) / 800.0;

    let base = 100;
    let height_bonus = (height_multiplier * 300.0).floor().max(0.0) as u32;
    let distance_bonus = (distance_multiplier * 200.0).floor().max(0.0) as u32;
    let random_bonus = rng.random_range(0..100u32);

    base + height_bonus + distance_bonus + random_bonus
}

/// Owns the active targets and the round's stats
#[derive(Debug, Clone)]
pub struct TargetManager {
    area: PlayArea,
    target_count: usize,
    targets: Vec<Target>,
    stats: GameStats,
    round_complete_shown: bool,
    rng: Pcg32,
    next_id: u32,
}

impl TargetManager {
    pub fn new(seed: u64) -> Self {
        Self::with_area(PlayArea::default(), TARGET_ROWS * TARGET_COLS, seed)
    }

    pub fn with_area(area: PlayArea, target_count: usize, seed: u64) -> Self {
        Self {
            area,
            target_count,
            targets: Vec::new(),
            stats: GameStats::default(),
            round_complete_shown: false,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Replace the active set with a freshly placed batch
    pub fn create_targets(&mut self) -> &[Target] {
        self.round_complete_shown = false;
        self.targets.clear();

        let points = place_points(&self.area, self.target_count, PLACEMENT_ATTEMPTS, &mut self.rng);
        if points.len() < self.target_count {
            log::debug!(
                "Placed {} of {} targets before running out of attempts",
                points.len(),
                self.target_count
            );
        }

        for pos in points {
            let score_value = target_score(&self.area, pos, &mut self.rng);
            let id = self.next_id;
            self.next_id += 1;
            self.targets.push(Target {
                id,
                x: pos.x,
                y: pos.y,
                width: TARGET_SIZE,
                height: TARGET_SIZE,
                score_value,
            });
        }

        log::info!("Created {} targets", self.targets.len());
        &self.targets
    }

    /// Start a new round: fresh stats and a fresh batch
    pub fn restart(&mut self) {
        self.stats = GameStats::default();
        self.create_targets();
    }

    /// Record the outcome of one shot
    pub fn update_stats(&mut self, hit: bool, kind: ProjectileKind, hit_time: f32) {
        self.stats.record(hit, kind, hit_time, &mut self.rng);
    }

    /// Remove a target by id, returning it
    pub fn remove_target(&mut self, id: u32) -> Option<Target> {
        let index = self.targets.iter().position(|t| t.id == id)?;
        Some(self.targets.remove(index))
    }

    /// Add a target at the end of the active set (newest)
    pub fn push_target(&mut self, x: f32, y: f32, width: f32, height: f32, score_value: u32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(Target {
            id,
            x,
            y,
            width,
            height,
            score_value,
        });
        self.round_complete_shown = false;
        id
    }

    /// Hand out the round summary the first time the set is seen empty
    pub fn check_round_complete(&mut self, score: &ScoreData) -> Option<RoundSummary> {
        if !self.targets.is_empty() || self.round_complete_shown {
            return None;
        }
        self.round_complete_shown = true;
        self.stats.accuracy = self.stats.compute_accuracy();

        log::info!(
            "All targets destroyed: score={}, accuracy={}%",
            score.current_score,
            self.stats.accuracy
        );

        Some(RoundSummary {
            final_score: score.current_score,
            high_score: score.high_score,
            best_combo: score.best_combo,
            stats: self.stats.clone(),
        })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }
}
