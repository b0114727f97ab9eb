//! Per-tick flight, collision and scoring
//!
//! While a shot is in the air each tick advances the projectile, tests it
//! against the targets, and hands hits and misses to the target manager
//! (stats) and the score manager (points, combo). Hit-feedback effects keep
//! animating whether or not anything is flying.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::effects::{EffectKind, HitEffect, advance_effects};
use super::events::{GameEvent, MissCause};
use super::projectile::{FlightState, PhysicsConfig, ProjectilePhysics};
use super::projectiles::{ProjectileKind, ProjectileSpec};
use super::targets::{Target, TargetManager};
use super::vector::Vector2D;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::score::ScoreManager;

/// Whether `point` is inside the target's hitbox circle
#[inline]
pub fn check_collision(point: Vector2D, target: &Target) -> bool {
    point.distance_to(target.center()) < target.hitbox_radius()
}

/// Whether `x` is past either horizontal edge plus the buffer zone
#[inline]
pub fn out_of_bounds(x: f32, canvas_width: f32) -> bool {
    x > canvas_width + OUT_OF_BOUNDS_BUFFER || x < -OUT_OF_BOUNDS_BUFFER
}

pub struct GamePhysics {
    projectile: ProjectilePhysics,
    effects: Vec<HitEffect>,
    shot_start_ms: f64,
    canvas_width: f32,
    rng: Pcg32,
}

impl GamePhysics {
    pub fn new(canvas_width: f32, seed: u64) -> Self {
        Self {
            projectile: ProjectilePhysics::new(),
            effects: Vec::new(),
            shot_start_ms: 0.0,
            canvas_width,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fire a shot from `start` and start its clock
    pub fn launch(&mut self, angle_degrees: f32, power: f32, start: Vector2D, now_ms: f64) {
        self.projectile.launch(angle_degrees, power, start);
        self.start_shot(now_ms);
    }

    /// Start timing the current shot
    pub fn start_shot(&mut self, now_ms: f64) {
        self.shot_start_ms = now_ms;
    }

    /// Advance one tick
    pub fn update(
        &mut self,
        config: &PhysicsConfig,
        targets: &mut TargetManager,
        score: &mut ScoreManager,
        projectile: &ProjectileSpec,
        now_ms: f64,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.projectile.is_flying() {
            self.fly(config, targets, score, projectile, now_ms, &mut events);
        }

        advance_effects(&mut self.effects);

        events
    }

    fn fly(
        &mut self,
        config: &PhysicsConfig,
        targets: &mut TargetManager,
        score: &mut ScoreManager,
        projectile: &ProjectileSpec,
        now_ms: f64,
        events: &mut Vec<GameEvent>,
    ) {
        let airborne = self
            .projectile
            .update(config, now_ms / 1000.0, &mut self.rng);
        let pos = self.projectile.position;
        let is_human = projectile.kind == ProjectileKind::Human;

        // Newest target first; at most one hit per tick
        let hit = targets
            .targets()
            .iter()
            .rev()
            .find(|t| check_collision(pos, t))
            .cloned();

        if let Some(target) = hit {
            let hit_time = ((now_ms - self.shot_start_ms) / 1000.0) as f32;
            let impact_force = self.projectile.speed() / 100.0;
            let volume = (impact_force * 0.6).min(1.0);

            self.effects.push(HitEffect::explosion(target.center(), volume));
            events.push(GameEvent::Sound {
                cue: SoundCue::Explosion,
                volume,
            });

            targets.update_stats(true, projectile.kind, hit_time);

            if !is_human {
                events.push(GameEvent::Sound {
                    cue: SoundCue::Cry,
                    volume: 1.0,
                });
            }

            let distance = target.center().distance_to(Vector2D::new(LAUNCH_X, LAUNCH_Y));
            let points = score.add_points(target.score_value, distance, now_ms);

            targets.remove_target(target.id);
            self.projectile.state = FlightState::Landed;

            log::debug!("Hit target {} for {} points", target.id, points);
            events.push(GameEvent::TargetHit {
                target_id: target.id,
                position: target.center(),
                points,
                hit_time,
            });
            return;
        }

        let left_screen = out_of_bounds(pos.x, self.canvas_width);
        if airborne && !left_screen {
            return;
        }

        self.projectile.state = FlightState::Landed;
        targets.update_stats(false, projectile.kind, 0.0);
        score.reset_combo_on_miss();

        let cause = if airborne {
            MissCause::OutOfBounds
        } else {
            MissCause::Ground
        };

        if cause == MissCause::Ground {
            let intensity = (self.projectile.speed() / 100.0).min(1.0);
            match projectile.ground_effect {
                EffectKind::Blood => {
                    self.effects.push(HitEffect::blood(pos, intensity));
                    events.push(GameEvent::Sound {
                        cue: SoundCue::Impact,
                        volume: intensity,
                    });
                }
                EffectKind::Explosion => {
                    self.effects.push(HitEffect::explosion(pos, intensity));
                }
            }
        }

        events.push(GameEvent::Miss {
            cause,
            position: pos,
        });
    }

    pub fn is_flying(&self) -> bool {
        self.projectile.is_flying()
    }

    pub fn projectile(&self) -> &ProjectilePhysics {
        &self.projectile
    }

    pub fn projectile_position(&self) -> Vector2D {
        self.projectile.position
    }

    pub fn effects(&self) -> &[HitEffect] {
        &self.effects
    }

    /// Drop the projectile and all effects (restart)
    pub fn reset(&mut self) {
        self.projectile = ProjectilePhysics::new();
        self.effects.clear();
    }
}
