//! Single-projectile flight integrator
//!
//! Explicit Euler, one step per rendered frame. The physics config is owned
//! by the caller and only ever read here.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::vector::Vector2D;
use crate::aim_direction;
use crate::consts::*;

/// Tunable physics parameters, mutated by the game loop between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick (y grows downward)
    pub gravity: f32,
    /// Speed multiplier per tick (values < 1 damp)
    pub air_resistance: f32,
    /// Added to horizontal velocity every tick
    pub wind_strength: f32,
    /// Projectile is airborne while `y <= ground_height`
    pub ground_height: f32,
    /// Chaotic velocity perturbation
    pub weird_mode: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            air_resistance: AIR_RESISTANCE,
            wind_strength: 0.0,
            ground_height: GROUND_HEIGHT,
            weird_mode: false,
        }
    }
}

/// Flight phase of the projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightState {
    #[default]
    Idle,
    Flying,
    Landed,
}

/// Probability per tick of a random weird-mode burst
const WEIRD_BURST_CHANCE: f64 = 0.05;
/// Half-width of the weird-mode burst impulse
const WEIRD_BURST_HALF: f32 = 2.5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectilePhysics {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub state: FlightState,
}

impl ProjectilePhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch from `start` at `angle_degrees` (0 = right, 90 = straight up)
    pub fn launch(&mut self, angle_degrees: f32, power: f32, start: Vector2D) {
        let speed = power * POWER_SCALE;
        self.velocity = Vector2D::from(aim_direction(angle_degrees) * speed);
        self.position = start;
        self.state = FlightState::Flying;
    }

    /// Advance one tick. Returns whether the projectile is still airborne.
    ///
    /// `time_secs` is wall-clock time, only read by weird mode.
    pub fn update<R: Rng>(&mut self, config: &PhysicsConfig, time_secs: f64, rng: &mut R) -> bool {
        if config.weird_mode {
            self.apply_weirdness(time_secs, rng);
        }

        self.velocity.x += config.wind_strength;

        self.position = self.position + self.velocity;

        self.velocity.y += config.gravity;

        self.velocity.apply_friction(config.air_resistance);

        let airborne = self.position.y <= config.ground_height;
        self.state = if airborne {
            FlightState::Flying
        } else {
            FlightState::Landed
        };
        airborne
    }

    fn apply_weirdness<R: Rng>(&mut self, time_secs: f64, rng: &mut R) {
        let t = time_secs;

        // Wobble
        self.velocity.x += ((t * 5.0).sin() * 0.5) as f32;
        self.velocity.y += ((t * 3.0).cos() * 0.3) as f32;

        // Bursts
        if rng.random_bool(WEIRD_BURST_CHANCE) {
            self.velocity.x += rng.random_range(-WEIRD_BURST_HALF..=WEIRD_BURST_HALF);
            self.velocity.y += rng.random_range(-WEIRD_BURST_HALF..=WEIRD_BURST_HALF);
        }

        // Spiral
        let angle = t * 2.0;
        self.velocity.x += (angle.cos() * 0.3) as f32;
        self.velocity.y += (angle.sin() * 0.3) as f32;
    }

    /// Current speed in pixels per tick
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn is_flying(&self) -> bool {
        self.state == FlightState::Flying
    }
}
