//! Demo-mode aiming
//!
//! Brute-force search over angle and power, simulating each shot with the
//! current config. Weird mode is ignored since it cannot be predicted.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::game_physics::{check_collision, out_of_bounds};
use super::projectile::{PhysicsConfig, ProjectilePhysics};
use super::targets::Target;
use super::vector::Vector2D;

/// Longest flight simulated per candidate
const MAX_FLIGHT_TICKS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    pub angle: f32,
    pub power: f32,
    /// Ticks until impact
    pub ticks: u32,
}

/// Ticks until a shot hits `target`, or None if it lands or leaves first
pub fn flight_ticks_to(
    config: &PhysicsConfig,
    start: Vector2D,
    angle: f32,
    power: f32,
    target: &Target,
    canvas_width: f32,
) -> Option<u32> {
    let config = PhysicsConfig {
        weird_mode: false,
        ..config.clone()
    };
    let mut rng = Pcg32::seed_from_u64(0);
    let mut p = ProjectilePhysics::new();
    p.launch(angle, power, start);

    for tick in 1..=MAX_FLIGHT_TICKS {
        let airborne = p.update(&config, 0.0, &mut rng);
        if check_collision(p.position, target) {
            return Some(tick);
        }
        if !airborne || out_of_bounds(p.position.x, canvas_width) {
            return None;
        }
    }
    None
}

/// Quickest whole-degree, whole-power shot that hits `target`
pub fn solve_aim(config: &PhysicsConfig, start: Vector2D, target: &Target, canvas_width: f32) -> Option<Aim> {
    let mut best: Option<Aim> = None;
    for angle in 1..=89 {
        for power in 10..=100 {
            let (angle, power) = (angle as f32, power as f32);
            let Some(ticks) = flight_ticks_to(config, start, angle, power, target, canvas_width) else {
                continue;
            };
            if best.is_none_or(|b| ticks < b.ticks) {
                best = Some(Aim { angle, power, ticks });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn target(x: f32, y: f32) -> Target {
        Target {
            id: 1,
            x,
            y,
            width: TARGET_SIZE,
            height: TARGET_SIZE,
            score_value: 100,
        }
    }

    #[test]
    fn test_solves_corners_of_play_area() {
        let config = PhysicsConfig::default();
        let start = Vector2D::new(LAUNCH_X, LAUNCH_Y);
        for (x, y) in [(200.0, 50.0), (700.0, 50.0), (200.0, 300.0), (700.0, 300.0)] {
            let t = target(x, y);
            let aim = solve_aim(&config, start, &t, CANVAS_WIDTH)
                .unwrap_or_else(|| panic!("no aim for ({x}, {y})"));
            assert_eq!(
                flight_ticks_to(&config, start, aim.angle, aim.power, &t, CANVAS_WIDTH),
                Some(aim.ticks)
            );
        }
    }

    #[test]
    fn test_unreachable_target() {
        let config = PhysicsConfig::default();
        let start = Vector2D::new(LAUNCH_X, LAUNCH_Y);
        assert!(solve_aim(&config, start, &target(5000.0, 100.0), CANVAS_WIDTH).is_none());
    }
}
