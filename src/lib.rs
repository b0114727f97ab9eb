//! Lobshot - A projectile-lobbing arcade game
//!
//! Core modules:
//! - `sim`: Simulation (projectile physics, collisions, targets, stats)
//! - `score`: Score, high score and combo multiplier
//! - `achievements`: End-of-round achievements and their earn counts
//! - `session`: Per-frame game driver tying the pieces together
//! - `persistence`: Key-value storage with a primary/fallback chain
//! - `audio`: Sound cue boundary (Web Audio on wasm32)
//! - `settings`: Player preferences
//! - `platform`: Browser/native platform abstraction

pub mod achievements;
pub mod audio;
pub mod persistence;
pub mod platform;
pub mod score;
pub mod session;
pub mod settings;
pub mod sim;

pub use achievements::{Achievement, AchievementLedger};
pub use score::{ScoreData, ScoreManager};
pub use session::{Game, RenderSnapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Launcher position; every shot starts here and distance bonuses are measured from it
    pub const LAUNCH_X: f32 = 50.0;
    pub const LAUNCH_Y: f32 = 450.0;

    /// Launch power is scaled by this before becoming speed (pixels/tick)
    pub const POWER_SCALE: f32 = 0.3;

    /// Canvas width used for horizontal out-of-bounds checks
    pub const CANVAS_WIDTH: f32 = 800.0;
    /// Projectiles may travel this far past either horizontal edge before counting as a miss
    pub const OUT_OF_BOUNDS_BUFFER: f32 = 50.0;

    /// Hitbox radius = min(width, height) * this
    pub const COLLISION_THRESHOLD: f32 = 0.8;

    /// Physics defaults (per tick)
    pub const GRAVITY: f32 = 0.4;
    pub const HARD_GRAVITY: f32 = 0.5;
    pub const AIR_RESISTANCE: f32 = 0.995;
    pub const GROUND_HEIGHT: f32 = 450.0;

    /// Wind is resampled to (U - 0.5) * MAX_WIND every WIND_INTERVAL_MS
    pub const MAX_WIND: f32 = 0.1;
    pub const WIND_INTERVAL_MS: f64 = 5000.0;

    /// Hits closer together than this keep the combo alive
    pub const COMBO_WINDOW_MS: f64 = 5000.0;

    /// Target layout
    pub const TARGET_ROWS: usize = 3;
    pub const TARGET_COLS: usize = 3;
    pub const TARGET_SIZE: f32 = 40.0;
    pub const PLACEMENT_ATTEMPTS: usize = 50;

    /// Default aim
    pub const DEFAULT_ANGLE: f32 = 45.0;
    pub const DEFAULT_POWER: f32 = 50.0;
}

/// Convert an aim angle in degrees (0 = right, counter-clockwise on screen) to a unit direction.
///
/// Screen space has y pointing down, so "up" is negative y.
#[inline]
pub fn aim_direction(angle_degrees: f32) -> glam::Vec2 {
    let rad = angle_degrees.to_radians();
    glam::Vec2::new(rad.cos(), -rad.sin())
}

/// Convert a Unix timestamp in milliseconds to an ISO8601 string.
///
/// Returns an empty string for timestamps chrono cannot represent.
pub fn iso8601(timestamp_ms: f64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_direction_up_is_negative_y() {
        let dir = aim_direction(90.0);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_iso8601() {
        assert_eq!(iso8601(0.0), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso8601(1_700_000_000_123.0), "2023-11-14T22:13:20.123Z");
    }
}
