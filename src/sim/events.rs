//! Events produced by a tick for presentation, audio and toasts

use serde::{Deserialize, Serialize};

use super::targets::RoundSummary;
use super::vector::Vector2D;
use crate::achievements::Achievement;
use crate::audio::SoundCue;

/// Why a shot ended without a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissCause {
    /// Came down below the ground line
    Ground,
    /// Left the screen sideways
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play a sound cue
    Sound { cue: SoundCue, volume: f32 },
    /// A target was destroyed
    TargetHit {
        target_id: u32,
        position: Vector2D,
        points: u32,
        /// Seconds from launch
        hit_time: f32,
    },
    /// The shot ended without hitting anything
    Miss { cause: MissCause, position: Vector2D },
    /// The last target is gone
    RoundComplete {
        summary: RoundSummary,
        achievements: Vec<Achievement>,
    },
}
