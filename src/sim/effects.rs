//! Short-lived hit-feedback effects
//!
//! Effects are sprite-sheet animations on the presentation side; here they are
//! just a position plus a frame clock that runs out.

use serde::{Deserialize, Serialize};

use super::vector::Vector2D;

/// Which animation an effect plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Blood,
    Explosion,
}

impl EffectKind {
    /// Number of animation frames in the sprite sheet
    pub fn total_frames(&self) -> u32 {
        match self {
            EffectKind::Blood => 6,
            EffectKind::Explosion => 8,
        }
    }

    /// Ticks each frame is held for
    pub fn ticks_per_frame(&self) -> u32 {
        match self {
            EffectKind::Blood => 3,
            EffectKind::Explosion => 2,
        }
    }

    /// Total lifetime in ticks
    pub fn lifetime_ticks(&self) -> u32 {
        self.total_frames() * self.ticks_per_frame()
    }
}

/// A running effect instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEffect {
    pub kind: EffectKind,
    pub position: Vector2D,
    /// 0-1, scales how loud/big the presentation plays it
    pub intensity: f32,
    /// Current animation frame
    pub frame: u32,
    frame_counter: u32,
}

impl HitEffect {
    pub fn new(kind: EffectKind, position: Vector2D, intensity: f32) -> Self {
        Self {
            kind,
            position,
            intensity: intensity.clamp(0.0, 1.0),
            frame: 0,
            frame_counter: 0,
        }
    }

    pub fn blood(position: Vector2D, intensity: f32) -> Self {
        Self::new(EffectKind::Blood, position, intensity)
    }

    pub fn explosion(position: Vector2D, intensity: f32) -> Self {
        Self::new(EffectKind::Explosion, position, intensity)
    }

    /// Advance one tick. Returns whether the effect is still playing.
    pub fn update(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.frame_counter += 1;
        if self.frame_counter >= self.kind.ticks_per_frame() {
            self.frame += 1;
            self.frame_counter = 0;
        }
        !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.kind.total_frames()
    }
}

/// Advance every effect and drop the finished ones
pub fn advance_effects(effects: &mut Vec<HitEffect>) {
    effects.retain_mut(|e| e.update());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetimes() {
        for kind in [EffectKind::Blood, EffectKind::Explosion] {
            let mut effect = HitEffect::new(kind, Vector2D::ZERO, 1.0);
            let mut ticks = 0;
            while effect.update() {
                ticks += 1;
            }
            // The final update is the one that finishes it
            assert_eq!(ticks + 1, kind.lifetime_ticks());
            assert!(effect.is_finished());
            assert!(!effect.update());
        }
    }

    #[test]
    fn test_advance_prunes_finished() {
        let mut effects = vec![
            HitEffect::explosion(Vector2D::ZERO, 0.5),
            HitEffect::blood(Vector2D::new(1.0, 1.0), 0.5),
        ];
        for _ in 0..EffectKind::Explosion.lifetime_ticks() {
            advance_effects(&mut effects);
        }
        // Explosion (16 ticks) is gone, blood (18 ticks) is not
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].kind, EffectKind::Blood);

        for _ in 0..2 {
            advance_effects(&mut effects);
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn test_intensity_clamped() {
        assert_eq!(HitEffect::blood(Vector2D::ZERO, 3.0).intensity, 1.0);
    }
}
