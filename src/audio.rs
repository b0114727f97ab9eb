//! Sound cue boundary
//!
//! The simulation only asks for named cues at a volume; an `AudioSink`
//! decides what that sounds like. On wasm32 `WebAudio` synthesizes the cues
//! procedurally with the Web Audio API - no sample files needed.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Projectile fired
    Shoot,
    /// Air rush on launch, also played when weird mode turns on
    Whoosh,
    /// Target destroyed
    Explosion,
    /// Projectile splatted on the ground
    Impact,
    /// Baby hit a target
    Cry,
}

/// Something that can play sound cues. Failures stay inside the sink.
pub trait AudioSink {
    /// Play `cue` at `volume` (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Sink that plays nothing (native builds, tests)
#[derive(Debug, Default)]
pub struct SilentAudio {
    muted: bool,
}

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        if !self.muted {
            log::trace!("sound {:?} @ {:.2}", cue, volume);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue};

    /// Procedural Web Audio sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                muted: false,
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Shoot - short rising thwack
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(420.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Whoosh - soft swell and fall
        fn play_whoosh(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.01, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.3, t + 0.1)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(600.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(200.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        /// Explosion - boom with a crack on top
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();

            if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain2.gain().set_value_at_time(vol * 0.2, t).ok();
                gain2
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc2.start().ok();
                osc2.stop_with_when(t + 0.15).ok();
            }
        }

        /// Impact - wet low thud
        fn play_impact(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(45.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Cry - wobbling wail
        fn play_cry(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.9)
                .ok();
            for (i, freq) in [700.0, 900.0, 650.0, 850.0, 600.0].iter().enumerate() {
                osc.frequency()
                    .set_value_at_time(*freq, t + i as f64 * 0.15)
                    .ok();
            }

            osc.start().ok();
            osc.stop_with_when(t + 1.0).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            let vol = if self.muted {
                0.0
            } else {
                volume.clamp(0.0, 1.0) * self.master_volume
            };
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Shoot => self.play_shoot(ctx, vol),
                SoundCue::Whoosh => self.play_whoosh(ctx, vol),
                SoundCue::Explosion => self.play_explosion(ctx, vol),
                SoundCue::Impact => self.play_impact(ctx, vol),
                SoundCue::Cry => self.play_cry(ctx, vol),
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }
    }
}
