//! Game session: the per-frame driver
//!
//! Owns the physics config and every component, turns input commands into
//! launches, resamples the wind, checks for the end of a round and forwards
//! sound cues to the audio sink. Presentation reads `snapshot()` each frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::achievements::{self, AchievementLedger};
use crate::audio::{AudioSink, SoundCue};
use crate::consts::*;
use crate::persistence::Stores;
use crate::score::{ScoreData, ScoreManager};
use crate::settings::{Difficulty, Settings};
use crate::sim::{
    GameEvent, GamePhysics, HitEffect, PhysicsConfig, ProjectileKind, RoundSummary, Target,
    TargetManager, Vector2D,
};

/// Everything the presentation layer draws for one frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    /// Projectile center while a shot is in the air
    pub projectile: Option<Vector2D>,
    pub projectile_kind: ProjectileKind,
    /// Display name of the selected projectile
    pub projectile_name: &'static str,
    /// Sprite width and height of the selected projectile
    pub projectile_size: Vector2D,
    pub targets: Vec<Target>,
    pub effects: Vec<HitEffect>,
    pub wind_strength: f32,
    pub max_wind: f32,
    pub score: ScoreData,
    pub angle: f32,
    pub power: f32,
    pub aim_assist: bool,
    pub weird_mode: bool,
    pub round_complete: bool,
}

pub struct Game {
    config: PhysicsConfig,
    physics: GamePhysics,
    targets: TargetManager,
    score: ScoreManager,
    achievements: AchievementLedger,
    audio: Box<dyn AudioSink>,
    settings: Settings,
    stores: Stores,
    rng: Pcg32,
    angle: f32,
    power: f32,
    last_wind_ms: f64,
    last_summary: Option<RoundSummary>,
}

impl Game {
    /// Start a session with a fresh batch of targets
    pub fn new(stores: Stores, mut audio: Box<dyn AudioSink>, seed: u64, now_ms: f64) -> Self {
        let settings = Settings::load(&*stores.primary);
        audio.set_muted(settings.muted);

        let config = PhysicsConfig {
            gravity: settings.difficulty.gravity(),
            weird_mode: settings.weird_mode,
            ..Default::default()
        };

        let mut targets = TargetManager::new(seed);
        targets.create_targets();

        log::info!(
            "Game started (seed {}, {} mode{})",
            seed,
            settings.difficulty.as_str(),
            if settings.weird_mode { ", weird" } else { "" }
        );

        Self {
            config,
            physics: GamePhysics::new(CANVAS_WIDTH, seed.wrapping_add(1)),
            targets,
            score: ScoreManager::new(stores.clone()),
            achievements: AchievementLedger::load(stores.primary.clone()),
            audio,
            settings,
            stores,
            rng: Pcg32::seed_from_u64(seed.wrapping_add(2)),
            angle: DEFAULT_ANGLE,
            power: DEFAULT_POWER,
            last_wind_ms: now_ms,
            last_summary: None,
        }
    }

    pub fn set_angle(&mut self, angle_degrees: f32) {
        self.angle = angle_degrees;
    }

    pub fn set_power(&mut self, power: f32) {
        self.power = power;
    }

    pub fn select_projectile(&mut self, kind: ProjectileKind) {
        if self.settings.projectile != kind {
            self.settings.projectile = kind;
            self.settings.save(&*self.stores.primary);
        }
    }

    /// Fire at the current aim. Ignored while a shot is already in the air.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        if self.physics.is_flying() {
            return false;
        }
        let start = Vector2D::new(LAUNCH_X, self.config.ground_height);
        self.physics.launch(self.angle, self.power, start, now_ms);
        self.audio.play(SoundCue::Shoot, 0.4);
        self.audio.play(SoundCue::Whoosh, 0.3);
        true
    }

    /// Advance one frame
    pub fn tick(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if now_ms - self.last_wind_ms >= WIND_INTERVAL_MS {
            self.config.wind_strength = (self.rng.random::<f32>() - 0.5) * MAX_WIND;
            self.last_wind_ms = now_ms;
        }

        let mut events = self.physics.update(
            &self.config,
            &mut self.targets,
            &mut self.score,
            self.settings.projectile.spec(),
            now_ms,
        );

        if let Some(summary) = self.targets.check_round_complete(&self.score.score_data()) {
            let earned = achievements::earned(&summary.stats, summary.best_combo);
            self.achievements.record(&earned);
            self.score.save_high_score(now_ms);
            self.last_summary = Some(summary.clone());
            events.push(GameEvent::RoundComplete {
                summary,
                achievements: earned,
            });
        }

        for event in &events {
            if let GameEvent::Sound { cue, volume } = event {
                self.audio.play(*cue, *volume);
            }
        }

        events
    }

    /// Clear the board and start a new round
    pub fn restart(&mut self, now_ms: f64) {
        self.score.reset_score(now_ms);
        self.targets.restart();
        self.physics.reset();
        self.last_summary = None;
        log::info!("Round restarted");
    }

    /// Switch difficulty; scales the current wind and sets gravity.
    /// Setting the difficulty already in effect changes nothing.
    pub fn set_hard_mode(&mut self, hard: bool) {
        let difficulty = if hard { Difficulty::Hard } else { Difficulty::Easy };
        if self.settings.difficulty == difficulty {
            return;
        }
        self.settings.difficulty = difficulty;
        self.config.wind_strength *= difficulty.wind_factor();
        self.config.gravity = difficulty.gravity();
        self.settings.save(&*self.stores.primary);
    }

    /// Flip weird mode, returning the new state
    pub fn toggle_weird_mode(&mut self) -> bool {
        self.config.weird_mode = !self.config.weird_mode;
        self.settings.weird_mode = self.config.weird_mode;
        if self.config.weird_mode {
            self.audio.play(SoundCue::Whoosh, 0.3);
        }
        self.settings.save(&*self.stores.primary);
        self.config.weird_mode
    }

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        self.settings.muted = muted;
        self.settings.save(&*self.stores.primary);
        muted
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let spec = self.settings.projectile.spec();
        RenderSnapshot {
            projectile: self
                .physics
                .is_flying()
                .then(|| self.physics.projectile_position()),
            projectile_kind: self.settings.projectile,
            projectile_name: spec.name,
            projectile_size: Vector2D::new(spec.width, spec.height),
            targets: self.targets.targets().to_vec(),
            effects: self.physics.effects().to_vec(),
            wind_strength: self.config.wind_strength,
            max_wind: MAX_WIND,
            score: self.score.score_data(),
            angle: self.angle,
            power: self.power,
            aim_assist: self.settings.difficulty.aim_assist(),
            weird_mode: self.config.weird_mode,
            round_complete: self.last_summary.is_some(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn targets(&self) -> &TargetManager {
        &self.targets
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn achievements(&self) -> &AchievementLedger {
        &self.achievements
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_flying(&self) -> bool {
        self.physics.is_flying()
    }

    /// Summary of the round just finished, until restart
    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }
}
