//! JS-facing game handle (wasm32 only)
//!
//! The page owns the canvas, the DOM and the `requestAnimationFrame` loop; it
//! calls into `WebGame` for commands and reads JSON snapshots back.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::persistence::Stores;
use crate::session::Game;
use crate::sim::ProjectileKind;

use super::now_ms;

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let now = now_ms();
        let seed = now as u64;
        let game = Game::new(Stores::browser(), Box::new(WebAudio::new()), seed, now);
        WebGame { game }
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.game.set_angle(angle);
    }

    pub fn set_power(&mut self, power: f32) {
        self.game.set_power(power);
    }

    /// 0 = human, 1 = baby; anything else is ignored
    pub fn select_projectile(&mut self, index: usize) {
        if let Some(kind) = ProjectileKind::from_index(index) {
            self.game.select_projectile(kind);
        }
    }

    pub fn fire(&mut self) -> bool {
        self.game.fire(now_ms())
    }

    /// Advance one frame; returns the frame's events as JSON
    pub fn tick(&mut self) -> String {
        let events = self.game.tick(now_ms());
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Failed to encode events: {e}");
            "[]".to_string()
        })
    }

    /// Current render snapshot as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|e| {
            log::error!("Failed to encode snapshot: {e}");
            "{}".to_string()
        })
    }

    pub fn set_hard_mode(&mut self, hard: bool) {
        self.game.set_hard_mode(hard);
    }

    pub fn toggle_weird_mode(&mut self) -> bool {
        self.game.toggle_weird_mode()
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.game.toggle_mute()
    }

    pub fn restart(&mut self) {
        self.game.restart(now_ms());
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    super::init_logging();
    log::info!("Lobshot (web) starting...");
}
