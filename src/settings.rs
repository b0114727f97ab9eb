//! Player preferences
//!
//! Persisted separately from scores under their own key.

use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, HARD_GRAVITY};
use crate::persistence::{self, KeyValueStore};
use crate::sim::ProjectileKind;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }

    /// Gravity for this difficulty
    pub fn gravity(&self) -> f32 {
        match self {
            Difficulty::Easy => GRAVITY,
            Difficulty::Hard => HARD_GRAVITY,
        }
    }

    /// Applied to the current wind when switching to this difficulty
    pub fn wind_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Hard => 2.0,
        }
    }

    /// Whether the drag-to-aim guide is shown
    pub fn aim_assist(&self) -> bool {
        *self == Difficulty::Easy
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Chaotic projectile physics
    pub weird_mode: bool,
    pub muted: bool,
    /// Last selected projectile
    pub projectile: ProjectileKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            weird_mode: false,
            muted: false,
            projectile: ProjectileKind::Human,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "lobshot_settings";

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring saved settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings (best-effort)
    pub fn save(&self, store: &dyn KeyValueStore) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Error saving settings: {e}"),
        }
    }
}
