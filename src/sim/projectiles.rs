//! Projectile catalog

use serde::{Deserialize, Serialize};

use super::effects::EffectKind;

/// Which thing is being launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Human,
    Baby,
}

/// Per-variant configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub kind: ProjectileKind,
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    /// Effect spawned where the projectile hits the ground
    pub ground_effect: EffectKind,
}

pub const HUMAN: ProjectileSpec = ProjectileSpec {
    kind: ProjectileKind::Human,
    name: "Human",
    width: 30.0,
    height: 30.0,
    ground_effect: EffectKind::Blood,
};

pub const BABY: ProjectileSpec = ProjectileSpec {
    kind: ProjectileKind::Baby,
    name: "Baby",
    width: 40.0,
    height: 40.0,
    ground_effect: EffectKind::Blood,
};

impl ProjectileKind {
    pub fn spec(&self) -> &'static ProjectileSpec {
        match self {
            ProjectileKind::Human => &HUMAN,
            ProjectileKind::Baby => &BABY,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ProjectileKind::Human),
            1 => Some(ProjectileKind::Baby),
            _ => None,
        }
    }
}
