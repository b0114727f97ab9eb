//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per rendered frame, time passed in explicitly
//! - Seeded RNG only
//! - Targets scanned newest first; at most one hit per tick
//! - No rendering or platform dependencies

pub mod aim;
pub mod effects;
pub mod events;
pub mod game_physics;
pub mod projectile;
pub mod projectiles;
pub mod stats;
pub mod targets;
pub mod vector;

pub use aim::{Aim, solve_aim};
pub use effects::{EffectKind, HitEffect};
pub use events::{GameEvent, MissCause};
pub use game_physics::{GamePhysics, check_collision, out_of_bounds};
pub use projectile::{FlightState, PhysicsConfig, ProjectilePhysics};
pub use projectiles::{BABY, HUMAN, ProjectileKind, ProjectileSpec};
pub use stats::{BabyStats, GameStats, HumanStats};
pub use targets::{PlayArea, RoundSummary, Target, TargetManager};
pub use vector::Vector2D;
