//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering, audio playback or platform dependencies

pub mod actor;
pub mod collision;
pub mod kinematics;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorState, HitOutcome, Timestamp};
pub use collision::{Bounds, Rect, intersects, intersects_rect};
pub use kinematics::{Kinematic, bounce_within, integrate, reflect_x, reflect_y};
pub use registry::{
    Hostile, HostileId, HostileTemplate, Obstacle, ObstacleId, ObstacleKind, Projectile,
    ProjectileId, Registry,
};
pub use spawn::{SpawnRoll, StochasticDirector, WaveDirector};
pub use state::{GameEvent, GamePhase, GameVariant, Session, SessionConfig, runner_ground_y};
pub use tick::{Frame, TickInput, tick};
