//! Immutable per-frame render data
//!
//! A snapshot owns copies of everything a renderer needs. Nothing in it
//! points back into the live session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FLICKER_INTERVAL_SECS;
use crate::sim::registry::{HostileId, ObstacleId, ObstacleKind};
use crate::sim::state::{GamePhase, Session};

/// Actor pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorPose {
    /// Center position
    pub pos: Vec2,
    /// Radians, 0 points up
    pub heading: f32,
    pub size: Vec2,
    pub invulnerable: bool,
    /// Draw at reduced opacity this frame (invulnerability flash)
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostilePose {
    pub id: HostileId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Remaining health in [0, 1] for the life bar
    pub health_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePose {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePose {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

/// Scalar HUD fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    /// `None` for variants without lives
    pub lives: Option<u8>,
    pub level: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub clock: f64,
    pub phase: GamePhase,
    pub actor: ActorPose,
    /// Hostiles in registry order
    pub hostiles: Vec<HostilePose>,
    /// Projectiles in firing order
    pub projectiles: Vec<ProjectilePose>,
    /// Runner obstacles in spawn order
    pub obstacles: Vec<ObstaclePose>,
    pub hud: Hud,
}

impl FrameSnapshot {
    /// Copy the drawable parts of a session
    pub fn capture(session: &Session) -> Self {
        let actor = &session.actor;
        let invulnerable = actor.is_invulnerable();

        Self {
            tick: session.time_ticks,
            clock: session.clock,
            phase: session.phase,
            actor: ActorPose {
                pos: actor.body.pos,
                heading: actor.heading,
                size: actor.size,
                invulnerable,
                dimmed: invulnerable && flicker_dimmed(session.clock),
            },
            hostiles: session
                .registry
                .hostiles
                .iter()
                .map(|h| HostilePose {
                    id: h.id,
                    pos: h.body.pos,
                    size: Vec2::new(h.width, h.height),
                    health_ratio: h.health_ratio(),
                })
                .collect(),
            projectiles: session
                .registry
                .projectiles
                .iter()
                .map(|p| ProjectilePose {
                    pos: p.body.pos,
                    radius: p.radius,
                })
                .collect(),
            obstacles: session
                .registry
                .obstacles
                .iter()
                .map(|o| ObstaclePose {
                    id: o.id,
                    kind: o.kind,
                    pos: o.body.pos,
                    size: Vec2::new(o.kind.width(), o.kind.height()),
                    color: o.kind.color(),
                })
                .collect(),
            hud: Hud {
                score: actor.score,
                lives: session.config.variant.has_lives().then_some(actor.lives),
                level: actor.level,
            },
        }
    }

    /// JSON dump for debugging
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Alternating dim/bright slices of the clock
pub fn flicker_dimmed(clock: f64) -> bool {
    ((clock / FLICKER_INTERVAL_SECS).floor() as i64) % 2 == 0
}

/// Drawing side of the render boundary
pub trait RenderSink {
    fn draw(&mut self, snapshot: &FrameSnapshot);
}
