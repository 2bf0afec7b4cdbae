//! Euler integration for anything that moves

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;

/// Position and velocity shared by every moving entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematic {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Kinematic {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }
}

/// Advance position by `velocity * dt`
#[inline]
pub fn integrate(body: &mut Kinematic, dt: f32) {
    body.pos += body.vel * dt;
}

/// Negate horizontal velocity
#[inline]
pub fn reflect_x(body: &mut Kinematic) {
    body.vel.x = -body.vel.x;
}

/// Negate vertical velocity
#[inline]
pub fn reflect_y(body: &mut Kinematic) {
    body.vel.y = -body.vel.y;
}

/// Bounce a box whose top-left corner is `body.pos` off the bounds edges.
///
/// A component is only reflected while it still points out of the arena, so
/// a box that overshot an edge can't get stuck flipping back and forth.
/// Returns true if either component was reflected.
pub fn bounce_within(body: &mut Kinematic, size: Vec2, bounds: &Bounds) -> bool {
    let mut bounced = false;

    if (body.pos.x <= 0.0 && body.vel.x < 0.0)
        || (body.pos.x + size.x >= bounds.width && body.vel.x > 0.0)
    {
        reflect_x(body);
        bounced = true;
    }
    if (body.pos.y <= 0.0 && body.vel.y < 0.0)
        || (body.pos.y + size.y >= bounds.height && body.vel.y > 0.0)
    {
        reflect_y(body);
        bounced = true;
    }

    bounced
}
