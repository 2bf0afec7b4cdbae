//! Entity registry: live hostiles, projectiles and runner obstacles
//!
//! Collision passes only flag entities (`alive = false`, `consumed = true`);
//! removal happens in one compaction step afterwards, so nothing is ever
//! removed from a collection while it is being scanned.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use super::kinematics::Kinematic;
use crate::consts::*;
use crate::heading_to_dir;

pub type HostileId = u32;
pub type ProjectileId = u32;
pub type ObstacleId = u32;

/// A shot fired by the actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub body: Kinematic,
    pub radius: f32,
    pub damage: i32,
    /// Hit something this tick; removed on the next compaction
    pub consumed: bool,
}

/// An enemy that bounces around the arena and soaks up damage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: HostileId,
    /// Top-left corner and velocity
    pub body: Kinematic,
    pub width: f32,
    pub height: f32,
    pub max_health: i32,
    pub health: i32,
    pub alive: bool,
}

impl Hostile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.body.pos, Vec2::new(self.width, self.height))
    }

    /// Remaining health in [0, 1] for life bars
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).min(1.0)
    }

    /// Apply one projectile's damage. Returns true if this hit was lethal.
    ///
    /// Only the first lethal hit reports true, so a hostile scores once.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Runner obstacle kinds and their per-kind data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Background scenery, never collides
    Decoration,
    /// Picked up for points
    Collectible { points: u64 },
    /// Costs a life on contact
    Hazard,
}

impl ObstacleKind {
    /// Whether the actor can touch this kind at all
    pub fn collides(&self) -> bool {
        match self {
            ObstacleKind::Decoration => false,
            ObstacleKind::Collectible { .. } | ObstacleKind::Hazard => true,
        }
    }

    /// Box height in pixels
    pub fn height(&self) -> f32 {
        match self {
            ObstacleKind::Decoration => 20.0,
            ObstacleKind::Collectible { .. } => 24.0,
            ObstacleKind::Hazard => 48.0,
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            ObstacleKind::Decoration => 80.0,
            ObstacleKind::Collectible { .. } => 24.0,
            ObstacleKind::Hazard => 32.0,
        }
    }

    /// Leftward scroll speed (pixels/s)
    pub fn speed(&self) -> f32 {
        match self {
            ObstacleKind::Decoration => 60.0,
            ObstacleKind::Collectible { .. } => 240.0,
            ObstacleKind::Hazard => 300.0,
        }
    }

    /// Fill colour as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            ObstacleKind::Decoration => 0xdde6f0,
            ObstacleKind::Collectible { .. } => 0xf5c542,
            ObstacleKind::Hazard => 0xd64545,
        }
    }

    /// Distance of the box's bottom edge above the ground line
    pub fn elevation(&self) -> f32 {
        match self {
            ObstacleKind::Decoration => 260.0,
            ObstacleKind::Collectible { .. } => 110.0,
            ObstacleKind::Hazard => 0.0,
        }
    }
}

/// A runner entity scrolling in from the trailing edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub body: Kinematic,
    /// Collected or otherwise spent; removed on the next compaction
    pub consumed: bool,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.body.pos,
            Vec2::new(self.kind.width(), self.kind.height()),
        )
    }

    /// Fully scrolled past the leading (left) edge
    pub fn off_screen(&self) -> bool {
        self.body.pos.x + self.kind.width() < 0.0
    }
}

/// Stats for a freshly spawned hostile
#[derive(Debug, Clone, Copy)]
pub struct HostileTemplate {
    pub size: f32,
    pub max_health: i32,
    pub speed_range: f32,
}

impl Default for HostileTemplate {
    fn default() -> Self {
        Self {
            size: HOSTILE_SIZE,
            max_health: 5,
            speed_range: HOSTILE_SPEED_RANGE,
        }
    }
}

/// Owner of all live entity collections for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    /// Live hostiles, in spawn order
    pub hostiles: Vec<Hostile>,
    /// Live projectiles, in firing order
    pub projectiles: Vec<Projectile>,
    /// Live runner obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a hostile at a random spot fully inside the bounds.
    ///
    /// Callers must reject bounds smaller than `template.size` beforehand.
    pub fn spawn_hostile<R: Rng>(
        &mut self,
        rng: &mut R,
        bounds: &Bounds,
        template: &HostileTemplate,
    ) -> HostileId {
        let max_x = (bounds.width - template.size).max(0.0);
        let max_y = (bounds.height - template.size).max(0.0);
        let pos = Vec2::new(rng.random::<f32>() * max_x, rng.random::<f32>() * max_y);

        let range = template.speed_range;
        let vel = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * range,
            (rng.random::<f32>() * 2.0 - 1.0) * range,
        );

        let id = self.next_entity_id();
        self.hostiles.push(Hostile {
            id,
            body: Kinematic::new(pos, vel),
            width: template.size,
            height: template.size,
            max_health: template.max_health,
            health: template.max_health,
            alive: true,
        });
        id
    }

    /// Fire a projectile from `origin` along `heading` (radians, 0 = up)
    pub fn spawn_projectile(&mut self, origin: Vec2, heading: f32, damage: i32) -> ProjectileId {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            body: Kinematic::new(origin, heading_to_dir(heading) * PROJECTILE_SPEED),
            radius: PROJECTILE_RADIUS,
            damage,
            consumed: false,
        });
        id
    }

    /// Spawn a runner obstacle at the trailing (right) edge
    pub fn spawn_obstacle(&mut self, kind: ObstacleKind, bounds: &Bounds) -> ObstacleId {
        let ground = bounds.height - RUNNER_GROUND_OFFSET;
        let pos = Vec2::new(bounds.width, ground - kind.elevation() - kind.height());
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            kind,
            body: Kinematic::new(pos, Vec2::new(-kind.speed(), 0.0)),
            consumed: false,
        });
        id
    }

    /// Hostiles not yet flagged dead
    pub fn alive_hostiles(&self) -> usize {
        self.hostiles.iter().filter(|h| h.alive).count()
    }

    /// Remove dead hostiles, spent or out-of-bounds projectiles, and spent or
    /// off-screen obstacles. Survivors keep their relative order.
    ///
    /// Returns the removed hostiles so the caller can emit one death event
    /// each. A second call without new damage removes nothing.
    pub fn remove_dead(&mut self, bounds: &Bounds) -> Vec<Hostile> {
        let mut dead = Vec::new();
        let mut survivors = Vec::with_capacity(self.hostiles.len());
        for hostile in self.hostiles.drain(..) {
            if hostile.alive {
                survivors.push(hostile);
            } else {
                dead.push(hostile);
            }
        }
        self.hostiles = survivors;

        self.projectiles
            .retain(|p| !p.consumed && bounds.contains(p.body.pos));
        self.obstacles.retain(|o| !o.consumed && !o.off_screen());

        dead
    }
}
