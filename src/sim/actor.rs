//! The player-controlled actor and its life/invulnerability state machine
//!
//! Invulnerability is a timestamp on the session clock, compared every tick.
//! There are no timers to cancel: dropping the session drops the window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::kinematics::Kinematic;

/// Session clock time in seconds
pub type Timestamp = f64;

/// Life state of the actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorState {
    /// Lethal collisions cost a life
    Vulnerable,
    /// Lethal collisions are ignored until the clock reaches `until`
    Invulnerable { until: Timestamp },
    /// Out of lives; terminal
    Dead,
}

/// What a lethal collision did to the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Invulnerable or already dead; nothing changed
    Ignored,
    /// Lost a life and opened an invulnerability window
    LostLife { lives: u8 },
    /// Lost the last life
    Died,
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Center position and velocity
    pub body: Kinematic,
    /// Heading in radians, 0 points up
    pub heading: f32,
    /// Visual size; collisions use a shrunken copy
    pub size: Vec2,
    pub lives: u8,
    pub state: ActorState,
    pub score: u64,
    /// Current level / wave number (1-based)
    pub level: u32,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2, lives: u8) -> Self {
        Self {
            body: Kinematic::new(pos, Vec2::ZERO),
            heading: 0.0,
            size,
            lives,
            state: ActorState::Vulnerable,
            score: 0,
            level: 1,
        }
    }

    /// Visual bounds centered on the actor
    pub fn rect(&self) -> Rect {
        Rect::centered(self.body.pos, self.size)
    }

    /// Collision box: visual bounds scaled by `scale` around the center
    pub fn hitbox(&self, scale: f32) -> Rect {
        self.rect().shrunk(scale)
    }

    /// Close an expired invulnerability window. Call once per tick.
    pub fn refresh(&mut self, now: Timestamp) {
        if let ActorState::Invulnerable { until } = self.state {
            if now >= until {
                self.state = ActorState::Vulnerable;
            }
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(self.state, ActorState::Invulnerable { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }

    /// Apply a lethal collision at time `now`
    pub fn on_lethal_collision(&mut self, now: Timestamp, window: f64) -> HitOutcome {
        match self.state {
            ActorState::Invulnerable { .. } | ActorState::Dead => HitOutcome::Ignored,
            ActorState::Vulnerable => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.state = ActorState::Dead;
                    HitOutcome::Died
                } else {
                    self.state = ActorState::Invulnerable { until: now + window };
                    HitOutcome::LostLife { lives: self.lives }
                }
            }
        }
    }

    /// Grant a fresh invulnerability window (wave-clear breather).
    ///
    /// Never shortens a window that is already open, never revives the dead.
    pub fn grant_invulnerability(&mut self, now: Timestamp, window: f64) {
        let until = now + window;
        match self.state {
            ActorState::Dead => {}
            ActorState::Invulnerable { until: current } if current >= until => {}
            _ => self.state = ActorState::Invulnerable { until },
        }
    }

    /// One hostile death
    pub fn award_kill(&mut self) {
        self.score += 1;
    }

    pub fn award_points(&mut self, points: u64) {
        self.score += points;
    }

    /// One wave cleared
    pub fn advance_level(&mut self) {
        self.level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(lives: u8) -> Actor {
        Actor::new(Vec2::new(100.0, 100.0), Vec2::new(38.0, 80.0), lives)
    }

    #[test]
    fn test_lose_life_opens_window() {
        let mut a = actor(3);
        assert_eq!(a.on_lethal_collision(1.0, 2.0), HitOutcome::LostLife { lives: 2 });
        assert_eq!(a.state, ActorState::Invulnerable { until: 3.0 });
    }

    #[test]
    fn test_collisions_ignored_while_invulnerable() {
        let mut a = actor(3);
        a.on_lethal_collision(1.0, 2.0);
        for _ in 0..10 {
            assert_eq!(a.on_lethal_collision(1.5, 2.0), HitOutcome::Ignored);
        }
        assert_eq!(a.lives, 2);
    }

    #[test]
    fn test_window_expires_on_clock() {
        let mut a = actor(3);
        a.on_lethal_collision(1.0, 2.0);

        a.refresh(2.999);
        assert!(a.is_invulnerable());

        a.refresh(3.0);
        assert_eq!(a.state, ActorState::Vulnerable);
        assert_eq!(a.on_lethal_collision(3.0, 2.0), HitOutcome::LostLife { lives: 1 });
    }

    #[test]
    fn test_last_life_is_terminal() {
        let mut a = actor(1);
        assert_eq!(a.on_lethal_collision(0.0, 2.0), HitOutcome::Died);
        assert!(a.is_dead());
        assert_eq!(a.lives, 0);

        a.refresh(100.0);
        a.grant_invulnerability(100.0, 2.0);
        assert!(a.is_dead());
        assert_eq!(a.on_lethal_collision(100.0, 2.0), HitOutcome::Ignored);
    }

    #[test]
    fn test_zero_lives_clamped() {
        let mut a = actor(0);
        assert_eq!(a.on_lethal_collision(0.0, 2.0), HitOutcome::Died);
        assert_eq!(a.lives, 0);
    }

    #[test]
    fn test_breather_extends_but_never_shortens() {
        let mut a = actor(3);
        a.grant_invulnerability(0.0, 2.0);
        assert_eq!(a.state, ActorState::Invulnerable { until: 2.0 });

        a.grant_invulnerability(1.0, 2.0);
        assert_eq!(a.state, ActorState::Invulnerable { until: 3.0 });

        a.grant_invulnerability(0.5, 0.5);
        assert_eq!(a.state, ActorState::Invulnerable { until: 3.0 });
    }

    #[test]
    fn test_score_and_level_are_independent_of_lives() {
        let mut a = actor(1);
        a.on_lethal_collision(0.0, 2.0);
        a.award_kill();
        a.award_points(4);
        a.advance_level();
        assert_eq!(a.score, 5);
        assert_eq!(a.level, 2);
    }
}
