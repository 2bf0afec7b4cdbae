//! Arcade Sim - frame-driven simulation core for small 2D arcade games
//!
//! Core modules:
//! - `sim`: Session simulation (kinematics, collisions, actor state, spawning, tick)
//! - `snapshot`: Immutable per-frame render data
//! - `audio`: Semantic audio cues and delayed repeat queue
//! - `host`: Session lifecycle (start, frame, end, exit to menu)
//! - `farm`: Tree farm clicker economy
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod farm;
pub mod highscores;
pub mod host;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::{ConfigError, FarmError, SessionError};
pub use highscores::HighScores;
pub use host::GameHost;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Motion values were tuned per 60 Hz frame; they are stored here per second.
pub mod consts {
    /// Frame rate the per-frame tunings were authored against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / REFERENCE_FPS;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Actor sprite size (152x320 sheet scaled down 4x)
    pub const ACTOR_WIDTH: f32 = 152.0 / 4.0;
    pub const ACTOR_HEIGHT: f32 = 320.0 / 4.0;
    /// Fraction of the actor's visual bounds used for hostile collisions
    pub const ACTOR_HITBOX_SCALE: f32 = 0.6;
    /// Starting position of the shooter actor
    pub const ACTOR_START_X: f32 = 50.0;
    pub const ACTOR_START_Y: f32 = 50.0;
    pub const STARTING_LIVES: u8 = 3;
    /// Invulnerability window after losing a life or clearing a wave (seconds)
    pub const INVULNERABILITY_SECS: f64 = 2.0;
    /// Flash interval while invulnerable (seconds)
    pub const FLICKER_INTERVAL_SECS: f64 = 0.1;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 5.0 * REFERENCE_FPS;
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Hostile defaults
    pub const HOSTILE_SIZE: f32 = 100.0;
    /// Per-axis hostile speed is drawn from [-range, range)
    pub const HOSTILE_SPEED_RANGE: f32 = 2.0 * REFERENCE_FPS;
    /// Largest opening wave a session config may ask for
    pub const MAX_OPENING_WAVE: u32 = 1000;

    /// Wave clear chime: number of plays and spacing (seconds)
    pub const WAVE_CLEAR_CHIME_REPEATS: u32 = 3;
    pub const WAVE_CLEAR_CHIME_SPACING: f64 = 0.15;

    /// Runner ground line, measured up from the bottom edge
    pub const RUNNER_GROUND_OFFSET: f32 = 40.0;
    /// Runner actor horizontal position
    pub const RUNNER_ACTOR_X: f32 = 120.0;
    pub const RUNNER_ACTOR_WIDTH: f32 = 40.0;
    pub const RUNNER_ACTOR_HEIGHT: f32 = 60.0;
    /// Runner vertical physics (pixels/s, pixels/s²)
    pub const RUNNER_JUMP_SPEED: f32 = 720.0;
    pub const RUNNER_GRAVITY: f32 = 2160.0;
}

/// Unit vector for a heading in radians, where 0 points up the screen
#[inline]
pub fn heading_to_dir(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_zero_points_up() {
        let dir = heading_to_dir(0.0);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);

        let right = heading_to_dir(FRAC_PI_2);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI) + PI).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI) + PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }
}
