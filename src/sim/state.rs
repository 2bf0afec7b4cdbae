//! Session state and configuration
//!
//! A `Session` owns everything one play-through touches. There are no
//! globals: the host creates a session on start and drops it on exit.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::actor::{Actor, Timestamp};
use super::collision::Bounds;
use super::registry::{HostileId, HostileTemplate, ObstacleId, ProjectileId, Registry};
use super::spawn::{StochasticDirector, WaveDirector};
use crate::audio::{AudioCue, CueQueue};
use crate::consts::*;
use crate::error::{ConfigError, SessionError};

/// Which mini-game a session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameVariant {
    /// Rocket vs. bouncing baddies, three lives
    #[default]
    Blasters,
    /// Same arena, tougher spiders, no lives
    Spider,
    /// Side-scrolling jumper with random obstacles
    Runner,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Blasters => "Blasters",
            GameVariant::Spider => "Spider",
            GameVariant::Runner => "Runner",
        }
    }

    /// Whether the actor has lives that collisions can take away
    pub fn has_lives(&self) -> bool {
        match self {
            GameVariant::Blasters | GameVariant::Runner => true,
            GameVariant::Spider => false,
        }
    }

    /// Whether hostiles come in waves (vs. stochastic obstacles)
    pub fn uses_waves(&self) -> bool {
        !matches!(self, GameVariant::Runner)
    }

    /// Turn rate in radians per second
    pub fn turn_rate(&self) -> f32 {
        let degrees_per_frame = match self {
            GameVariant::Blasters => 5.0,
            GameVariant::Spider => 3.0,
            GameVariant::Runner => 0.0,
        };
        (degrees_per_frame * REFERENCE_FPS).to_radians()
    }

    /// Thrust speed in pixels per second
    pub fn thrust_speed(&self) -> f32 {
        match self {
            GameVariant::Blasters => 5.0 * REFERENCE_FPS,
            GameVariant::Spider => 3.0 * REFERENCE_FPS,
            GameVariant::Runner => 0.0,
        }
    }
}

impl FromStr for GameVariant {
    type Err = ConfigError;

    /// Case-insensitive variant name; "arlo" is the spider page's name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blasters" => Ok(GameVariant::Blasters),
            "spider" | "arlo" => Ok(GameVariant::Spider),
            "runner" => Ok(GameVariant::Runner),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Options recognized by `start_session`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub variant: GameVariant,
    /// Size of the opening wave
    pub hostile_count: u32,
    pub damage_per_shot: u32,
    pub hostile_max_health: u32,
    /// Fire every tick while fire is held, instead of once per press
    pub auto_fire: bool,
    pub bounds: Bounds,
    #[serde(default = "default_lives")]
    pub lives: u8,
    #[serde(default = "default_invulnerability")]
    pub invulnerability_secs: f64,
    /// Fraction of the actor's visual bounds used for collisions
    #[serde(default = "default_hitbox_scale")]
    pub hitbox_scale: f32,
    #[serde(default)]
    pub seed: u64,
    /// Runner spawn chances
    #[serde(default)]
    pub spawner: StochasticDirector,
}

fn default_lives() -> u8 {
    STARTING_LIVES
}

fn default_invulnerability() -> f64 {
    INVULNERABILITY_SECS
}

fn default_hitbox_scale() -> f32 {
    ACTOR_HITBOX_SCALE
}

impl SessionConfig {
    /// Blasters: 5-hit baddies, single damage shots, three lives
    pub fn blasters(bounds: Bounds) -> Self {
        Self {
            variant: GameVariant::Blasters,
            hostile_count: 1,
            damage_per_shot: 1,
            hostile_max_health: 5,
            auto_fire: false,
            bounds,
            lives: STARTING_LIVES,
            invulnerability_secs: INVULNERABILITY_SECS,
            hitbox_scale: ACTOR_HITBOX_SCALE,
            seed: 0,
            spawner: StochasticDirector::default(),
        }
    }

    /// Spider: 100 health baddies, 10 damage shots, no lives
    pub fn spider(bounds: Bounds) -> Self {
        Self {
            variant: GameVariant::Spider,
            hostile_max_health: 100,
            damage_per_shot: 10,
            ..Self::blasters(bounds)
        }
    }

    /// Runner: random obstacles, three lives
    pub fn runner(bounds: Bounds) -> Self {
        Self {
            variant: GameVariant::Runner,
            ..Self::blasters(bounds)
        }
    }

    pub fn for_variant(variant: GameVariant, bounds: Bounds) -> Self {
        match variant {
            GameVariant::Blasters => Self::blasters(bounds),
            GameVariant::Spider => Self::spider(bounds),
            GameVariant::Runner => Self::runner(bounds),
        }
    }

    /// Decode and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check startup preconditions
    pub fn validate(&self) -> Result<(), SessionError> {
        let Bounds { width, height } = self.bounds;
        if self.bounds.is_degenerate() {
            return Err(SessionError::DegenerateBounds { width, height });
        }
        let size = if self.variant.uses_waves() {
            HOSTILE_SIZE
        } else {
            RUNNER_GROUND_OFFSET + RUNNER_ACTOR_HEIGHT
        };
        if width < size || height < size {
            return Err(SessionError::BoundsTooSmall {
                width,
                height,
                size,
            });
        }
        if self.hostile_count == 0 {
            return Err(SessionError::NoHostiles);
        }
        if self.hostile_count > MAX_OPENING_WAVE {
            return Err(SessionError::TooManyHostiles {
                count: self.hostile_count,
                max: MAX_OPENING_WAVE,
            });
        }
        if self.damage_per_shot == 0 {
            return Err(SessionError::ZeroDamage);
        }
        if self.hostile_max_health == 0 {
            return Err(SessionError::ZeroHealth);
        }
        // Written so NaN fails too
        if !(self.hitbox_scale > 0.0 && self.hitbox_scale <= 1.0) {
            return Err(SessionError::InvalidHitboxScale(self.hitbox_scale));
        }
        if !(self.invulnerability_secs.is_finite() && self.invulnerability_secs >= 0.0) {
            return Err(SessionError::InvalidInvulnerability(
                self.invulnerability_secs,
            ));
        }
        Ok(())
    }

    pub fn hostile_template(&self) -> HostileTemplate {
        HostileTemplate {
            size: HOSTILE_SIZE,
            max_health: clamp_i32(self.hostile_max_health),
            speed_range: HOSTILE_SPEED_RANGE,
        }
    }

    pub fn damage(&self) -> i32 {
        clamp_i32(self.damage_per_shot)
    }
}

fn clamp_i32(value: u32) -> i32 {
    value.min(i32::MAX as u32) as i32
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Actor died; the session no longer changes
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot { projectile: ProjectileId },
    Hit { hostile: HostileId, projectile: ProjectileId },
    Killed { hostile: HostileId },
    LifeLost { lives: u8 },
    WaveCleared { level: u32, wave_size: u32 },
    Jumped,
    Collected { obstacle: ObstacleId, points: u64 },
    GameOver { score: u64 },
}

impl GameEvent {
    /// Immediate audio cue for this event.
    ///
    /// Wave clears play a queued chime instead, see `CueQueue`.
    pub fn cue(&self) -> Option<AudioCue> {
        match self {
            GameEvent::Shot { .. } => Some(AudioCue::Shoot),
            GameEvent::Hit { .. } => Some(AudioCue::Hit),
            GameEvent::Killed { .. } => Some(AudioCue::Kill),
            GameEvent::LifeLost { .. } => Some(AudioCue::LoseLife),
            GameEvent::WaveCleared { .. } => None,
            GameEvent::Jumped => Some(AudioCue::Jump),
            GameEvent::Collected { .. } => Some(AudioCue::Collect),
            GameEvent::GameOver { .. } => Some(AudioCue::GameOver),
        }
    }
}

/// One play-through
#[derive(Debug, Clone)]
pub struct Session {
    pub config: SessionConfig,
    pub phase: GamePhase,
    pub actor: Actor,
    pub registry: Registry,
    pub waves: WaveDirector,
    /// Session clock in seconds; only advances while playing
    pub clock: Timestamp,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Delayed cue repeats, cancelled with the session
    pub cues: CueQueue,
    pub rng: Pcg32,
}

impl Session {
    /// Validate the config and set up the opening state
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let actor = match config.variant {
            GameVariant::Runner => Actor::new(
                Vec2::new(RUNNER_ACTOR_X, runner_ground_y(&config.bounds)),
                Vec2::new(RUNNER_ACTOR_WIDTH, RUNNER_ACTOR_HEIGHT),
                config.lives,
            ),
            _ => Actor::new(
                Vec2::new(ACTOR_START_X, ACTOR_START_Y),
                Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
                config.lives,
            ),
        };

        let mut session = Self {
            phase: GamePhase::Playing,
            actor,
            registry: Registry::new(),
            waves: WaveDirector::new(),
            clock: 0.0,
            time_ticks: 0,
            cues: CueQueue::new(),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        };

        if session.config.variant.uses_waves() {
            let template = session.config.hostile_template();
            session.waves.spawn_initial(
                session.config.hostile_count,
                &mut session.registry,
                &mut session.rng,
                &session.config.bounds,
                &template,
            );
        }

        log::info!(
            "{} session started (seed {}, {} hostiles)",
            session.config.variant.as_str(),
            session.config.seed,
            session.registry.hostiles.len()
        );

        Ok(session)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.actor.score
    }
}

/// Center height of a runner actor standing on the ground line
pub fn runner_ground_y(bounds: &Bounds) -> f32 {
    bounds.height - RUNNER_GROUND_OFFSET - RUNNER_ACTOR_HEIGHT / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn test_new_session_spawns_opening_wave() {
        let config = SessionConfig {
            hostile_count: 4,
            ..SessionConfig::blasters(bounds())
        };
        let session = Session::new(config).expect("valid config");
        assert_eq!(session.registry.hostiles.len(), 4);
        assert_eq!(session.waves.wave_size(), 4);
        assert_eq!(session.actor.lives, STARTING_LIVES);
        assert_eq!(session.actor.level, 1);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_runner_has_no_hostiles() {
        let session = Session::new(SessionConfig::runner(bounds())).expect("valid config");
        assert!(session.registry.hostiles.is_empty());
        assert!((session.actor.body.pos.y - runner_ground_y(&bounds())).abs() < 1e-4);
    }

    #[test]
    fn test_variant_presets() {
        let spider = SessionConfig::spider(bounds());
        assert_eq!(spider.hostile_max_health, 100);
        assert_eq!(spider.damage_per_shot, 10);
        assert!(!spider.variant.has_lives());
        assert!(GameVariant::Blasters.has_lives());
        assert!(GameVariant::Blasters.turn_rate() > GameVariant::Spider.turn_rate());
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("Blasters".parse::<GameVariant>().ok(), Some(GameVariant::Blasters));
        assert_eq!("ARLO".parse::<GameVariant>().ok(), Some(GameVariant::Spider));
        assert_eq!("runner".parse::<GameVariant>().ok(), Some(GameVariant::Runner));
        assert!(matches!(
            "pong".parse::<GameVariant>(),
            Err(ConfigError::UnknownVariant(name)) if name == "pong"
        ));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let config = SessionConfig::blasters(Bounds::new(0.0, 600.0));
        assert_eq!(
            Session::new(config).err(),
            Some(SessionError::DegenerateBounds {
                width: 0.0,
                height: 600.0
            })
        );
    }

    #[test]
    fn test_small_bounds_rejected() {
        let config = SessionConfig::blasters(Bounds::new(80.0, 600.0));
        assert!(matches!(
            config.validate(),
            Err(SessionError::BoundsTooSmall { .. })
        ));
    }

    #[test]
    fn test_zero_values_rejected() {
        let base = SessionConfig::blasters(bounds());
        let no_hostiles = SessionConfig {
            hostile_count: 0,
            ..base.clone()
        };
        let no_damage = SessionConfig {
            damage_per_shot: 0,
            ..base.clone()
        };
        let no_health = SessionConfig {
            hostile_max_health: 0,
            ..base
        };
        assert_eq!(no_hostiles.validate(), Err(SessionError::NoHostiles));
        assert_eq!(no_damage.validate(), Err(SessionError::ZeroDamage));
        assert_eq!(no_health.validate(), Err(SessionError::ZeroHealth));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let base = SessionConfig::blasters(bounds());

        let huge_wave = SessionConfig {
            hostile_count: 4_000_000_000,
            ..base.clone()
        };
        assert_eq!(
            huge_wave.validate(),
            Err(SessionError::TooManyHostiles {
                count: 4_000_000_000,
                max: MAX_OPENING_WAVE
            })
        );
        let largest = SessionConfig {
            hostile_count: MAX_OPENING_WAVE,
            ..base.clone()
        };
        assert!(largest.validate().is_ok());

        for scale in [0.0, -0.5, 1.5, f32::NAN] {
            let config = SessionConfig {
                hitbox_scale: scale,
                ..base.clone()
            };
            assert!(matches!(
                config.validate(),
                Err(SessionError::InvalidHitboxScale(_))
            ));
        }

        for secs in [-1.0, f64::NAN, f64::INFINITY] {
            let config = SessionConfig {
                invulnerability_secs: secs,
                ..base.clone()
            };
            assert!(matches!(
                config.validate(),
                Err(SessionError::InvalidInvulnerability(_))
            ));
        }
    }

    #[test]
    fn test_huge_wave_json_rejected() {
        let json = r#"{
            "variant": "Blasters",
            "hostile_count": 4000000000,
            "damage_per_shot": 1,
            "hostile_max_health": 5,
            "auto_fire": true,
            "bounds": {"width": 800.0, "height": 600.0}
        }"#;
        assert!(matches!(
            SessionConfig::from_json(json),
            Err(ConfigError::Session(SessionError::TooManyHostiles { .. }))
        ));
    }

    #[test]
    fn test_config_from_json_fills_defaults() {
        let json = r#"{
            "variant": "Spider",
            "hostile_count": 3,
            "damage_per_shot": 10,
            "hostile_max_health": 100,
            "auto_fire": true,
            "bounds": { "width": 1024.0, "height": 768.0 }
        }"#;
        let config = SessionConfig::from_json(json).expect("valid json");
        assert_eq!(config.variant, GameVariant::Spider);
        assert_eq!(config.lives, STARTING_LIVES);
        assert_eq!(config.invulnerability_secs, INVULNERABILITY_SECS);
        assert!(config.auto_fire);
    }

    #[test]
    fn test_config_from_json_validates() {
        let json = r#"{
            "variant": "Blasters",
            "hostile_count": 0,
            "damage_per_shot": 1,
            "hostile_max_health": 5,
            "auto_fire": false,
            "bounds": { "width": 800.0, "height": 600.0 }
        }"#;
        assert!(matches!(
            SessionConfig::from_json(json),
            Err(ConfigError::Session(SessionError::NoHostiles))
        ));
        assert!(matches!(
            SessionConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_event_cues() {
        assert_eq!(GameEvent::Shot { projectile: 1 }.cue(), Some(AudioCue::Shoot));
        assert_eq!(
            GameEvent::WaveCleared {
                level: 2,
                wave_size: 2
            }
            .cue(),
            None
        );
        assert_eq!(GameEvent::GameOver { score: 3 }.cue(), Some(AudioCue::GameOver));
    }
}
