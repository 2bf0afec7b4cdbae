//! Player settings and preferences
//!
//! Stored as a JSON string by whatever front end hosts the game.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::collision::Bounds;
use crate::sim::state::{GameVariant, SessionConfig};

/// Range offered by the baddie count picker
pub const MIN_HOSTILE_COUNT: u32 = 1;
pub const MAX_HOSTILE_COUNT: u32 = 20;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Fire continuously while the fire key is held
    pub auto_fire: bool,
    /// Variant started from the menu
    pub variant: GameVariant,
    /// Hostiles in the opening wave (1 - 20)
    pub hostile_count: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no invulnerability flicker)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_fire: true,
            variant: GameVariant::Blasters,
            hostile_count: 1,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Volume multiplier applied to every cue (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Whether the presentation layer should honor `ActorPose::dimmed`
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }

    /// Baddie count clamped to the picker range
    pub fn clamped_hostile_count(&self) -> u32 {
        self.hostile_count.clamp(MIN_HOSTILE_COUNT, MAX_HOSTILE_COUNT)
    }

    /// Build a session config for the preferred variant
    pub fn session_config(&self, bounds: Bounds, seed: u64) -> SessionConfig {
        let mut config = SessionConfig::for_variant(self.variant, bounds);
        config.auto_fire = self.auto_fire;
        config.seed = seed;
        if self.variant.uses_waves() {
            config.hostile_count = self.clamped_hostile_count();
        }
        config
    }

    /// Parse settings saved by [`Settings::to_json`]. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        log::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
