//! Spawn policies
//!
//! - Waves (shooters): a cleared arena is refilled with one more hostile
//!   than the previous wave.
//! - Stochastic (runner): independent per-tick rolls for each obstacle kind.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::registry::{HostileId, HostileTemplate, ObstacleKind, Registry};

/// Wave-based refill policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDirector {
    /// Size of the most recently spawned wave
    wave_size: u32,
    /// Number of waves spawned so far, including the first
    waves_spawned: u32,
}

impl WaveDirector {
    pub fn new() -> Self {
        Self {
            wave_size: 0,
            waves_spawned: 0,
        }
    }

    pub fn wave_size(&self) -> u32 {
        self.wave_size
    }

    pub fn waves_spawned(&self) -> u32 {
        self.waves_spawned
    }

    /// Spawn the opening wave of `count` hostiles
    pub fn spawn_initial<R: Rng>(
        &mut self,
        count: u32,
        registry: &mut Registry,
        rng: &mut R,
        bounds: &Bounds,
        template: &HostileTemplate,
    ) -> Vec<HostileId> {
        self.spawn_wave(count, registry, rng, bounds, template)
    }

    /// Refill the arena if every hostile is gone.
    ///
    /// Returns the IDs of the new wave, or `None` if hostiles remain. The
    /// whole wave is inserted before returning.
    pub fn refill<R: Rng>(
        &mut self,
        registry: &mut Registry,
        rng: &mut R,
        bounds: &Bounds,
        template: &HostileTemplate,
    ) -> Option<Vec<HostileId>> {
        if registry.alive_hostiles() > 0 {
            return None;
        }
        let next = self.next_wave_size();
        Some(self.spawn_wave(next, registry, rng, bounds, template))
    }

    /// One more hostile than the previous wave
    fn next_wave_size(&self) -> u32 {
        self.wave_size.saturating_add(1)
    }

    fn spawn_wave<R: Rng>(
        &mut self,
        count: u32,
        registry: &mut Registry,
        rng: &mut R,
        bounds: &Bounds,
        template: &HostileTemplate,
    ) -> Vec<HostileId> {
        self.wave_size = count;
        self.waves_spawned += 1;
        (0..count)
            .map(|_| registry.spawn_hostile(rng, bounds, template))
            .collect()
    }
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one tick's spawn rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnRoll {
    pub decoration: bool,
    pub collectible: bool,
    pub hazard: bool,
}

/// Per-tick Bernoulli spawner for the runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticDirector {
    pub decoration_chance: f64,
    pub collectible_chance: f64,
    pub hazard_chance: f64,
    /// Points awarded per collectible
    pub collectible_points: u64,
}

impl Default for StochasticDirector {
    fn default() -> Self {
        Self {
            decoration_chance: 0.01,
            collectible_chance: 0.10,
            hazard_chance: 0.01,
            collectible_points: 1,
        }
    }
}

impl StochasticDirector {
    /// Draw the three independent rolls, always in the same order:
    /// decoration, collectible, hazard.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> SpawnRoll {
        SpawnRoll {
            decoration: rng.random_bool(self.decoration_chance.clamp(0.0, 1.0)),
            collectible: rng.random_bool(self.collectible_chance.clamp(0.0, 1.0)),
            hazard: rng.random_bool(self.hazard_chance.clamp(0.0, 1.0)),
        }
    }

    /// Roll and spawn this tick's obstacles at the trailing edge
    pub fn spawn<R: Rng>(
        &self,
        registry: &mut Registry,
        rng: &mut R,
        bounds: &Bounds,
    ) -> SpawnRoll {
        let roll = self.roll(rng);
        if roll.decoration {
            registry.spawn_obstacle(ObstacleKind::Decoration, bounds);
        }
        if roll.collectible {
            registry.spawn_obstacle(
                ObstacleKind::Collectible {
                    points: self.collectible_points,
                },
                bounds,
            );
        }
        if roll.hazard {
            registry.spawn_obstacle(ObstacleKind::Hazard, bounds);
        }
        roll
    }
}
