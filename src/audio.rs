//! Semantic audio cues
//!
//! The simulation never plays sound. It emits cue identifiers each frame and
//! a collaborator implementing [`AudioSink`] maps them to actual playback.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Projectile fired
    Shoot,
    /// Projectile hit a hostile
    Hit,
    /// Hostile destroyed
    Kill,
    /// Actor lost a life
    LoseLife,
    /// Session over
    GameOver,
    /// Arena cleared, next wave incoming
    WaveClear,
    /// Runner actor left the ground
    Jump,
    /// Runner collectible picked up
    Collect,
    /// Farm: tree planted
    Plant,
    /// Farm: money earned
    Kaching,
    /// Farm: tractor bought
    Tractor,
}

impl AudioCue {
    /// Relative playback volume for this cue (0.0 - 1.0)
    pub fn base_volume(&self) -> f32 {
        match self {
            AudioCue::Shoot => 0.2,
            _ => 1.0,
        }
    }
}

/// Playback side of the audio boundary
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// Forward a frame's cues to the sink using the player's volume settings
pub fn dispatch_cues(cues: &[AudioCue], settings: &Settings, sink: &mut dyn AudioSink) {
    let vol = settings.effective_volume();
    if vol <= 0.0 {
        return;
    }
    for &cue in cues {
        sink.play(cue, cue.base_volume() * vol);
    }
}

/// A cue that still has plays left
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingCue {
    cue: AudioCue,
    next_at: f64,
    remaining: u32,
    spacing: f64,
}

/// Delayed repeats ("play this 3 times, 100ms apart"), drained on the
/// owner's clock. Dropping the queue cancels everything still pending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CueQueue {
    pending: Vec<PendingCue>,
}

impl CueQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `times` plays of `cue`, the first at `now`
    pub fn schedule_repeat(&mut self, cue: AudioCue, times: u32, spacing: f64, now: f64) {
        if times == 0 {
            return;
        }
        self.pending.push(PendingCue {
            cue,
            next_at: now,
            remaining: times,
            spacing: spacing.max(0.0),
        });
    }

    /// Pop every play that is due at `now`, in scheduling order.
    ///
    /// A repeat emits at most once per drain, so a long frame delays later
    /// plays instead of bunching them together.
    pub fn drain_due(&mut self, now: f64) -> Vec<AudioCue> {
        let mut due = Vec::new();
        for pending in &mut self.pending {
            if pending.next_at <= now {
                due.push(pending.cue);
                pending.remaining -= 1;
                pending.next_at = now + pending.spacing;
            }
        }
        self.pending.retain(|p| p.remaining > 0);
        due
    }

    /// Drop every pending play
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
