//! Session lifecycle
//!
//! The host owns at most one running [`Session`]. Ending, exiting or losing
//! drops the session, which also drops its invulnerability window and any
//! queued cue repeats.

use crate::audio::{AudioCue, AudioSink, dispatch_cues};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::SessionError;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::collision::Bounds;
use crate::sim::state::{Session, SessionConfig};
use crate::sim::tick::{Frame, TickInput, tick};
use crate::snapshot::RenderSink;

/// Longest frame the fixed-step loop will try to catch up on
const MAX_FRAME_SECS: f32 = 0.1;

pub struct GameHost {
    pub settings: Settings,
    bounds: Bounds,
    session: Option<Session>,
    last_score: Option<u64>,
    high_scores: HighScores,
    /// Unconsumed time for the fixed-step loop
    accumulator: f32,
    /// Seconds of play since the host was created
    uptime: f64,
}

impl GameHost {
    pub fn new(settings: Settings, bounds: Bounds) -> Self {
        Self {
            settings,
            bounds,
            session: None,
            last_score: None,
            high_scores: HighScores::new(),
            accumulator: 0.0,
            uptime: 0.0,
        }
    }

    /// Replace the leaderboard, e.g. with one loaded from storage
    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    /// Start a session with an explicit config, replacing any running one
    pub fn start_session(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        let session = Session::new(config)?;
        if self.session.is_some() {
            log::info!("Discarding running session for a new one");
        }
        self.session = Some(session);
        self.accumulator = 0.0;
        Ok(())
    }

    /// Start a session from the player's settings
    pub fn start_from_settings(&mut self, seed: u64) -> Result<(), SessionError> {
        let config = self.settings.session_config(self.bounds, seed);
        self.start_session(config)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// Score of the most recently finished session
    pub fn last_score(&self) -> Option<u64> {
        self.last_score
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Run one tick of `dt` seconds. Returns `None` with no session running.
    ///
    /// A game over discards the session after its final frame is produced.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Option<Frame> {
        let session = self.session.as_mut()?;
        let frame = tick(session, input, dt);
        self.uptime += dt.max(0.0) as f64;
        if frame.is_game_over() {
            self.end_session();
        }
        Some(frame)
    }

    /// Feed a variable frame time through the fixed-step loop.
    ///
    /// One-shot inputs (fire press, jump, pause) only apply to the first
    /// substep. Stops early if the session ends.
    pub fn advance(&mut self, input: &TickInput, elapsed: f32) -> Vec<Frame> {
        if self.session.is_none() {
            return Vec::new();
        }
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_SECS);

        let mut input = input.clone();
        let mut frames = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let Some(frame) = self.frame(&input, SIM_DT) else {
                break;
            };
            frames.push(frame);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.fire_pressed = false;
            input.jump = false;
            input.pause = false;
        }
        if self.session.is_none() {
            self.accumulator = 0.0;
        }
        frames
    }

    /// Hand a frame to the presentation collaborators
    pub fn present(&self, frame: &Frame, render: &mut dyn RenderSink, audio: &mut dyn AudioSink) {
        if self.settings.effective_flicker() || !frame.snapshot.actor.dimmed {
            render.draw(&frame.snapshot);
        } else {
            let mut snapshot = frame.snapshot.clone();
            snapshot.actor.dimmed = false;
            render.draw(&snapshot);
        }
        dispatch_cues(&frame.cues, &self.settings, audio);
    }

    /// Finish the running session and record its score
    pub fn end_session(&mut self) -> Option<u64> {
        let session = self.session.take()?;
        let score = session.score();
        let level = session.actor.level;
        let variant = session.config.variant;

        self.last_score = Some(score);
        self.accumulator = 0.0;
        if let Some(rank) =
            self.high_scores
                .add_score(score, level, variant, self.uptime * 1000.0)
        {
            log::info!("New high score #{}: {}", rank, score);
        }
        log::info!("Session ended with score {} at level {}", score, level);
        Some(score)
    }

    /// Abandon the running session without recording a score.
    ///
    /// Returns the cues to play: the game-over sound if a session was
    /// running, nothing otherwise.
    pub fn exit_to_menu(&mut self) -> Vec<AudioCue> {
        self.accumulator = 0.0;
        if self.session.take().is_none() {
            return Vec::new();
        }
        log::info!("Exited to menu");
        vec![AudioCue::GameOver]
    }
}
