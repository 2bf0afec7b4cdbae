//! Per-frame simulation step
//!
//! Order within a tick is fixed and observable:
//! 1. apply input
//! 2. integrate projectiles, hostiles, obstacles and the actor
//! 3. resolve collisions (projectiles vs hostiles, then actor)
//! 4. compact the registry, one death event per removed hostile
//! 5. run the spawn policy
//! 6. emit snapshot and audio cues

use glam::Vec2;

use super::actor::HitOutcome;
use super::collision::{intersects, intersects_rect};
use super::kinematics::{bounce_within, integrate};
use super::registry::ObstacleKind;
use super::state::{GameEvent, GamePhase, GameVariant, Session, runner_ground_y};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::heading_to_dir;
use crate::snapshot::FrameSnapshot;

/// Logical input state for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Fire held (used in auto-fire mode)
    pub fire: bool,
    /// Fire pressed this tick (used in single-shot mode)
    pub fire_pressed: bool,
    /// Jump (runner), already debounced by the input source
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Output of one tick
#[derive(Debug, Clone)]
pub struct Frame {
    pub snapshot: FrameSnapshot,
    pub events: Vec<GameEvent>,
    pub cues: Vec<AudioCue>,
}

impl Frame {
    fn idle(session: &Session) -> Self {
        Self {
            snapshot: FrameSnapshot::capture(session),
            events: Vec::new(),
            cues: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.snapshot.phase == GamePhase::GameOver
    }
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> Frame {
    if session.phase == GamePhase::GameOver {
        return Frame::idle(session);
    }

    // Handle pause toggle
    if input.pause {
        session.phase = match session.phase {
            GamePhase::Playing => GamePhase::Paused,
            _ => GamePhase::Playing,
        };
    }
    if session.phase == GamePhase::Paused {
        return Frame::idle(session);
    }

    let dt = dt.max(0.0);
    session.time_ticks += 1;
    session.clock += dt as f64;
    let now = session.clock;
    session.actor.refresh(now);

    let mut events = Vec::new();

    apply_input(session, input, dt, &mut events);
    integrate_all(session, dt);
    resolve_projectile_hits(session, &mut events);
    match session.config.variant {
        GameVariant::Blasters => resolve_actor_hostile_hits(session, &mut events),
        GameVariant::Spider => {}
        GameVariant::Runner => resolve_actor_obstacle_hits(session, &mut events),
    }

    let bounds = session.config.bounds;
    for hostile in session.registry.remove_dead(&bounds) {
        session.actor.award_kill();
        events.push(GameEvent::Killed { hostile: hostile.id });
    }

    if session.actor.is_dead() {
        finish(session, &mut events);
    } else {
        run_spawn_policy(session, &mut events);
    }

    let mut cues: Vec<AudioCue> = events.iter().filter_map(GameEvent::cue).collect();
    cues.extend(session.cues.drain_due(now));

    Frame {
        snapshot: FrameSnapshot::capture(session),
        events,
        cues,
    }
}

fn apply_input(session: &mut Session, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let variant = session.config.variant;
    let actor = &mut session.actor;

    if variant == GameVariant::Runner {
        let on_ground = actor.body.pos.y >= runner_ground_y(&session.config.bounds) - 0.5;
        if input.jump && on_ground {
            actor.body.vel.y = -RUNNER_JUMP_SPEED;
            events.push(GameEvent::Jumped);
        }
        return;
    }

    // Opposite keys cancel out
    let turn = (input.turn_right as i32 - input.turn_left as i32) as f32;
    actor.heading = crate::normalize_angle(actor.heading + turn * variant.turn_rate() * dt);

    let thrust = (input.move_forward as i32 - input.move_backward as i32) as f32;
    actor.body.vel = heading_to_dir(actor.heading) * thrust * variant.thrust_speed();

    let wants_fire = if session.config.auto_fire {
        input.fire
    } else {
        input.fire_pressed
    };
    if wants_fire {
        let id = session
            .registry
            .spawn_projectile(actor.body.pos, actor.heading, session.config.damage());
        events.push(GameEvent::Shot { projectile: id });
    }
}

fn integrate_all(session: &mut Session, dt: f32) {
    let bounds = session.config.bounds;

    for projectile in &mut session.registry.projectiles {
        integrate(&mut projectile.body, dt);
    }
    for hostile in &mut session.registry.hostiles {
        integrate(&mut hostile.body, dt);
        bounce_within(&mut hostile.body, Vec2::new(hostile.width, hostile.height), &bounds);
    }
    for obstacle in &mut session.registry.obstacles {
        integrate(&mut obstacle.body, dt);
    }

    let actor = &mut session.actor;
    if session.config.variant == GameVariant::Runner {
        actor.body.vel.y += RUNNER_GRAVITY * dt;
        integrate(&mut actor.body, dt);
        let ground = runner_ground_y(&bounds);
        if actor.body.pos.y >= ground {
            actor.body.pos.y = ground;
            actor.body.vel.y = 0.0;
        }
    } else {
        integrate(&mut actor.body, dt);
        actor.body.pos = actor
            .body
            .pos
            .clamp(Vec2::ZERO, Vec2::new(bounds.width, bounds.height));
    }
}

/// Every projectile damages every live hostile it overlaps this tick, then is
/// spent. Hostiles already killed this tick take no further hits.
fn resolve_projectile_hits(session: &mut Session, events: &mut Vec<GameEvent>) {
    let hostiles = &mut session.registry.hostiles;
    let projectiles = &mut session.registry.projectiles;

    for projectile in projectiles.iter_mut() {
        if projectile.consumed {
            continue;
        }
        for hostile in hostiles.iter_mut() {
            if !hostile.alive || !intersects(projectile.body.pos, &hostile.rect()) {
                continue;
            }
            hostile.take_damage(projectile.damage);
            projectile.consumed = true;
            events.push(GameEvent::Hit {
                hostile: hostile.id,
                projectile: projectile.id,
            });
        }
    }
}

fn resolve_actor_hostile_hits(session: &mut Session, events: &mut Vec<GameEvent>) {
    let now = session.clock;
    let window = session.config.invulnerability_secs;
    let hitbox = session.actor.hitbox(session.config.hitbox_scale);

    for hostile in &session.registry.hostiles {
        if !hostile.alive || !intersects_rect(&hitbox, &hostile.rect()) {
            continue;
        }
        if apply_lethal_hit(session.actor.on_lethal_collision(now, window), events) {
            break;
        }
    }
}

fn resolve_actor_obstacle_hits(session: &mut Session, events: &mut Vec<GameEvent>) {
    let now = session.clock;
    let window = session.config.invulnerability_secs;
    let hitbox = session.actor.hitbox(session.config.hitbox_scale);
    let actor = &mut session.actor;

    for obstacle in &mut session.registry.obstacles {
        if obstacle.consumed
            || !obstacle.kind.collides()
            || !intersects_rect(&hitbox, &obstacle.rect())
        {
            continue;
        }
        match obstacle.kind {
            ObstacleKind::Collectible { points } => {
                obstacle.consumed = true;
                actor.award_points(points);
                events.push(GameEvent::Collected {
                    obstacle: obstacle.id,
                    points,
                });
            }
            ObstacleKind::Hazard => {
                if apply_lethal_hit(actor.on_lethal_collision(now, window), events) {
                    break;
                }
            }
            ObstacleKind::Decoration => {}
        }
    }
}

/// Record a lethal hit's outcome. Returns true once the actor is dead.
fn apply_lethal_hit(outcome: HitOutcome, events: &mut Vec<GameEvent>) -> bool {
    match outcome {
        HitOutcome::Ignored => false,
        HitOutcome::LostLife { lives } => {
            log::info!("Life lost, {} remaining", lives);
            events.push(GameEvent::LifeLost { lives });
            false
        }
        HitOutcome::Died => true,
    }
}

fn finish(session: &mut Session, events: &mut Vec<GameEvent>) {
    session.phase = GamePhase::GameOver;
    session.cues.cancel_all();
    let score = session.actor.score;
    log::info!(
        "Game over: score {} at level {} after {} ticks",
        score,
        session.actor.level,
        session.time_ticks
    );
    events.push(GameEvent::GameOver { score });
}

fn run_spawn_policy(session: &mut Session, events: &mut Vec<GameEvent>) {
    let bounds = session.config.bounds;

    if !session.config.variant.uses_waves() {
        let spawner = session.config.spawner;
        spawner.spawn(&mut session.registry, &mut session.rng, &bounds);
        return;
    }

    let template = session.config.hostile_template();
    let Some(wave) = session
        .waves
        .refill(&mut session.registry, &mut session.rng, &bounds, &template)
    else {
        return;
    };

    let now = session.clock;
    session.actor.advance_level();
    if session.config.variant.has_lives() {
        session
            .actor
            .grant_invulnerability(now, session.config.invulnerability_secs);
    }
    session.cues.schedule_repeat(
        AudioCue::WaveClear,
        WAVE_CLEAR_CHIME_REPEATS,
        WAVE_CLEAR_CHIME_SPACING,
        now,
    );
    log::info!(
        "Wave cleared, level {} with {} hostiles",
        session.actor.level,
        wave.len()
    );
    events.push(GameEvent::WaveCleared {
        level: session.actor.level,
        wave_size: wave.len() as u32,
    });
}
