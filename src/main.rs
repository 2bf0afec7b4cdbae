//! Headless demo driver
//!
//! Plays each variant with a scripted input pattern and a short farm round,
//! logging what a renderer and speaker would receive. `RUST_LOG=debug` shows
//! the per-second HUD and every cue.
//!
//! Usage: `arcade-sim [SETTINGS_JSON] [VARIANT...]`

use arcade_sim::GameHost;
use arcade_sim::Settings;
use arcade_sim::audio::{AudioCue, AudioSink};
use arcade_sim::consts::SIM_DT;
use arcade_sim::farm::Farm;
use arcade_sim::sim::{Bounds, GameVariant, TickInput};
use arcade_sim::snapshot::{FrameSnapshot, RenderSink};

/// Simulated session length per variant (seconds)
const DEMO_SECS: f32 = 60.0;

struct LogRenderer {
    last_second: u64,
}

impl RenderSink for LogRenderer {
    fn draw(&mut self, snapshot: &FrameSnapshot) {
        let second = snapshot.clock as u64;
        if second != self.last_second {
            self.last_second = second;
            log::debug!(
                "t={}s score={} lives={:?} level={} hostiles={} obstacles={}",
                second,
                snapshot.hud.score,
                snapshot.hud.lives,
                snapshot.hud.level,
                snapshot.hostiles.len(),
                snapshot.obstacles.len()
            );
        }
    }
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::debug!("cue {:?} @ {:.2}", cue, volume);
    }
}

/// Spin in place and shoot, or hop every second in the runner
fn scripted_input(variant: GameVariant, frame: u32) -> TickInput {
    match variant {
        GameVariant::Runner => TickInput {
            jump: frame % 60 == 0,
            ..Default::default()
        },
        _ => TickInput {
            turn_right: true,
            move_forward: frame % 120 < 30,
            fire: true,
            fire_pressed: frame % 10 == 0,
            ..Default::default()
        },
    }
}

fn load_settings() -> Settings {
    let Some(json) = std::env::args().nth(1) else {
        return Settings::default();
    };
    match Settings::from_json(&json) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring settings argument: {}", e);
            Settings::default()
        }
    }
}

/// Variants named after the settings argument, or all of them
fn requested_variants() -> Vec<GameVariant> {
    let named: Vec<GameVariant> = std::env::args()
        .skip(2)
        .filter_map(|arg| match arg.parse::<GameVariant>() {
            Ok(variant) => Some(variant),
            Err(e) => {
                log::warn!("Skipping argument: {}", e);
                None
            }
        })
        .collect();
    if named.is_empty() {
        vec![GameVariant::Blasters, GameVariant::Spider, GameVariant::Runner]
    } else {
        named
    }
}

fn play_variant(host: &mut GameHost, variant: GameVariant, seed: u64) {
    host.settings.variant = variant;
    if let Err(e) = host.start_from_settings(seed) {
        log::error!("Could not start {}: {}", variant.as_str(), e);
        return;
    }

    let mut renderer = LogRenderer { last_second: 0 };
    let mut audio = LogAudio;
    let frames = (DEMO_SECS / SIM_DT) as u32;

    for n in 0..frames {
        let input = scripted_input(variant, n);
        for frame in host.advance(&input, SIM_DT) {
            host.present(&frame, &mut renderer, &mut audio);
        }
        if !host.is_playing() {
            break;
        }
    }

    let score = if host.is_playing() {
        host.end_session()
    } else {
        host.last_score()
    };
    println!("{:>8}: score {}", variant.as_str(), score.unwrap_or(0));
}

fn play_farm() {
    let mut farm = Farm::new();
    let field = farm.fields()[0].id;
    if let Err(e) = farm.buy_tractor(field).and_then(|_| farm.plant_field(field)) {
        log::warn!("Farm setup failed: {}", e);
        return;
    }
    let mut audio = LogAudio;
    for _ in 0..60 {
        for cue in farm.advance(0.1) {
            audio.play(cue, 1.0);
        }
    }
    match farm.harvest_field(field) {
        Ok(earned) => println!("    farm: harvested ${}, balance ${}", earned, farm.money()),
        Err(e) => log::warn!("Harvest failed: {}", e),
    }
}

fn main() {
    env_logger::init();
    log::info!("Arcade Sim (headless) starting...");

    let mut host = GameHost::new(load_settings(), Bounds::new(800.0, 600.0));
    for (seed, variant) in requested_variants().into_iter().enumerate() {
        play_variant(&mut host, variant, seed as u64 + 1);
    }
    play_farm();

    if let Some(top) = host.high_scores().top_score() {
        println!("high score: {}", top);
    }
    log::debug!("{}", host.high_scores().to_json());
}
