//! Burger Arena entry point
//!
//! Headless native host: runs a scripted session at a fixed frame time,
//! forwards audio cues and keeps the HUD strings current.
//!
//! Usage: `burger-arena [--seed N] [--frames N] [--tuning PATH]
//!         [--volume V] [--sfx-volume V] [--mute]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use burger_arena::sim::{Arena, AudioCue, ControlState, tick};
use burger_arena::{AudioManager, Hud, Tuning};

/// Fixed host frame time (~60 Hz)
const FRAME_MS: f32 = 16.0;
const DEFAULT_FRAMES: u64 = 3600;

struct Options {
    seed: u64,
    frames: u64,
    tuning: Option<PathBuf>,
    volume: Option<f32>,
    sfx_volume: Option<f32>,
    mute: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
        frames: DEFAULT_FRAMES,
        tuning: None,
        volume: None,
        sfx_volume: None,
        mute: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--seed" => {
                options.seed = value()?.parse().map_err(|e| format!("bad --seed: {e}"))?;
            }
            "--frames" => {
                options.frames = value()?.parse().map_err(|e| format!("bad --frames: {e}"))?;
            }
            "--tuning" => options.tuning = Some(PathBuf::from(value()?)),
            "--volume" => {
                options.volume = Some(value()?.parse().map_err(|e| format!("bad --volume: {e}"))?);
            }
            "--sfx-volume" => {
                options.sfx_volume =
                    Some(value()?.parse().map_err(|e| format!("bad --sfx-volume: {e}"))?);
            }
            "--mute" => options.mute = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

/// Scripted input: strafe back and forth, tapping fire
fn autopilot(frame: u64) -> ControlState {
    let sweep = (frame / 90).is_multiple_of(2);
    ControlState {
        left: sweep,
        right: !sweep,
        fire: (frame / 10).is_multiple_of(2),
        ..Default::default()
    }
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => {
            let tuning = Tuning::default();
            tuning.validate()?;
            tuning
        }
    };

    let mut arena = Arena::new(tuning, options.seed);
    let mut audio = AudioManager::new();
    if let Some(volume) = options.volume {
        audio.set_master_volume(volume);
    }
    if let Some(volume) = options.sfx_volume {
        audio.set_sfx_volume(volume);
    }
    audio.set_muted(options.mute);
    let mut hud = Hud::new(&arena);
    log::info!("{} | {}", hud.health_text, hud.score_text);

    for frame in 0..options.frames {
        let cues = tick(&mut arena, &autopilot(frame), FRAME_MS);
        audio.dispatch(&cues);
        if hud.refresh(&arena) {
            log::info!("{} | {}", hud.health_text, hud.score_text);
        }
    }

    log::info!(
        "Session over after {} frames (replay with --seed {}): score {}, health {}, defeated {}",
        arena.frame(),
        arena.seed(),
        arena.score(),
        arena.player().health(),
        arena.defeated()
    );
    log::info!(
        "Cues: {} shots, {} kills, {} bounces, {} hits taken",
        audio.play_count(AudioCue::ShotFired),
        audio.play_count(AudioCue::Kill),
        audio.play_count(AudioCue::Bounce),
        audio.play_count(AudioCue::Damage)
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Burger Arena (native) starting...");

    let result = parse_args()
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(run);
    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("burger-arena: {e}");
        std::process::exit(1);
    }
}
