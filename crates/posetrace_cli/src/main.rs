//! Posetrace demo driver.
//!
//! Records a perturbed humanoid pose sequence (or imports one from JSON),
//! then replays it from the start at the requested speed, printing a frame
//! report whenever the cursor moves.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use posetrace_core::PoseSnapshot;
use posetrace_replay::{PoseHistory, PosePlayer};
use posetrace_rig::{
    apply_jitter, apply_joint_perturbation, spawn_rig, DEFAULT_ANGLE_RANGE_DEG, DEFAULT_CORRECTION,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "posetrace", about = "Record and replay humanoid rig pose histories")]
struct Cli {
    /// Number of frames to record
    #[arg(long, default_value_t = 30)]
    frames: usize,

    /// Playback speed in frames per second (clamped to 5-20)
    #[arg(long, default_value_t = 10.0)]
    speed: f32,

    /// Extra random drift radius applied before each capture
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,

    /// RNG seed for reproducible recordings
    #[arg(long)]
    seed: Option<u64>,

    /// Write the recorded history to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Replay a JSON history instead of recording a new one
    #[arg(long)]
    import: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut rig = spawn_rig();
    let mut history = PoseHistory::new();

    match &cli.import {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading history from {}", path.display()))?;
            let frames: Vec<PoseSnapshot> =
                serde_json::from_str(&json).context("parsing history JSON")?;
            history.load(frames);
            tracing::info!(frames = history.frame_count(), "imported history");
        }
        None => {
            history.record(&rig);
            for _ in 1..cli.frames.max(1) {
                apply_joint_perturbation(
                    &mut rig,
                    &mut rng,
                    DEFAULT_ANGLE_RANGE_DEG,
                    DEFAULT_CORRECTION,
                );
                if cli.jitter > 0.0 {
                    apply_jitter(&mut rig, &mut rng, cli.jitter);
                }
                history.record(&rig);
            }
            tracing::info!(frames = history.frame_count(), "recorded history");
        }
    }

    if let Some(path) = &cli.export {
        let json = serde_json::to_string_pretty(&history.export())?;
        fs::write(path, json)
            .with_context(|| format!("writing history to {}", path.display()))?;
        println!("exported {} frames to {}", history.frame_count(), path.display());
    }

    let mut player = PosePlayer::new(history, rig);
    if player.frame_count() == 0 {
        println!("no frames to replay");
        return Ok(());
    }
    player.set_speed(cli.speed);
    player.go_to_start();
    player.take_frame_changed();

    println!("{}", report::frame_report(&player));
    println!("{}", report::stats_report(&player));

    // Headless replay: tick in exact frame intervals until the boundary
    // pause, reporting at each frame change.
    player.play();
    let interval = 1.0 / player.speed_hz();
    while player.is_playing() {
        player.tick(interval);
        if player.take_frame_changed() {
            println!("{}", report::frame_report(&player));
            println!("{}", report::stats_report(&player));
        }
    }

    Ok(())
}
