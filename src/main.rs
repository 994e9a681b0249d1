//! Breakout headless runner
//!
//! Drives the frame loop without a window: an autopilot feeds the keyboard,
//! frames are rendered into a draw list, and a run summary is printed as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use breakout::Settings;
use breakout::consts::MAX_FRAME_DT;
use breakout::input::{Key, Keyboard};
use breakout::render::DrawList;
use breakout::sim::{GameEvent, GameMode, GameState, level, process_input, render, tick};

#[derive(Parser, Debug)]
#[command(name = "breakout")]
#[command(about = "Headless driver for the Breakout simulation")]
struct Cli {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play with the autopilot for a number of frames
    Run {
        #[arg(long, default_value_t = 3_600)]
        frames: u32,
        /// Seconds per frame (capped)
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,
        /// Level to start on (0-based)
        #[arg(long, default_value_t = 0)]
        level: usize,
        /// Write the last frame's draw list here
        #[arg(long)]
        dump_frame: Option<PathBuf>,
    },
    /// Parse a level file and report its layout
    CheckLevel { path: PathBuf },
    /// Print the default settings as JSON
    DefaultConfig,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    frames: u32,
    final_mode: Option<GameMode>,
    level: usize,
    lives: u32,
    bricks_destroyed: u32,
    solid_hits: u32,
    paddle_hits: u32,
    power_ups_collected: u32,
    lives_lost: u32,
    levels_won: u32,
}

/// Tracks the ball with the paddle and presses through the menus
#[derive(Debug, Default)]
struct Autopilot {
    frame: u32,
}

impl Autopilot {
    fn drive(&mut self, state: &GameState, keys: &mut Keyboard) {
        self.frame += 1;
        // Release everything every other frame so edge-triggered keys re-arm
        if self.frame % 2 == 0 {
            keys.release_all();
            return;
        }

        match state.mode {
            GameMode::Menu | GameMode::Win => keys.press(Key::Enter),
            GameMode::Active => {
                let world = &state.world;
                let target = world.ball.center().x;
                let paddle = world.paddle.center().x;
                keys.set(Key::A, target < paddle - 10.0);
                keys.set(Key::D, target > paddle + 10.0);
                keys.set(Key::Space, world.ball.stuck);
            }
        }
    }
}

fn run(
    mut settings: Settings,
    frames: u32,
    dt: f32,
    seed: Option<u64>,
    start_level: usize,
    dump_frame: Option<PathBuf>,
) -> Result<RunSummary> {
    if frames == 0 {
        bail!("frames must be > 0");
    }
    if let Some(seed) = seed {
        settings.seed = seed;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    let mut state = GameState::new(&settings).context("failed to start game session")?;
    state.select_level(start_level);
    log::info!(
        "Running {frames} frames at dt={dt:.4} on level {}",
        state.level + 1
    );

    let mut keys = Keyboard::new();
    let mut pilot = Autopilot::default();
    let mut frame = DrawList::new();
    let mut summary = RunSummary::default();

    for _ in 0..frames {
        pilot.drive(&state, &mut keys);
        process_input(&mut state, &mut keys, dt);
        tick(&mut state, dt);
        frame.clear();
        render(&state, &mut frame);

        for event in &state.events {
            match event {
                GameEvent::BrickDestroyed { .. } => summary.bricks_destroyed += 1,
                GameEvent::SolidBrickHit { .. } => summary.solid_hits += 1,
                GameEvent::PaddleHit { .. } => summary.paddle_hits += 1,
                GameEvent::PowerUpCollected(_) => summary.power_ups_collected += 1,
                GameEvent::LifeLost { .. } => summary.lives_lost += 1,
                GameEvent::ModeChanged {
                    to: GameMode::Win, ..
                } => summary.levels_won += 1,
                _ => {}
            }
        }
        summary.frames += 1;
        if state.quit_requested {
            break;
        }
    }

    summary.final_mode = Some(state.mode);
    summary.level = state.level;
    summary.lives = state.lives;

    if let Some(path) = dump_frame {
        let json = serde_json::to_string_pretty(&frame)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Wrote {} draw commands to {}", frame.commands.len(), path.display());
    }

    Ok(summary)
}

fn check_level(path: PathBuf) -> Result<()> {
    let text = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let grid = level::parse(&text).with_context(|| format!("invalid level {}", path.display()))?;
    let count = |pred: fn(u32) -> bool| grid.iter().flatten().filter(|&&c| pred(c)).count();
    println!(
        "{}: {} rows x {} columns, {} solid, {} destructible",
        path.display(),
        grid.len(),
        grid.first().map_or(0, Vec::len),
        count(|c| c == 1),
        count(|c| c >= 2),
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Run {
            frames,
            dt,
            seed,
            level,
            dump_frame,
        } => {
            let summary = run(settings, frames, dt, seed, level, dump_frame)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::CheckLevel { path } => check_level(path)?,
        Commands::DefaultConfig => println!("{}", settings.to_json()?),
    }
    Ok(())
}
