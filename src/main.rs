//! Pitch Sim
//!
//! Headless runner: loads a config, plays a short scripted session through
//! the threaded engine and logs (or prints) the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pitch_sim::{
    VERSION,
    config::SimConfig,
    engine::{Simulation, TraceRenderer},
    game::{
        actor::Side,
        input::{Direction, InputEvent, PointerButton, ScriptedInput},
    },
};

#[derive(Parser)]
#[command(name = "pitch-sim")]
#[command(about = "Barrier-synchronized two-team ball simulation", long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after this many ticks (default: 600)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Spawn seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    let cli = Cli::parse();

    info!("Pitch Sim v{}", VERSION);

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.max_ticks = cli.ticks.or(config.max_ticks).or(Some(600));

    info!(
        players_per_team = config.players_per_team,
        fps = config.target_fps,
        seed = config.seed,
        max_ticks = ?config.max_ticks,
        "configuration loaded"
    );

    let script = demo_script(&config);
    let outcome = Simulation::start(config, TraceRenderer::new(), script)?.run()?;
    let report = outcome.report;

    info!("=== Run Results ===");
    info!("Ticks: {} ({:?})", report.ticks, report.stop_reason);
    info!("Score: left goal {} - right goal {}", report.score.0, report.score.1);
    info!("Events: {}", report.events.len());
    info!("Frames presented: {}", outcome.renderer.frames());
    info!("Clock overruns: {}", report.clock_overruns);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// A short session: both teams push toward the ball, the pointer sweeps the
/// ball area and periodically grabs, winds up and kicks toward the right goal.
fn demo_script(config: &SimConfig) -> ScriptedInput {
    let center = config.field.center();
    let right_goal = pitch_sim::Vec2::new(
        config.field.right,
        (config.goal_mouth.top + config.goal_mouth.bottom) * 0.5,
    );
    let mut script = ScriptedInput::new();

    for t in 0..config.max_ticks.unwrap_or(600) {
        if t % 4 == 0 {
            script.push(t, InputEvent::Move { team: Side::Left, direction: Direction::Right });
            script.push(t, InputEvent::Move { team: Side::Right, direction: Direction::Left });
        }
        if t % 30 == 10 {
            script.push(t, InputEvent::Move { team: Side::Left, direction: Direction::Down });
            script.push(t, InputEvent::Move { team: Side::Right, direction: Direction::Up });
        }

        match t % 120 {
            60 => {
                script.push(t, InputEvent::PointerMoved(center));
                script.push(t, InputEvent::PointerDown(PointerButton::Primary));
            }
            70 => script.push(t, InputEvent::PointerDown(PointerButton::Secondary)),
            90 => {
                script.push(t, InputEvent::PointerMoved(right_goal));
                script.push(t, InputEvent::PointerUp(PointerButton::Secondary));
            }
            _ => {}
        }
    }

    script
}
