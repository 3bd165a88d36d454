//! Headless level runner.
//!
//! Run with: `blueprint-run --level demos/platformer.json --ticks 600 --press RIGHT@0-120`

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blueprint_engine::{GameConfig, GameState};
use blueprint_runner::{FileLevelLoader, GameRunner, KeyScript};
use clap::Parser;

/// Run a blueprint level without a window, driving input from the command line
#[derive(Parser)]
#[command(name = "blueprint-run")]
#[command(version)]
struct Cli {
    /// Level JSON file to start with
    #[arg(short, long, value_name = "PATH")]
    level: PathBuf,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Engine configuration JSON (missing fields use defaults)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scripted key: KEY, KEY@TICK or KEY@START-END. Repeatable.
    #[arg(short, long = "press", value_name = "KEY[@TICK]")]
    press: Vec<KeyScript>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            GameConfig::from_json(&json)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    let ticks_per_second = (1.0 / config.fixed_dt).round().max(1.0) as u64;

    let level_name = cli
        .level
        .file_name()
        .and_then(|name| name.to_str())
        .context("level path has no file name")?
        .to_string();
    let mut runner = GameRunner::new(config, FileLevelLoader::beside(&cli.level));
    runner.load(&level_name)?;

    let mut fired = 0;
    let mut failures = 0;
    for tick in 0..cli.ticks {
        for script in &cli.press {
            for event in script.events_at(tick) {
                runner.push_input(event);
            }
        }
        let report = runner.step();
        fired += report.fired;
        failures += report.failures.len();

        if (tick + 1) % ticks_per_second == 0 {
            let snapshot = runner.snapshot();
            log::info!(
                "t={}s tick {} objects {} events {} failures {} camera ({:.1}, {:.1})",
                (tick + 1) / ticks_per_second,
                snapshot.tick,
                snapshot.len(),
                fired,
                failures,
                snapshot.camera_center.x,
                snapshot.camera_center.y
            );
            fired = 0;
            failures = 0;
        }
        if runner.controller().state() != GameState::Running {
            log::info!("stopped after {} ticks", tick + 1);
            break;
        }
    }

    let controller = runner.controller();
    log::info!("final status: {:?}", controller.status());
    for view in runner.snapshot().objects.iter().filter(|view| !view.stats.is_empty()) {
        let stats: Vec<String> = view
            .stats
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        log::info!("{} {} [{}]", view.group, view.id, stats.join(", "));
    }
    Ok(())
}
