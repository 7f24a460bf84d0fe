//! Playout CLI: play many self-play games and report how many pegs are left.
//!
//! Usage:
//!   cargo run --release --bin playout -- --games 1000 --preset classic
//!   cargo run --release --bin playout -- --games 200 --size 8 --strategy first --json

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use peg_solitaire_engine::engine::playout::{run_playouts, PlayoutConfig};
use peg_solitaire_engine::engine::presets::{
    load_default_presets, load_presets, MAX_BASE_ROW_SIZE, MIN_BASE_ROW_SIZE,
};
use peg_solitaire_engine::engine::strategy::strategy_by_name;

#[derive(Parser)]
#[command(name = "playout", about = "Run self-play peg solitaire playouts")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Base random seed; game i uses seed + i
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Preset name (default: the presets file's default)
    #[arg(long, env = "PEG_PRESET")]
    preset: Option<String>,

    /// Path to presets.toml (default: auto-discover)
    #[arg(long, env = "PEG_PRESETS")]
    presets: Option<PathBuf>,

    /// Override the preset's base row size
    #[arg(long)]
    size: Option<usize>,

    /// Move strategy: "random" or "first"
    #[arg(long, default_value = "random")]
    strategy: String,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let presets = match &cli.presets {
        Some(path) => load_presets(path)?,
        None => load_default_presets(),
    };
    let (name, preset) = presets.resolve(cli.preset.as_deref())?;

    let base_row_size = cli.size.unwrap_or(preset.base_row_size);
    if !(MIN_BASE_ROW_SIZE..=MAX_BASE_ROW_SIZE).contains(&base_row_size) {
        return Err(format!(
            "base row size {} outside {}..={}",
            base_row_size, MIN_BASE_ROW_SIZE, MAX_BASE_ROW_SIZE
        )
        .into());
    }

    let strategy = strategy_by_name(&cli.strategy)
        .ok_or_else(|| format!("unknown strategy '{}' (expected random or first)", cli.strategy))?;

    let config = PlayoutConfig {
        base_row_size,
        start_hole: preset.start_hole,
        num_games: cli.games,
        base_seed: cli.seed,
    };
    eprintln!(
        "Playout: {} games, preset={}, base_row_size={}, start_hole={:?}, strategy={}, seed={}",
        config.num_games,
        name,
        config.base_row_size,
        config.start_hole,
        strategy.name(),
        config.base_seed
    );

    let report = run_playouts(&config, strategy.as_ref())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}
