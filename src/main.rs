use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use peg_solitaire_engine::engine::observer::TracingObserver;
use peg_solitaire_engine::engine::presets::{load_default_presets, load_presets};
use peg_solitaire_engine::games::peg_solitaire::controller::{
    DirectionResolver, InputMode, RejectReason, SelectOutcome, Selection,
};
use peg_solitaire_engine::games::peg_solitaire::{Coord, Game};

#[derive(Parser)]
#[command(name = "peg-solitaire", about = "Play triangular peg solitaire in the terminal")]
struct Cli {
    /// Preset name (default: the presets file's default)
    #[arg(long, env = "PEG_PRESET")]
    preset: Option<String>,

    /// Path to presets.toml (default: auto-discover)
    #[arg(long, env = "PEG_PRESETS")]
    presets: Option<PathBuf>,

    /// Override the preset's input mode: "click_click" or "drag_drop"
    #[arg(long)]
    mode: Option<String>,

    /// Override the preset's direction resolver: "graph" or "geometric"
    #[arg(long)]
    resolver: Option<String>,

    /// Seed for the random start hole
    #[arg(long)]
    seed: Option<u64>,

    /// List presets and exit
    #[arg(long)]
    list: bool,
}

const HELP: &str = "commands: <row> <col> select a slot | board | reset | help | quit";

fn parse_mode(value: &str) -> Result<InputMode, String> {
    match value {
        "click_click" | "click" => Ok(InputMode::ClickClick),
        "drag_drop" | "drag" => Ok(InputMode::DragDrop),
        other => Err(format!("unknown input mode '{}'", other)),
    }
}

fn parse_resolver(value: &str) -> Result<DirectionResolver, String> {
    match value {
        "graph" => Ok(DirectionResolver::Graph),
        "geometric" => Ok(DirectionResolver::Geometric),
        other => Err(format!("unknown resolver '{}'", other)),
    }
}

fn parse_coord(line: &str) -> Option<Coord> {
    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',').filter(|p| !p.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coord::new(row, col))
}

fn describe(game: &Game, outcome: &SelectOutcome) -> String {
    let board = game.board();
    let at = |slot: usize| board.coord(slot).map_or_else(|| slot.to_string(), |c| c.to_string());
    match outcome {
        SelectOutcome::StartHoleChosen { slot } => format!("start hole at {}", at(*slot)),
        SelectOutcome::Activated { slot } => format!("holding {}", at(*slot)),
        SelectOutcome::Released { slot } => format!("put {} back", at(*slot)),
        SelectOutcome::Jumped { jump } => {
            format!("{} over {} to {}", at(jump.from), at(jump.over), at(jump.to))
        }
        SelectOutcome::Rejected { reason } => match reason {
            RejectReason::UnknownSlot => "no such slot".to_string(),
            RejectReason::NoDirection => "not in line with the held peg".to_string(),
            RejectReason::IllegalJump => "no legal jump lands there".to_string(),
        },
        SelectOutcome::Ignored => "nothing to do there".to_string(),
        SelectOutcome::GameOver { remaining, verdict, .. } => verdict.message(*remaining),
    }
}

fn prompt(game: &Game) -> &'static str {
    match game.selection() {
        Selection::AwaitingStartHole => "pick the start hole> ",
        Selection::Active(_) => "jump to> ",
        Selection::Idle => "peg> ",
        Selection::GameOver => "game over (reset or quit)> ",
    }
}

fn corner_list(game: &Game) -> String {
    let board = game.board();
    board
        .corners()
        .iter()
        .filter_map(|&id| board.coord(id))
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let presets = match &cli.presets {
        Some(path) => load_presets(path)?,
        None => load_default_presets(),
    };

    if cli.list {
        for name in presets.names() {
            let p = &presets.presets[name];
            println!(
                "{:>10}: base row {:2}, {} slots  {}",
                name,
                p.base_row_size,
                p.slot_count(),
                p.description.as_deref().unwrap_or("")
            );
        }
        return Ok(());
    }

    let (name, preset) = presets.resolve(cli.preset.as_deref())?;
    let mut settings = preset.to_settings(cli.seed);
    // CLI overrides on top of the preset
    if let Some(v) = cli.mode.as_deref() {
        settings.input_mode = parse_mode(v)?;
    }
    if let Some(v) = cli.resolver.as_deref() {
        settings.resolver = parse_resolver(v)?;
    }
    tracing::info!(
        preset = name,
        base_row_size = settings.base_row_size,
        mode = ?settings.input_mode,
        resolver = ?settings.resolver,
        "starting game"
    );

    let mut game = Game::new(settings)?;
    game.subscribe(Box::new(TracingObserver));

    println!("Preset '{}' ({})", name, preset.coloring.name());
    println!("{}", HELP);
    if game.selection() == Selection::AwaitingStartHole {
        println!("corners: {}", corner_list(&game));
    }
    println!("{}", game.board());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", prompt(&game));
        stdout.flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        match line {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "help" | "?" => println!("{}", HELP),
            "board" => println!("{}", game.board()),
            "reset" => {
                game.reset()?;
                println!("{}", game.board());
                if game.selection() == Selection::AwaitingStartHole {
                    println!("corners: {}", corner_list(&game));
                }
            }
            _ => {
                let Some(coord) = parse_coord(line) else {
                    println!("expected '<row> <col>'; {}", HELP);
                    continue;
                };
                let Some(slot) = game.board().slot_id(coord) else {
                    println!("{} is not on the board", coord);
                    continue;
                };
                let outcome = game.try_select(slot);
                println!("{}", describe(&game, &outcome));
                if matches!(
                    outcome,
                    SelectOutcome::Jumped { .. }
                        | SelectOutcome::StartHoleChosen { .. }
                        | SelectOutcome::GameOver { .. }
                ) {
                    println!("{}", game.board());
                }
            }
        }
    }
    Ok(())
}
