//! Terminal Minesweeper runner.
//!
//! One loop polls for a key, applies at most one command to the board and redraws when something changed.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use clisweeper_core::{Board, CellCount, Coord, Difficulty, GameConfig};
use input::Command;
use renderer::TerminalRenderer;
use view::Viewport;

mod input;
mod renderer;
mod view;

/// Keeps the loop from spinning while no key is pressed.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: easy (9x9, 10 mines), medium (16x16, 40) or hard (30x16, 99)
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Custom board width, overrides the preset
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom board height, overrides the preset
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Custom mine count, overrides the preset
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write logs to this file, the terminal is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => {
                GameConfig::new((width, height), mines).context("Invalid custom board")
            }
            _ => Ok(self.difficulty.config()),
        }
    }
}

/// Seeds for consecutive games, a forced seed only fixes the first one.
struct Seeds {
    forced: Option<u64>,
}

impl Seeds {
    fn next(&mut self) -> u64 {
        self.forced.take().unwrap_or_else(rand::random)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.game_config()?;
    log::debug!("config: {:?}, seed: {:?}", config, args.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, Seeds { forced: args.seed });

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Could not create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: GameConfig, mut seeds: Seeds) -> Result<()> {
    let mut board = Board::new(config, seeds.next())?;
    let mut dirty = true;
    let mut shown_secs = 0;

    loop {
        let snapshot = board.snapshot();
        if dirty || snapshot.elapsed_secs != shown_secs {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            term.draw(&view::render(&snapshot, Viewport::new(w, h)))?;
            shown_secs = snapshot.elapsed_secs;
            dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match input::map_key(key, board.is_finished()) {
                    Some(Command::Play(action)) => {
                        let outcome = board.apply(action);
                        log::trace!("{:?} -> {:?}", action, outcome);
                        if outcome.is_final() {
                            log::info!("game over: {:?} after {}s", outcome, board.elapsed_secs());
                        }
                        dirty = outcome.has_update();
                    }
                    Some(Command::NewGame) => {
                        board = Board::new(config, seeds.next())?;
                        log::debug!("new game");
                        dirty = true;
                    }
                    Some(Command::Exit) => return Ok(()),
                    None => {}
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
