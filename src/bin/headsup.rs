use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use headsup_holdem::config::{OddChip, SessionConfig, TableConfig};
use headsup_holdem::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Heads-up Texas Hold'em against a scripted opponent.
#[derive(Parser, Debug)]
#[command(name = "headsup", version, about, long_about = None)]
struct Args {
    /// Starting chips per seat
    #[arg(long, default_value_t = 1000)]
    stack: u64,
    #[arg(long, default_value_t = 10)]
    small_blind: u64,
    #[arg(long, default_value_t = 20)]
    big_blind: u64,
    /// Give the odd chip of a split pot to the seat without the button
    #[arg(long)]
    odd_chip_out_of_position: bool,
    /// Seed for shuffles and opponent decisions
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let odd_chip =
            if self.odd_chip_out_of_position { OddChip::OutOfPosition } else { OddChip::Unassigned };
        let table = TableConfig::default()
            .with_starting_stack(self.stack)
            .with_blinds(self.small_blind, self.big_blind)
            .with_odd_chip(odd_chip);
        let config = SessionConfig::new(table);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// The TUI owns the terminal, so logs only go to a file.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("headsup_holdem=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path)?;
    }
    let mut app = AppState::new(args.session_config())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if !io::stdout().is_terminal() {
        println!(
            "headsup needs a real terminal (TTY). Version: {}",
            headsup_holdem::VERSION
        );
        return Ok(());
    }
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(50);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
