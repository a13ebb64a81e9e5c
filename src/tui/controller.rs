use crate::tui::app::{AppState, InputAction};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick(Instant::now());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an input. Returns true when the user asked to quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    let now = Instant::now();
    if app.help_open() {
        if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
            let _ = app.handle_input(InputAction::ToggleHelp, now);
        }
        return false;
    }
    let input = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char(' ') => InputAction::NewHand,
        KeyCode::Char('f') | KeyCode::Char('F') => InputAction::Fold,
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('k') | KeyCode::Char('K') => {
            InputAction::CheckCall
        }
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => InputAction::Raise,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => InputAction::RaiseUp,
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => InputAction::RaiseDown,
        KeyCode::Char('a') | KeyCode::Char('A') => InputAction::RaiseMax,
        KeyCode::Char('x') | KeyCode::Char('X') => InputAction::Restart,
        _ => return false,
    };
    let _ = app.handle_input(input, now);
    false
}
