use crate::config::{ConfigError, SessionConfig};
use crate::game::{Action, Stage, TableView};
use crate::session::{Session, HUMAN};
use std::time::{Duration, Instant};

/// Display names, indexed by seat.
pub const SEAT_NAMES: [&str; 2] = ["You", "Opponent"];

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    NewHand,
    Fold,
    CheckCall,
    Raise,
    RaiseUp,
    RaiseDown,
    RaiseMax,
    Restart,
    ToggleHelp,
}

#[derive(Debug)]
pub struct AppState {
    session: Session,
    raise: u64,
    help_open: bool,
    error: Option<String>,
    error_at: Option<Instant>,
}

impl AppState {
    const ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            session: Session::new(config)?,
            raise: 0,
            help_open: false,
            error: None,
            error_at: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> TableView {
        self.session.view()
    }

    /// Stake the raise key will submit.
    pub fn raise_amount(&self) -> u64 {
        self.raise
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Seat that ran out of chips, once the hand that broke it is over.
    pub fn game_over(&self) -> Option<usize> {
        self.session.game().busted_seat()
    }

    pub fn human_to_act(&self) -> bool {
        self.session.game().to_act() == Some(HUMAN)
    }

    /// Apply one input. Returns true when the table accepted it.
    pub fn handle_input(&mut self, action: InputAction, now: Instant) -> bool {
        let accepted = match action {
            InputAction::ToggleHelp => {
                self.help_open = !self.help_open;
                return false;
            }
            InputAction::RaiseUp => return self.nudge_raise(true),
            InputAction::RaiseDown => return self.nudge_raise(false),
            InputAction::RaiseMax => {
                if let Some(bounds) = self.session.game().raise_bounds() {
                    self.raise = bounds.max;
                }
                return false;
            }
            InputAction::Restart => {
                self.session.restart();
                self.raise = 0;
                self.set_error(None, now);
                return true;
            }
            InputAction::NewHand => self.session.start_hand(now).map(|_| ()),
            InputAction::Fold => self.session.act(HUMAN, Action::Fold, now).map(|_| ()),
            InputAction::CheckCall => {
                let action = if self.session.game().to_call(HUMAN) > 0 {
                    Action::Call
                } else {
                    Action::Check
                };
                self.session.act(HUMAN, action, now).map(|_| ())
            }
            InputAction::Raise => {
                let action = if self.session.game().to_call(HUMAN) > 0 {
                    Action::Raise(self.raise)
                } else {
                    Action::Bet(self.raise)
                };
                self.session.act(HUMAN, action, now).map(|_| ())
            }
        };
        match accepted {
            Ok(()) => {
                self.set_error(None, now);
                self.sync_raise();
                true
            }
            Err(err) => {
                self.set_error(Some(err.to_string()), now);
                false
            }
        }
    }

    /// Run due steps and expire stale messages.
    pub fn tick(&mut self, now: Instant) {
        if let Err(err) = self.session.poll(now) {
            self.set_error(Some(err.to_string()), now);
        }
        if self.error_at.is_some_and(|at| now.duration_since(at) >= Self::ERROR_TTL) {
            self.set_error(None, now);
        }
        self.sync_raise();
    }

    /// Keep the raise stake inside the current bounds.
    fn sync_raise(&mut self) {
        if !self.human_to_act() {
            return;
        }
        if let Some(bounds) = self.session.game().raise_bounds() {
            self.raise = self.raise.clamp(bounds.min, bounds.max.max(bounds.min));
        }
    }

    fn nudge_raise(&mut self, up: bool) -> bool {
        let Some(bounds) = self.session.game().raise_bounds() else {
            return false;
        };
        let step = self.session.game().config().big_blind;
        let next = if up { self.raise.saturating_add(step) } else { self.raise.saturating_sub(step) };
        self.raise = next.clamp(bounds.min, bounds.max.max(bounds.min));
        true
    }

    fn set_error(&mut self, error: Option<String>, now: Instant) {
        self.error_at = error.as_ref().map(|_| now);
        self.error = error;
    }

    /// One-line status for the footer.
    pub fn status_line(&self) -> String {
        let view = self.view();
        if let Some(seat) = self.game_over() {
            return format!("{} busted. Press X to restart.", SEAT_NAMES[seat]);
        }
        match view.stage {
            Stage::Init => "Press N to deal.".to_string(),
            Stage::HandOver => "Hand over. Press N for the next hand.".to_string(),
            Stage::Showdown => "Showdown...".to_string(),
            _ if view.runout => "Running out the board...".to_string(),
            _ => match view.to_act {
                Some(HUMAN) if view.to_call > 0 => format!("Your turn: {} to call.", view.to_call),
                Some(HUMAN) => "Your turn.".to_string(),
                Some(_) => "Opponent is thinking...".to_string(),
                None => "Dealing...".to_string(),
            },
        }
    }
}
