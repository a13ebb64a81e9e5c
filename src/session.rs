//! A single local table: one human seat, one policy seat, paced steps.
//!
//! The session never sleeps. Callers pass the current [`Instant`] and call
//! [`Session::poll`] from their event loop; steps that have come due run in
//! order, each applying its mutation fully before the next one is queued.

use crate::config::{ConfigError, Pacing, SessionConfig};
use crate::deck::Deck;
use crate::game::{Action, ActionError, Game, Progress, Stage, TableView};
use crate::policy::{Opponent, Situation};
use crate::schedule::{Scheduler, Step, Task};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::{debug, trace, warn};

pub const HUMAN: usize = 0;
pub const OPPONENT: usize = 1;

#[derive(Debug)]
pub struct Session {
    game: Game,
    scheduler: Scheduler,
    opponent: Opponent,
    deck_rng: ChaCha8Rng,
    pacing: Pacing,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let game = Game::new(config.table)?;
        let deck_rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                ChaCha8Rng::from_seed(seed)
            }
        };
        let opponent = Opponent::new(config.seed.map(|s| s.wrapping_add(1)));
        Ok(Self { game, scheduler: Scheduler::new(), opponent, deck_rng, pacing: config.pacing })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn view(&self) -> TableView {
        self.game.view()
    }

    /// When the next deferred step comes due, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn pending_steps(&self) -> usize {
        self.scheduler.len()
    }

    /// Deal the next hand. Steps still queued for the previous hand are
    /// cancelled.
    pub fn start_hand(&mut self, now: Instant) -> Result<Progress, ActionError> {
        let deck = Deck::shuffled(&mut self.deck_rng);
        self.start_hand_with_deck(deck, now)
    }

    pub fn start_hand_with_deck(&mut self, deck: Deck, now: Instant) -> Result<Progress, ActionError> {
        let progress = self.game.start_hand_with_deck(deck)?;
        self.scheduler.cancel_stale(self.game.generation());
        self.follow(progress, now);
        Ok(progress)
    }

    /// Apply a command from the human seat.
    pub fn act(&mut self, seat: usize, action: Action, now: Instant) -> Result<Progress, ActionError> {
        if seat != HUMAN {
            return Err(ActionError::IllegalAction(format!("seat {seat} is played by the policy")));
        }
        let progress = self.game.act(seat, action)?;
        self.follow(progress, now);
        Ok(progress)
    }

    /// Run every step due at or before `now`; returns how many ran.
    ///
    /// Steps queued by a running step are timed from that step's due time,
    /// so a single late poll catches up on the whole chain.
    pub fn poll(&mut self, now: Instant) -> Result<usize, ActionError> {
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_due(now) {
            if task.generation != self.game.generation() {
                warn!(
                    step = ?task.step,
                    queued_for = task.generation,
                    live = self.game.generation(),
                    "dropping stale step"
                );
                continue;
            }
            if let Some(progress) = self.run(task)? {
                self.follow(progress, task.due);
                ran += 1;
            }
        }
        Ok(ran)
    }

    /// Back to starting stacks with nothing pending.
    pub fn restart(&mut self) {
        self.scheduler.cancel_all();
        self.game.reset();
    }

    fn run(&mut self, task: Task) -> Result<Option<Progress>, ActionError> {
        match task.step {
            Step::OpponentTurn => self.opponent_turn(),
            Step::Advance => {
                let stage = self.game.stage();
                if !(stage.is_betting() || stage == Stage::Showdown) {
                    trace!(stage = %stage, "advance step with nothing to do");
                    return Ok(None);
                }
                self.game.advance().map(Some)
            }
        }
    }

    fn opponent_turn(&mut self) -> Result<Option<Progress>, ActionError> {
        if self.game.to_act() != Some(OPPONENT) {
            trace!("policy seat is not to act");
            return Ok(None);
        }
        let seat = self.game.seat(OPPONENT);
        let hole = seat
            .hole()
            .ok_or_else(|| ActionError::IllegalAction("policy seat holds no cards".into()))?;
        let situation = Situation {
            stage: self.game.stage(),
            hole,
            board: self.game.board(),
            to_call: self.game.to_call(OPPONENT),
            pot: self.game.pot(),
            raise_available: self.game.raise_available(),
            big_blind: self.game.config().big_blind,
            stack: seat.chips(),
        };
        let action = self.opponent.decide(&situation);
        let to_call = situation.to_call;
        match self.game.act(OPPONENT, action) {
            Ok(progress) => Ok(Some(progress)),
            Err(err) => {
                warn!(error = %err, action = ?action, "policy action rejected, falling back");
                let fallback = if to_call > 0 { Action::Fold } else { Action::Check };
                self.game.act(OPPONENT, fallback).map(Some)
            }
        }
    }

    /// Queue whatever the table needs next.
    fn follow(&mut self, progress: Progress, at: Instant) {
        let generation = self.game.generation();
        let (delay, step) = match progress {
            Progress::Await(OPPONENT) => (self.pacing.think, Step::OpponentTurn),
            Progress::RoundComplete if self.game.runout_pending() => (self.pacing.runout, Step::Advance),
            Progress::RoundComplete => (self.pacing.street, Step::Advance),
            Progress::Showdown => (self.pacing.showdown, Step::Advance),
            _ => return,
        };
        debug!(generation, step = ?step, delay_ms = delay.as_millis() as u64, "deferring step");
        self.scheduler.schedule(at + delay, generation, step);
    }
}
