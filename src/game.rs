use crate::cards::Card;
use crate::config::{ConfigError, OddChip, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{best_of_seven, Category, EvalError, HandScore};
use rand::Rng;
use std::fmt;
use tracing::{debug, info, warn};

/// Heads-up: exactly two seats, 0 and 1.
pub const SEATS: usize = 2;

/// The other seat at a heads-up table.
pub const fn other(seat: usize) -> usize {
    1 - seat
}

/// Hand lifecycle. `HandOver` loops back to `Preflop` on the next deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Stage {
    Init,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandOver,
}

impl Stage {
    /// Stages in which seats may act.
    pub const fn is_betting(self) -> bool {
        matches!(self, Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Stage::Init => "Init",
            Stage::Preflop => "Preflop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
            Stage::HandOver => "Hand over",
        }
    }

    /// The street dealt after this one and how many community cards it adds.
    const fn next_street(self) -> Option<(Stage, usize)> {
        match self {
            Stage::Preflop => Some((Stage::Flop, 3)),
            Stage::Flop => Some((Stage::Turn, 1)),
            Stage::Turn => Some((Stage::River, 1)),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A seat command. `Bet` and `Raise` carry the stake: the chips added by
/// this action, not the new total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(u64),
    Raise(u64),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("illegal action: {0}")]
    IllegalAction(String),
    #[error("illegal amount: {0}")]
    IllegalAmount(String),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn illegal(reason: impl Into<String>) -> ActionError {
    ActionError::IllegalAction(reason.into())
}

/// What the table is waiting for after a command or step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Progress {
    /// The seat must act.
    Await(usize),
    /// Betting is closed for this street; [`Game::advance`] deals the next one.
    RoundComplete,
    /// All streets are out; [`Game::advance`] settles the pot.
    Showdown,
    HandOver,
}

#[derive(Debug, Clone, Default)]
pub struct Seat {
    chips: u64,
    bet: u64,
    hole: Option<[Card; 2]>,
    folded: bool,
    all_in: bool,
}

impl Seat {
    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Chips committed on the current street.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn hole(&self) -> Option<[Card; 2]> {
        self.hole
    }

    pub fn folded(&self) -> bool {
        self.folded
    }

    pub fn all_in(&self) -> bool {
        self.all_in
    }

    fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Move up to `amount` chips from the stack into the street bet.
    fn commit(&mut self, amount: u64) -> u64 {
        let paid = self.chips.min(amount);
        self.chips -= paid;
        self.bet += paid;
        if self.chips == 0 {
            self.all_in = true;
        }
        paid
    }
}

/// Per-street betting state. Replaced wholesale when a street is dealt.
#[derive(Debug, Clone)]
struct Round {
    current_bet: u64,
    raise_available: bool,
    acted: [bool; SEATS],
    to_act: Option<usize>,
    complete: bool,
}

impl Round {
    fn open(current_bet: u64) -> Self {
        Self {
            current_bet,
            raise_available: true,
            acted: [false; SEATS],
            to_act: None,
            complete: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventKind {
    HandStarted { button: usize },
    SmallBlind { seat: usize, amount: u64 },
    BigBlind { seat: usize, amount: u64 },
    Fold { seat: usize },
    Check { seat: usize },
    Call { seat: usize, amount: u64 },
    Bet { seat: usize, to: u64 },
    Raise { seat: usize, to: u64 },
    Dealt { street: Stage, cards: Vec<Card> },
    Refund { seat: usize, amount: u64 },
    RunoutStarted,
    Won { seat: usize, amount: u64, hand: Option<Category> },
    Split { seats: Vec<usize>, share: u64, hand: Category, unassigned: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Event {
    pub hand: u64,
    pub stage: Stage,
    pub kind: EventKind,
}

impl Event {
    /// Render the event as a table-log line using the given seat names.
    pub fn describe(&self, names: &[&str; SEATS]) -> String {
        let cards = |cs: &[Card]| cs.iter().map(Card::to_string).collect::<Vec<_>>().join(" ");
        match &self.kind {
            EventKind::HandStarted { button } => {
                format!("Hand #{} started, {} has the button.", self.hand, names[*button])
            }
            EventKind::SmallBlind { seat, amount } => {
                format!("{} posts small blind {amount}.", names[*seat])
            }
            EventKind::BigBlind { seat, amount } => {
                format!("{} posts big blind {amount}.", names[*seat])
            }
            EventKind::Fold { seat } => format!("{} folds.", names[*seat]),
            EventKind::Check { seat } => format!("{} checks.", names[*seat]),
            EventKind::Call { seat, amount } => format!("{} calls {amount}.", names[*seat]),
            EventKind::Bet { seat, to } => format!("{} bets {to}.", names[*seat]),
            EventKind::Raise { seat, to } => format!("{} raises to {to}.", names[*seat]),
            EventKind::Dealt { street, cards: cs } => format!("{street} dealt: {}.", cards(cs)),
            EventKind::Refund { seat, amount } => {
                format!("Uncalled {amount} returned to {}.", names[*seat])
            }
            EventKind::RunoutStarted => "All in, running out the board.".to_string(),
            EventKind::Won { seat, amount, hand: Some(h) } => {
                format!("{} wins {amount} with {h}.", names[*seat])
            }
            EventKind::Won { seat, amount, hand: None } => {
                format!("{} wins {amount} by fold.", names[*seat])
            }
            EventKind::Split { seats, share, hand, unassigned } => {
                let who: Vec<&str> = seats.iter().map(|&s| names[s]).collect();
                let mut line = format!("Split pot: {} get {share} each with {hand}.", who.join(" & "));
                if *unassigned > 0 {
                    line.push_str(&format!(" {unassigned} unassigned."));
                }
                line
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(&["Seat 1", "Seat 2"]))
    }
}

/// Slider limits for a bet or raise stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaiseBounds {
    pub min: u64,
    pub max: u64,
}

/// Read-only snapshot for front-ends.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct TableView {
    pub hand: u64,
    pub stage: Stage,
    pub button: usize,
    pub seats: [Seat; SEATS],
    pub board: Vec<Card>,
    /// Collected pot plus live street bets.
    pub pot: u64,
    pub current_bet: u64,
    pub to_act: Option<usize>,
    pub to_call: u64,
    pub raise_available: bool,
    pub raise_bounds: Option<RaiseBounds>,
    pub runout: bool,
    /// This hand's events, most recent first.
    pub events: Vec<Event>,
    pub winners: Vec<usize>,
    pub shown: [Option<Category>; SEATS],
    pub unassigned: u64,
}

/// Heads-up betting state machine.
#[derive(Debug)]
pub struct Game {
    config: TableConfig,
    seats: [Seat; SEATS],
    button: usize,
    stage: Stage,
    deck: Deck,
    board: Vec<Card>,
    /// Chips swept from closed streets; live bets sit on the seats.
    pot: u64,
    round: Round,
    runout: bool,
    generation: u64,
    events: Vec<Event>,
    winners: Vec<usize>,
    shown: [Option<HandScore>; SEATS],
    unassigned: u64,
}

impl Game {
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats = [
            Seat { chips: config.starting_stack, ..Seat::default() },
            Seat { chips: config.starting_stack, ..Seat::default() },
        ];
        Ok(Self {
            config,
            seats,
            // flips to seat 0 on the first deal
            button: 1,
            stage: Stage::Init,
            deck: Deck::standard(),
            board: Vec::with_capacity(5),
            pot: 0,
            round: Round::open(0),
            runout: false,
            generation: 0,
            events: Vec::new(),
            winners: Vec::new(),
            shown: [None, None],
            unassigned: 0,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn button(&self) -> usize {
        self.button
    }

    /// # Panics
    ///
    /// Panics if `seat` is not 0 or 1.
    pub fn seat(&self, seat: usize) -> &Seat {
        &self.seats[seat]
    }

    pub fn seats(&self) -> &[Seat; SEATS] {
        &self.seats
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Pot including the bets of the street in progress.
    pub fn pot(&self) -> u64 {
        self.pot + self.seats.iter().map(|s| s.bet).sum::<u64>()
    }

    /// Chips swept into the middle from closed streets.
    pub fn collected(&self) -> u64 {
        self.pot
    }

    pub fn current_bet(&self) -> u64 {
        self.round.current_bet
    }

    pub fn raise_available(&self) -> bool {
        self.round.raise_available
    }

    pub fn to_act(&self) -> Option<usize> {
        self.round.to_act
    }

    /// Chips `seat` must add to match the current bet; 0 for an unknown seat.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.seats.get(seat).map_or(0, |s| self.round.current_bet.saturating_sub(s.bet))
    }

    pub fn runout_pending(&self) -> bool {
        self.runout
    }

    /// Increments on every deal and every reset; deferred steps compare
    /// against it to detect that their hand is gone.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// Best hands revealed at the last showdown.
    pub fn shown(&self) -> &[Option<HandScore>; SEATS] {
        &self.shown
    }

    /// Odd chips from tied pots that no seat received.
    pub fn unassigned_chips(&self) -> u64 {
        self.unassigned
    }

    /// Stacks plus street bets plus the collected pot. Constant from the
    /// blinds until settlement.
    pub fn chips_in_play(&self) -> u64 {
        self.seats.iter().map(|s| s.chips + s.bet).sum::<u64>() + self.pot
    }

    /// A seat with an empty stack once the hand is over.
    pub fn busted_seat(&self) -> Option<usize> {
        if !matches!(self.stage, Stage::Init | Stage::HandOver) {
            return None;
        }
        self.seats.iter().position(|s| s.chips == 0)
    }

    /// Events of the current or last finished hand, most recent first.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().rev()
    }

    pub fn raise_bounds(&self) -> Option<RaiseBounds> {
        let seat = self.round.to_act?;
        let to_call = self.to_call(seat);
        if !(self.round.raise_available || to_call == 0) {
            return None;
        }
        let bb = self.config.big_blind;
        let min = if to_call == 0 { bb * 2 } else { self.round.current_bet + bb };
        Some(RaiseBounds { min, max: self.seats[seat].chips + to_call })
    }

    pub fn view(&self) -> TableView {
        let shown = [
            self.shown[0].as_ref().map(|h| h.category),
            self.shown[1].as_ref().map(|h| h.category),
        ];
        TableView {
            hand: self.generation,
            stage: self.stage,
            button: self.button,
            seats: self.seats.clone(),
            board: self.board.clone(),
            pot: self.pot(),
            current_bet: self.round.current_bet,
            to_act: self.round.to_act,
            to_call: self.round.to_act.map_or(0, |s| self.to_call(s)),
            raise_available: self.round.raise_available,
            raise_bounds: self.raise_bounds(),
            runout: self.runout,
            events: self.events().cloned().collect(),
            winners: self.winners.clone(),
            shown,
            unassigned: self.unassigned,
        }
    }

    /// Deal a new hand from a freshly shuffled deck.
    pub fn start_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Progress, ActionError> {
        self.start_hand_with_deck(Deck::shuffled(rng))
    }

    /// Deal a new hand from `deck`, drawing from its top: two hole cards to
    /// seat 0, two to seat 1, then the board with a burn before each street.
    pub fn start_hand_with_deck(&mut self, mut deck: Deck) -> Result<Progress, ActionError> {
        if !matches!(self.stage, Stage::Init | Stage::HandOver) {
            return Err(illegal("a hand is already in progress"));
        }
        if let Some(seat) = self.seats.iter().position(|s| s.chips == 0) {
            return Err(illegal(format!("seat {seat} has no chips")));
        }
        // hole cards, three burns and the full board
        if deck.remaining() < 2 * SEATS + 3 + 5 {
            return Err(DeckError::Exhausted.into());
        }

        let holes = [[deck.draw()?, deck.draw()?], [deck.draw()?, deck.draw()?]];
        self.button = other(self.button);
        self.generation += 1;
        self.deck = deck;
        self.board.clear();
        self.pot = 0;
        self.runout = false;
        self.winners.clear();
        self.shown = [None, None];
        self.events.clear();
        self.stage = Stage::Preflop;
        for (seat, hole) in self.seats.iter_mut().zip(holes.iter()) {
            seat.bet = 0;
            seat.folded = false;
            seat.all_in = false;
            seat.hole = Some(*hole);
        }
        self.record(EventKind::HandStarted { button: self.button });
        info!(hand = self.generation, button = self.button, "hand started");

        let sb = self.button;
        let bb = other(sb);
        let sb_paid = self.seats[sb].commit(self.config.small_blind);
        self.record(EventKind::SmallBlind { seat: sb, amount: sb_paid });
        let bb_paid = self.seats[bb].commit(self.config.big_blind);
        self.record(EventKind::BigBlind { seat: bb, amount: bb_paid });

        self.round = Round::open(sb_paid.max(bb_paid));
        // preflop the button (small blind) acts first
        Ok(self.resolve(sb))
    }

    /// Apply a seat command. Nothing changes when an error is returned.
    pub fn act(&mut self, seat: usize, action: Action) -> Result<Progress, ActionError> {
        if seat >= SEATS {
            return Err(illegal(format!("no seat {seat}")));
        }
        if !self.stage.is_betting() || self.round.complete {
            return Err(illegal(format!("no action is accepted during {}", self.stage)));
        }
        if self.round.to_act != Some(seat) {
            return Err(illegal(format!("it is not seat {seat}'s turn")));
        }
        let to_call = self.to_call(seat);

        match action {
            Action::Fold => {
                self.seats[seat].folded = true;
                self.record(EventKind::Fold { seat });
                debug!(hand = self.generation, seat, "fold");
                return Ok(self.award_uncontested(other(seat)));
            }
            Action::Check => {
                if to_call > 0 {
                    return Err(illegal(format!("cannot check facing {to_call}")));
                }
                self.round.acted[seat] = true;
                self.record(EventKind::Check { seat });
            }
            Action::Call => {
                if to_call == 0 {
                    return Err(illegal("nothing to call"));
                }
                let paid = self.seats[seat].commit(to_call);
                self.round.acted[seat] = true;
                self.record(EventKind::Call { seat, amount: paid });
            }
            Action::Bet(amount) | Action::Raise(amount) => {
                if !(self.round.raise_available || to_call == 0) {
                    return Err(illegal("only one raise is allowed per street"));
                }
                if amount == 0 {
                    return Err(ActionError::IllegalAmount("stake must be positive".into()));
                }
                let chips = self.seats[seat].chips;
                let stake = amount.max(to_call + self.config.big_blind).min(chips);
                if stake == 0 {
                    return Err(ActionError::IllegalAmount("no chips behind".into()));
                }
                self.seats[seat].commit(stake);
                let total = self.seats[seat].bet;
                if total > self.round.current_bet {
                    let kind = if self.round.current_bet == 0 {
                        EventKind::Bet { seat, to: total }
                    } else {
                        EventKind::Raise { seat, to: total }
                    };
                    self.round.current_bet = total;
                    self.round.raise_available = false;
                    self.round.acted = [false; SEATS];
                    self.round.acted[seat] = true;
                    self.record(kind);
                } else {
                    // all in without reaching the current bet: a short call
                    self.round.acted[seat] = true;
                    self.record(EventKind::Call { seat, amount: stake });
                }
            }
        }
        debug!(
            hand = self.generation,
            seat,
            action = ?action,
            pot = self.pot(),
            current_bet = self.round.current_bet,
            "action applied"
        );
        Ok(self.resolve(other(seat)))
    }

    /// Perform the pending street deal or showdown.
    pub fn advance(&mut self) -> Result<Progress, ActionError> {
        if self.stage == Stage::Showdown {
            return self.settle_showdown();
        }
        let Some((street, count)) = self.stage.next_street() else {
            return Err(illegal(format!("nothing to advance during {}", self.stage)));
        };
        if !self.round.complete {
            return Err(illegal("betting round is still open"));
        }
        if self.deck.remaining() < count + 1 {
            return Err(DeckError::Exhausted.into());
        }
        self.collect_bets();
        self.deck.burn()?;
        let cards = self.deck.draw_n(count)?;
        self.board.extend_from_slice(&cards);
        self.stage = street;
        self.round = Round::open(0);
        debug!(hand = self.generation, street = %street, board = self.board.len(), "street dealt");
        self.record(EventKind::Dealt { street, cards });
        // postflop the seat without the button acts first
        Ok(self.resolve(other(self.button)))
    }

    /// Advance until a seat must act or the hand is over.
    pub fn advance_all(&mut self) -> Result<Progress, ActionError> {
        loop {
            match self.advance()? {
                Progress::RoundComplete | Progress::Showdown => continue,
                done => return Ok(done),
            }
        }
    }

    /// Put both stacks back to the starting amount and return to `Init`.
    /// Bumps the generation so work queued for the old hand goes stale.
    pub fn reset(&mut self) {
        for seat in &mut self.seats {
            *seat = Seat { chips: self.config.starting_stack, ..Seat::default() };
        }
        self.button = 1;
        self.stage = Stage::Init;
        self.board.clear();
        self.pot = 0;
        self.round = Round::open(0);
        self.runout = false;
        self.generation += 1;
        self.winners.clear();
        self.shown = [None, None];
        self.unassigned = 0;
        self.events.clear();
        info!(generation = self.generation, "table reset");
    }

    fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.folded).count()
    }

    fn round_closed(&self) -> bool {
        if self.live_count() < 2 || self.runout {
            return true;
        }
        self.seats.iter().enumerate().filter(|(_, s)| !s.folded).all(|(i, s)| {
            s.all_in || (self.round.acted[i] && s.bet == self.round.current_bet)
        })
    }

    /// Hand the turn to `next`, or to the other seat if `next` cannot act,
    /// or close the round.
    fn resolve(&mut self, next: usize) -> Progress {
        if self.round_closed() {
            return self.close_round();
        }
        match [next, other(next)].into_iter().find(|&s| self.seats[s].can_act()) {
            Some(seat) => {
                self.round.to_act = Some(seat);
                Progress::Await(seat)
            }
            None => self.close_round(),
        }
    }

    fn close_round(&mut self) -> Progress {
        self.refund_uncalled();
        self.round.to_act = None;
        self.round.complete = true;
        if !self.runout && self.live_count() == SEATS && self.seats.iter().any(|s| s.all_in) {
            self.runout = true;
            self.record(EventKind::RunoutStarted);
            debug!(hand = self.generation, "all-in runout pending");
        }
        if self.stage == Stage::River {
            self.collect_bets();
            self.stage = Stage::Showdown;
            Progress::Showdown
        } else {
            Progress::RoundComplete
        }
    }

    /// Return the part of a bet the all-in opponent could not match.
    fn refund_uncalled(&mut self) {
        if self.live_count() < SEATS {
            return;
        }
        let (hi, lo) = if self.seats[0].bet >= self.seats[1].bet { (0, 1) } else { (1, 0) };
        let excess = self.seats[hi].bet - self.seats[lo].bet;
        if excess == 0 || !self.seats[lo].all_in {
            return;
        }
        self.seats[hi].bet -= excess;
        self.seats[hi].chips += excess;
        if self.seats[hi].chips > 0 {
            self.seats[hi].all_in = false;
        }
        self.round.current_bet = self.seats[hi].bet;
        self.record(EventKind::Refund { seat: hi, amount: excess });
    }

    fn collect_bets(&mut self) {
        for seat in &mut self.seats {
            self.pot += seat.bet;
            seat.bet = 0;
        }
        self.round.current_bet = 0;
    }

    fn award_uncontested(&mut self, winner: usize) -> Progress {
        self.collect_bets();
        let amount = self.pot;
        self.seats[winner].chips += amount;
        self.pot = 0;
        self.winners = vec![winner];
        self.finish_hand();
        self.record(EventKind::Won { seat: winner, amount, hand: None });
        info!(hand = self.generation, winner, amount, "pot won uncontested");
        Progress::HandOver
    }

    fn settle_showdown(&mut self) -> Result<Progress, ActionError> {
        let mut scored: Vec<(usize, HandScore)> = Vec::with_capacity(SEATS);
        for (i, seat) in self.seats.iter().enumerate().filter(|(_, s)| !s.folded) {
            let hole = seat.hole.ok_or_else(|| illegal(format!("seat {i} holds no cards")))?;
            let mut cards = hole.to_vec();
            cards.extend_from_slice(&self.board);
            scored.push((i, best_of_seven(&cards)?));
        }
        let best = scored
            .iter()
            .map(|(_, h)| h.score())
            .max()
            .ok_or_else(|| illegal("no seat reached showdown"))?;
        let winners: Vec<usize> =
            scored.iter().filter(|(_, h)| h.score() == best).map(|(i, _)| *i).collect();
        let category = scored
            .iter()
            .find(|(_, h)| h.score() == best)
            .map(|(_, h)| h.category)
            .unwrap_or(Category::HighCard);

        let pot = self.pot;
        let share = pot / winners.len() as u64;
        let remainder = pot % winners.len() as u64;
        for &w in &winners {
            self.seats[w].chips += share;
        }
        let mut unassigned = 0;
        if remainder > 0 {
            match self.config.odd_chip {
                OddChip::OutOfPosition => {
                    let oop = other(self.button);
                    let to = if winners.contains(&oop) { oop } else { winners[0] };
                    self.seats[to].chips += remainder;
                }
                _ => {
                    unassigned = remainder;
                    self.unassigned += remainder;
                    warn!(hand = self.generation, remainder, "odd chip left unassigned");
                }
            }
        }
        self.pot = 0;
        for (i, hand) in scored {
            self.shown[i] = Some(hand);
        }
        self.winners = winners.clone();
        self.finish_hand();
        if winners.len() == 1 {
            self.record(EventKind::Won { seat: winners[0], amount: pot, hand: Some(category) });
        } else {
            self.record(EventKind::Split { seats: winners.clone(), share, hand: category, unassigned });
        }
        info!(hand = self.generation, winners = ?winners, pot, category = %category, "showdown settled");
        Ok(Progress::HandOver)
    }

    fn finish_hand(&mut self) {
        self.stage = Stage::HandOver;
        self.round.to_act = None;
        self.round.complete = true;
        self.runout = false;
    }

    fn record(&mut self, kind: EventKind) {
        self.events.push(Event { hand: self.generation, stage: self.stage, kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn game(stack: u64) -> Game {
        Game::new(TableConfig::default().with_starting_stack(stack)).unwrap()
    }

    /// Deck laid out as seat 0 hole, seat 1 hole, burn, flop, burn, turn, burn, river.
    fn deck(s0: &str, s1: &str, board: &str) -> Deck {
        let h0 = parse_cards(s0).unwrap();
        let h1 = parse_cards(s1).unwrap();
        let b = parse_cards(board).unwrap();
        let burns = parse_cards("2h 3h 4h").unwrap();
        let mut top = Vec::new();
        top.extend(h0);
        top.extend(h1);
        top.push(burns[0]);
        top.extend_from_slice(&b[..3]);
        top.push(burns[1]);
        top.push(b[3]);
        top.push(burns[2]);
        top.push(b[4]);
        Deck::stacked(&top).unwrap()
    }

    /// Limp preflop and check every street until the board is complete.
    fn check_down(g: &mut Game) {
        let mut progress = g.act(0, Action::Call).unwrap();
        loop {
            progress = match progress {
                Progress::Await(seat) => g.act(seat, Action::Check).unwrap(),
                Progress::RoundComplete => g.advance().unwrap(),
                _ => break,
            };
        }
    }

    #[test]
    fn tie_leaves_odd_chip_unassigned_by_default() {
        let mut g = game(1000);
        g.start_hand_with_deck(deck("Ac 3d", "Ad 4s", "Ks Qh Jd Tc 9c")).unwrap();
        check_down(&mut g);
        // both play the board straight; force an odd pot before settling
        assert_eq!(g.stage(), Stage::Showdown);
        g.pot = 41;
        g.seats[0].chips = 980;
        g.seats[1].chips = 979;
        assert_eq!(g.advance().unwrap(), Progress::HandOver);
        assert_eq!(g.seat(0).chips(), 1000);
        assert_eq!(g.seat(1).chips(), 999);
        assert_eq!(g.unassigned_chips(), 1);
        assert_eq!(g.winners(), &[0, 1]);
    }

    #[test]
    fn odd_chip_can_go_out_of_position() {
        let cfg = TableConfig::default().with_odd_chip(OddChip::OutOfPosition);
        let mut g = Game::new(cfg).unwrap();
        g.start_hand_with_deck(deck("Ac 3d", "Ad 4s", "Ks Qh Jd Tc 9c")).unwrap();
        check_down(&mut g);
        g.pot = 41;
        g.advance().unwrap();
        // button is seat 0, so seat 1 takes the extra chip
        assert_eq!(g.seat(0).chips(), 980 + 20);
        assert_eq!(g.seat(1).chips(), 980 + 21);
        assert_eq!(g.unassigned_chips(), 0);
    }

    #[test]
    fn short_all_in_gets_uncalled_excess_back() {
        let mut g = game(1000);
        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        g.seats[1].chips = 50;
        assert_eq!(g.act(0, Action::Raise(500)).unwrap(), Progress::Await(1));
        assert_eq!(g.act(1, Action::Call).unwrap(), Progress::RoundComplete);
        // seat 1 matched 70 in total; seat 0 had 510 out
        assert!(g.events().any(|e| e.kind == EventKind::Refund { seat: 0, amount: 440 }));
        assert_eq!(g.seat(0).bet(), 70);
        assert!(g.runout_pending());
    }

    #[test]
    fn rejected_actions_leave_state_untouched() {
        let mut g = game(1000);
        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        let before = g.chips_in_play();
        assert!(matches!(g.act(1, Action::Call), Err(ActionError::IllegalAction(_))));
        assert!(matches!(g.act(0, Action::Check), Err(ActionError::IllegalAction(_))));
        assert!(matches!(g.act(0, Action::Raise(0)), Err(ActionError::IllegalAmount(_))));
        assert!(matches!(g.act(5, Action::Fold), Err(ActionError::IllegalAction(_))));
        assert!(matches!(g.advance(), Err(ActionError::IllegalAction(_))));
        assert_eq!(g.seat(0).bet(), 10);
        assert_eq!(g.to_act(), Some(0));
        assert_eq!(g.chips_in_play(), before);
    }

    #[test]
    fn busted_seat_blocks_the_next_deal() {
        let mut g = game(1000);
        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        g.seats[1].chips = 0;
        g.act(0, Action::Fold).unwrap();
        // seat 1 collected 30 from the fold
        assert_eq!(g.busted_seat(), None);
        g.seats[1].chips = 0;
        assert_eq!(g.busted_seat(), Some(1));
        assert!(matches!(g.start_hand_with_deck(Deck::standard()), Err(ActionError::IllegalAction(_))));
    }

    #[test]
    fn reset_bumps_generation_and_restores_stacks() {
        let mut g = game(1000);
        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        let gen = g.generation();
        g.act(0, Action::Raise(200)).unwrap();
        g.reset();
        assert!(g.generation() > gen);
        assert_eq!(g.stage(), Stage::Init);
        assert_eq!(g.chips_in_play(), 2000);
        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        assert_eq!(g.button(), 0);
    }

    #[test]
    fn event_log_holds_one_hand() {
        let mut g = game(1000);
        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        g.act(0, Action::Fold).unwrap();
        let first = g.events().count();
        assert!(first >= 4);

        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        assert_eq!(g.events().count(), 3, "hand start and two blinds");
        assert!(g.events().all(|e| e.hand == g.generation()));

        g.reset();
        assert_eq!(g.events().count(), 0);
        assert!(g.view().events.is_empty());
    }

    #[test]
    fn to_call_is_zero_for_an_unknown_seat() {
        let mut g = game(1000);
        g.start_hand_with_deck(deck("Ac Kd", "7s 2d", "Ks Qh 5d 3c 9c")).unwrap();
        assert_eq!(g.to_call(0), 10);
        assert_eq!(g.to_call(SEATS), 0);
    }

    #[test]
    #[should_panic]
    fn seat_out_of_range_panics() {
        let g = game(1000);
        let _ = g.seat(SEATS);
    }
}
