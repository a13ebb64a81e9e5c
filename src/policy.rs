//! Opponent decision policy.
//!
//! [`decide`] is a pure function of the table situation and an injected RNG,
//! so seeded runs replay the same decisions.

use crate::cards::Card;
use crate::evaluator::{best_hand, Category};
use crate::game::{Action, Stage};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Everything the opponent may look at when it is asked to act.
#[derive(Debug, Clone, Copy)]
pub struct Situation<'a> {
    pub stage: Stage,
    pub hole: [Card; 2],
    pub board: &'a [Card],
    pub to_call: u64,
    /// Pot including the bets of the current street.
    pub pot: u64,
    pub raise_available: bool,
    pub big_blind: u64,
    /// Chips behind.
    pub stack: u64,
}

/// Starting hand grade, 0 (trash) to 3 (big pair).
pub fn preflop_grade(hole: [Card; 2]) -> u8 {
    let (a, b) = (hole[0].rank().value(), hole[1].rank().value());
    let (hi, lo) = (a.max(b), a.min(b));
    let suited = hole[0].suit() == hole[1].suit();
    let gap = hi - lo;

    if hi == lo {
        return if hi >= 10 { 3 } else { 2 };
    }
    if hi >= 13 && lo >= 11 {
        return 2;
    }
    if suited && gap <= 1 && hi >= 10 {
        return 2;
    }
    if (suited && hi >= 11 && lo >= 9) || (gap <= 1 && hi >= 10) {
        return 1;
    }
    0
}

/// Strength bucket 0..=4 for a made hand category.
pub const fn strength_bucket(category: Category) -> u8 {
    match category {
        Category::StraightFlush | Category::FourOfAKind => 4,
        Category::FullHouse | Category::Flush | Category::Straight => 3,
        Category::ThreeOfAKind => 2,
        Category::TwoPair => 1,
        _ => 0,
    }
}

/// Bucket for the best hand the hole cards make with the known board.
/// Zero before the flop or when the cards cannot be evaluated.
pub fn postflop_strength(hole: [Card; 2], board: &[Card]) -> u8 {
    if board.len() < 3 {
        return 0;
    }
    let mut cards = hole.to_vec();
    cards.extend_from_slice(board);
    best_hand(&cards).map_or(0, |h| strength_bucket(h.category))
}

/// Choose an action for the seat described by `s`.
pub fn decide<R: Rng + ?Sized>(s: &Situation<'_>, rng: &mut R) -> Action {
    if s.stack == 0 {
        return if s.to_call > 0 { Action::Call } else { Action::Check };
    }
    let bb = s.big_blind;

    if s.stage == Stage::Preflop {
        let grade = u64::from(preflop_grade(s.hole));
        if s.to_call == 0 {
            if grade >= 2 && s.raise_available {
                return Action::Bet(s.stack.min(bb * (2 + grade)));
            }
            return Action::Check;
        }
        if grade >= 2 {
            if s.raise_available && rng.random_bool(0.4) {
                return Action::Raise(s.stack.min(s.to_call + bb * (1 + grade)));
            }
            return Action::Call;
        }
        if grade == 1 && s.to_call * 2 <= bb * 5 {
            return Action::Call;
        }
        return if rng.random_bool(0.2) { Action::Call } else { Action::Fold };
    }

    let strength = postflop_strength(s.hole, s.board);
    let share = |num: u64, den: u64| s.pot * num / den;
    if s.to_call == 0 {
        if strength >= 3 && s.raise_available {
            return Action::Bet(s.stack.min((bb * 2).max(share(3, 5))));
        }
        if strength >= 2 && s.raise_available && rng.random_bool(0.4) {
            return Action::Bet(s.stack.min((bb * 2).max(share(2, 5))));
        }
        return Action::Check;
    }
    match strength {
        3.. => {
            if s.raise_available && rng.random_bool(0.5) {
                Action::Raise(s.stack.min(s.to_call + (bb * 2).max(share(3, 5))))
            } else {
                Action::Call
            }
        }
        2 if s.to_call <= (bb * 3).max(share(2, 5)) => Action::Call,
        1 if s.to_call <= (bb * 2).max(share(1, 4)) => Action::Call,
        _ if rng.random_bool(0.15) => Action::Call,
        _ => Action::Fold,
    }
}

/// The policy seat: [`decide`] driven by its own seeded RNG.
#[derive(Debug, Clone)]
pub struct Opponent {
    rng: ChaCha8Rng,
}

impl Opponent {
    /// Seeded opponents replay identical decisions; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => ChaCha8Rng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                ChaCha8Rng::from_seed(seed)
            }
        };
        Self { rng }
    }

    pub fn decide(&mut self, s: &Situation<'_>) -> Action {
        let action = decide(s, &mut self.rng);
        debug!(stage = %s.stage, to_call = s.to_call, pot = s.pot, action = ?action, "opponent decision");
        action
    }
}
