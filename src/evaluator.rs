use crate::cards::{Card, Rank};
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Positional base for the packed score. Ranks never exceed 14.
const SCORE_BASE: u32 = 15;
/// Tiebreak digits after the category digit; shorter lists are zero padded.
const TIEBREAK_DIGITS: usize = 5;

/// The best five-card hand found for a set of cards.
///
/// Ordering and equality use only the packed `score`, so two hands with
/// different suits but the same ranks compare equal.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct HandScore {
    pub category: Category,
    /// Ranks in tiebreak order, most significant first.
    pub tiebreakers: Vec<Rank>,
    pub best_five: [Card; 5],
    score: u32,
}

impl HandScore {
    fn new(category: Category, tiebreakers: Vec<Rank>, best_five: [Card; 5]) -> Self {
        let digits = tiebreakers
            .iter()
            .map(|r| u32::from(r.value()))
            .chain(std::iter::repeat(0))
            .take(TIEBREAK_DIGITS);
        let score = digits.fold(u32::from(category.ordinal()), |acc, d| acc * SCORE_BASE + d);
        Self { category, tiebreakers, best_five, score }
    }

    /// Single comparable integer; higher wins.
    pub const fn score(&self) -> u32 {
        self.score
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandScore {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for HandScore {}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Classify exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandScore {
    let mut sorted = *cards;
    sorted.sort_by(|a, b| b.rank().cmp(&a.rank()).then(a.suit().cmp(&b.suit())));
    let ranks: Vec<Rank> = sorted.iter().map(|c| c.rank()).collect();

    let mut counts = [0u8; 15];
    for r in &ranks {
        counts[r.value() as usize] += 1;
    }
    // (rank, count), count desc then rank desc
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter(|r| counts[r.value() as usize] > 0)
        .map(|&r| (r, counts[r.value() as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    let shape: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let group_ranks: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    let is_flush = sorted.iter().all(|c| c.suit() == sorted[0].suit());
    let straight = straight_high(&ranks);

    let (category, tiebreakers) = match (is_flush, straight, shape.as_slice()) {
        (true, Some(high), _) => (Category::StraightFlush, vec![high]),
        (_, _, [4, 1]) => (Category::FourOfAKind, group_ranks),
        (_, _, [3, 2]) => (Category::FullHouse, group_ranks),
        (true, None, _) => (Category::Flush, ranks),
        (false, Some(high), _) => (Category::Straight, vec![high]),
        (_, _, [3, 1, 1]) => (Category::ThreeOfAKind, group_ranks),
        (_, _, [2, 2, 1]) => (Category::TwoPair, group_ranks),
        (_, _, [2, 1, 1, 1]) => (Category::Pair, group_ranks),
        _ => (Category::HighCard, ranks),
    };
    HandScore::new(category, tiebreakers, sorted)
}

/// High card of a five-rank run, treating the Ace as 1 for the wheel.
fn straight_high(ranks: &[Rank]) -> Option<Rank> {
    let mut values: Vec<u8> = ranks.iter().map(|r| r.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();
    if values.first() == Some(&Rank::Ace.value()) {
        values.push(1);
    }
    let mut run = 1;
    for i in 1..values.len() {
        if values[i - 1] == values[i] + 1 {
            run += 1;
            if run == 5 {
                return Rank::from_value(values[i] + 4);
            }
        } else {
            run = 1;
        }
    }
    None
}

fn check_distinct(cards: &[Card]) -> Result<(), EvalError> {
    let set: HashSet<Card> = cards.iter().copied().collect();
    if set.len() != cards.len() {
        return Err(EvalError::InvalidInput("duplicate cards".into()));
    }
    Ok(())
}

/// Best hand over every 5-card subset of `cards`.
fn best_subset(cards: &[Card]) -> Option<HandScore> {
    let n = cards.len();
    let mut best: Option<HandScore> = None;
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let hand = evaluate_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.as_ref().map_or(true, |cur| hand > *cur) {
                            best = Some(hand);
                        }
                    }
                }
            }
        }
    }
    best
}

/// Best five-card hand out of exactly seven distinct cards (21 subsets).
///
/// ```
/// use headsup_holdem::cards::{parse_cards, Rank};
/// use headsup_holdem::evaluator::{best_of_seven, Category};
///
/// let cards = parse_cards("As Ah Ad Kc Ks 2c 7h").unwrap();
/// let best = best_of_seven(&cards).unwrap();
/// assert_eq!(best.category, Category::FourOfAKind);
/// assert_eq!(best.tiebreakers, vec![Rank::Ace, Rank::King]);
/// ```
pub fn best_of_seven(cards: &[Card]) -> Result<HandScore, EvalError> {
    if cards.len() != 7 {
        return Err(EvalError::InvalidInput(format!("expected 7 cards, got {}", cards.len())));
    }
    check_distinct(cards)?;
    best_subset(cards).ok_or_else(|| EvalError::InvalidInput("no five-card subset".into()))
}

/// Best five-card hand out of five, six or seven distinct cards. Used for
/// strength estimates before the river.
pub fn best_hand(cards: &[Card]) -> Result<HandScore, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    check_distinct(cards)?;
    best_subset(cards).ok_or_else(|| EvalError::InvalidInput("no five-card subset".into()))
}
