use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted")]
    Exhausted,
    #[error("stacked deck repeats {0}")]
    DuplicateCard(Card),
}

/// A 52-card deck with a draw cursor.
///
/// Cards are never removed from the backing sequence; drawing moves the
/// cursor, so `remaining() + dealt().len()` is always 52.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Every card once, suit by suit, Two through Ace.
    ///
    /// ```
    /// use headsup_holdem::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        Self { cards, next: 0 }
    }

    /// A standard deck shuffled with the given RNG.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    /// Places `top` on top of the deck in draw order; the remaining cards
    /// follow in standard order.
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut cards = Vec::with_capacity(52);
        for &c in top {
            if cards.contains(&c) {
                return Err(DeckError::DuplicateCard(c));
            }
            cards.push(c);
        }
        for c in Self::standard().cards {
            if !cards.contains(&c) {
                cards.push(c);
            }
        }
        Ok(Self { cards, next: 0 })
    }

    /// Fisher-Yates over the undrawn cards.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards[self.next..].shuffle(rng);
    }

    /// Shuffle with a ChaCha RNG seeded from `seed`.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Cards already drawn (including burns), in draw order.
    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.next]
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let card = *self.cards.get(self.next).ok_or(DeckError::Exhausted)?;
        self.next += 1;
        Ok(card)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.remaining() {
            return Err(DeckError::Exhausted);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    /// Discard the top card before a street is dealt.
    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.draw().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_distinct_cards() {
        let d = Deck::standard();
        let set: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(set.len(), 52);
        assert_eq!(d.remaining(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
        assert_ne!(d1.cards, Deck::standard().cards);
    }

    #[test]
    fn draw_moves_cursor_and_keeps_all_cards() {
        let mut d = Deck::standard();
        d.shuffle_seeded(7);
        let a = d.draw().unwrap();
        d.burn().unwrap();
        let flop = d.draw_n(3).unwrap();
        assert_eq!(d.remaining(), 47);
        assert_eq!(d.dealt().len(), 5);
        assert_eq!(d.dealt()[0], a);
        assert_eq!(&d.dealt()[2..], flop.as_slice());

        let all: HashSet<Card> = d.dealt().iter().chain(d.cards[d.next..].iter()).copied().collect();
        assert_eq!(all.len(), 52);
    }

    #[test]
    fn exhausted_deck_errors() {
        let mut d = Deck::standard();
        assert_eq!(d.draw_n(52).unwrap().len(), 52);
        assert!(d.is_empty());
        assert_eq!(d.draw(), Err(DeckError::Exhausted));
        assert_eq!(d.burn(), Err(DeckError::Exhausted));
        assert_eq!(d.draw_n(1), Err(DeckError::Exhausted));
    }

    #[test]
    fn stacked_deck_draws_given_cards_first() {
        let top = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Two, Suit::Clubs)];
        let mut d = Deck::stacked(&top).unwrap();
        assert_eq!(d.remaining(), 52);
        assert_eq!(d.draw().unwrap(), top[0]);
        assert_eq!(d.draw().unwrap(), top[1]);
        assert_ne!(d.draw().unwrap(), top[0]);

        let dup = [top[0], top[0]];
        assert_eq!(Deck::stacked(&dup).unwrap_err(), DeckError::DuplicateCard(top[0]));
    }
}
