//! Deck of cards plus a 52-bit card set for tracking what has been seen.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::{Card, Rank, Suit};
use crate::error::{Error, Result};

/// Set of cards as a 52-bit mask, one bit per `Card::id()`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Hash)]
pub struct CardMask(u64);

impl CardMask {
    #[inline(always)]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns true if the card was already present.
    #[inline(always)]
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.id();
        let already = (self.0 & bit) != 0;
        self.0 |= bit;
        already
    }

    #[inline(always)]
    pub fn contains(&self, card: Card) -> bool {
        (self.0 & (1u64 << card.id())) != 0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Insert every card, failing on the first one seen twice.
    pub fn try_extend<'a, I: IntoIterator<Item = &'a Card>>(&mut self, cards: I) -> Result<()> {
        for &c in cards {
            if self.insert(c) {
                return Err(Error::DuplicateCards(c));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards, suit-major, unshuffled.
    pub fn full() -> Self {
        Self::without(&CardMask::new())
    }

    /// Every card not in `seen`, in `full()` order.
    pub fn without(seen: &CardMask) -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(s, r)))
            .filter(|c| !seen.contains(*c))
            .collect();
        Self { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Result<Card> {
        self.cards.pop().ok_or(Error::InsufficientCards {
            requested: 1,
            remaining: 0,
        })
    }

    /// Take the top `n` cards. Leaves the deck untouched on failure.
    pub fn draw_many(&mut self, n: usize) -> Result<Vec<Card>> {
        if n > self.cards.len() {
            return Err(Error::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let at = self.cards.len() - n;
        let mut drawn = self.cards.split_off(at);
        drawn.reverse();
        Ok(drawn)
    }

    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}
