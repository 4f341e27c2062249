//! Five-card hand evaluation and comparison.
//!
//! A `Hand` is classified once, inside its constructor: rank presence mask,
//! flush/straight/wheel flags, category and tie-break score are all computed
//! up front and never change afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::card::{Card, Rank};
use crate::combinations::combinations;
use crate::error::{Error, Result};
use crate::score::{pack_tiebreak, Category, Tiebreak};

pub const HAND_SIZE: usize = 5;

/// Five consecutive rank bits divided by their lowest bit.
const STRAIGHT_QUOTIENT: u16 = 0b11111;
/// A-5-4-3-2: Ace sits at bit 14, away from the 2..5 run.
pub const WHEEL_MASK: u16 = (1 << 14) | (1 << 5) | (1 << 4) | (1 << 3) | (1 << 2);
/// A-K-Q-J-T.
pub const ROYAL_MASK: u16 = (1 << 14) | (1 << 13) | (1 << 12) | (1 << 11) | (1 << 10);

/// Equality and hashing look at the cards only; the owner seat is ignored.
#[derive(Copy, Clone, Debug)]
pub struct Hand {
    /// Sorted by rank, highest first.
    cards: [Card; HAND_SIZE],
    owner: Option<usize>,
    mask: u16,
    flush: bool,
    straight: bool,
    wheel: bool,
    category: Category,
    tiebreak: Tiebreak,
}

impl Hand {
    /// Evaluate exactly five distinct cards.
    pub fn new(cards: &[Card]) -> Result<Self> {
        let mut sorted: [Card; HAND_SIZE] = cards
            .try_into()
            .map_err(|_| Error::InvalidHandSize(cards.len()))?;
        for (i, a) in sorted.iter().enumerate() {
            if sorted[i + 1..].contains(a) {
                return Err(Error::DuplicateCards(*a));
            }
        }
        sorted.sort_by(|a, b| b.rank.cmp(&a.rank));

        let mask = sorted
            .iter()
            .fold(0u16, |acc, c| acc | (1u16 << c.rank.value()));
        let flush = sorted.iter().all(|c| c.suit == sorted[0].suit);
        let wheel = mask == WHEEL_MASK;
        let straight = wheel || {
            let lsb = mask & mask.wrapping_neg();
            mask / lsb == STRAIGHT_QUOTIENT
        };
        let counts = rank_counts(&sorted);
        let category = classify(mask, flush, straight, &counts);
        let tiebreak = tiebreak(&sorted, &counts);

        Ok(Self {
            cards: sorted,
            owner: None,
            mask,
            flush,
            straight,
            wheel,
            category,
            tiebreak,
        })
    }

    /// Evaluate and tag the hand with the seat it belongs to. The seat is
    /// carried for display only and never affects comparison.
    pub fn with_owner(cards: &[Card], owner: usize) -> Result<Self> {
        let mut hand = Self::new(cards)?;
        hand.owner = Some(owner);
        Ok(hand)
    }

    /// Best five-card hand among every 5-subset of `cards`. Combinations that
    /// fail to build are skipped; the first of several equal hands is kept.
    pub fn best_of(cards: &[Card]) -> Option<Hand> {
        combinations(cards, HAND_SIZE)
            .iter()
            .filter_map(|combo| Hand::new(combo).ok())
            .fold(None, |best: Option<Hand>, hand| match best {
                Some(b) if !hand.beats(&b) => Some(b),
                _ => Some(hand),
            })
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    pub fn owner(&self) -> Option<usize> {
        self.owner
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Bit r is set iff some card has face value r.
    pub fn rank_mask(&self) -> u16 {
        self.mask
    }

    pub fn is_flush(&self) -> bool {
        self.flush
    }

    pub fn is_straight(&self) -> bool {
        self.straight
    }

    pub fn is_wheel(&self) -> bool {
        self.wheel
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.mask & (1 << rank.value()) != 0
    }

    pub fn tiebreak(&self) -> Tiebreak {
        self.tiebreak
    }

    /// Total order over hands: category first, then the wheel rule for
    /// straights, then tie-break score.
    pub fn compare(&self, other: &Hand) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| {
                if self.straight && other.straight {
                    // the wheel is the lowest straight even though its
                    // packed score leads with an Ace
                    other.wheel.cmp(&self.wheel)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }

    pub fn beats(&self, other: &Hand) -> bool {
        self.compare(other) == Ordering::Greater
    }

    pub fn ties(&self, other: &Hand) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl Eq for Hand {}

impl Hash for Hand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cards.hash(state);
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Hand:")?;
        for c in &self.cards {
            write!(f, " {}", c)?;
        }
        f.write_str(">")
    }
}

/// Occurrences per face value, indexed by rank value.
#[inline(always)]
fn rank_counts(cards: &[Card; HAND_SIZE]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

fn classify(mask: u16, flush: bool, straight: bool, counts: &[u8; 15]) -> Category {
    if flush {
        if mask == ROYAL_MASK {
            return Category::RoyalFlush;
        }
        if straight {
            return Category::StraightFlush;
        }
        return Category::Flush;
    }
    if straight {
        return Category::Straight;
    }

    let (mut pairs, mut trips, mut quads) = (0, 0, 0);
    for &n in counts.iter() {
        match n {
            2 => pairs += 1,
            3 => trips += 1,
            4 => quads += 1,
            _ => {}
        }
    }
    match (quads, trips, pairs) {
        (1, _, _) => Category::FourOfAKind,
        (_, 1, 1) => Category::FullHouse,
        (_, 1, _) => Category::ThreeOfAKind,
        (_, _, 2) => Category::TwoPair,
        (_, _, 1) => Category::Pair,
        _ => Category::HighCard,
    }
}

/// Cards ordered by (group size desc, rank desc), ranks packed high to low.
fn tiebreak(cards: &[Card; HAND_SIZE], counts: &[u8; 15]) -> Tiebreak {
    let mut ranks = cards.map(|c| c.rank.value());
    ranks.sort_by(|&a, &b| {
        counts[b as usize]
            .cmp(&counts[a as usize])
            .then_with(|| b.cmp(&a))
    });
    pack_tiebreak(&ranks)
}
