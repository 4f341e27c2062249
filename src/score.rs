//! Hand categories and the packed tie-break score.
//!
//! Tie-break layout:
//! bits 16..19 : r0 (most significant group)
//! bits 12..15 : r1
//! bits  8..11 : r2
//! bits  4..7  : r3
//! bits  0..3  : r4
//!
//! Each r* is a 4-bit face value (2..14). Unused slots are 0.

use std::fmt;

/// Bit offset of each packed rank, most significant first.
pub const TIEBREAK_SHIFTS: [u32; 5] = [16, 12, 8, 4, 0];

/// Hand categories (higher is better).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };
        f.write_str(s)
    }
}

/// Packed tie-break score; only meaningful between hands of one category.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Tiebreak(pub u32);

#[inline(always)]
pub fn pack_tiebreak(ranks: &[u8]) -> Tiebreak {
    Tiebreak(
        ranks
            .iter()
            .zip(TIEBREAK_SHIFTS)
            .fold(0u32, |acc, (&r, shift)| acc | (((r & 0xF) as u32) << shift)),
    )
}

#[inline(always)]
pub fn unpack_tiebreak(t: Tiebreak) -> [u8; 5] {
    TIEBREAK_SHIFTS.map(|shift| ((t.0 >> shift) & 0xF) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_ordered() {
        assert!(Category::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Category::RoyalFlush as u8, 10);
        assert_eq!(Category::ThreeOfAKind.to_string(), "Three of a Kind");
    }

    #[test]
    fn packing_is_most_significant_first() {
        let t = pack_tiebreak(&[14, 14, 13, 9, 2]);
        assert_eq!(t.0, (14 << 16) | (14 << 12) | (13 << 8) | (9 << 4) | 2);
        assert_eq!(unpack_tiebreak(t), [14, 14, 13, 9, 2]);

        // higher kicker wins numerically
        assert!(pack_tiebreak(&[14, 14, 13, 3, 2]) > pack_tiebreak(&[14, 14, 12, 11, 10]));
    }

    #[test]
    fn short_input_leaves_low_slots_empty() {
        assert_eq!(unpack_tiebreak(pack_tiebreak(&[7, 3])), [7, 3, 0, 0, 0]);
    }
}
