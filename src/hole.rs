//! A player's two private cards.

use std::fmt;

use crate::card::Card;
use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Hole([Card; 2]);

impl Hole {
    /// Fails with `DuplicateCards` if both cards are the same card.
    pub fn new(a: Card, b: Card) -> Result<Self> {
        if a == b {
            return Err(Error::DuplicateCards(a));
        }
        Ok(Self([a, b]))
    }

    #[inline(always)]
    pub fn cards(&self) -> &[Card; 2] {
        &self.0
    }
}

impl TryFrom<&[Card]> for Hole {
    type Error = Error;

    fn try_from(cards: &[Card]) -> Result<Self> {
        match cards {
            [a, b] => Hole::new(*a, *b),
            _ => Err(Error::InvalidHoleCards(cards.len())),
        }
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank::*, Suit::*};

    #[test]
    fn rejects_wrong_size_and_duplicates() {
        let ace = Card::new(Spades, Ace);
        let king = Card::new(Spades, King);
        assert!(matches!(Hole::try_from(&[ace][..]), Err(Error::InvalidHoleCards(1))));
        assert!(matches!(
            Hole::try_from(&[ace, king, ace][..]),
            Err(Error::InvalidHoleCards(3))
        ));
        assert!(matches!(Hole::new(ace, ace), Err(Error::DuplicateCards(_))));

        let hole = Hole::try_from(&[ace, king][..]).unwrap();
        assert_eq!(hole.cards(), &[ace, king]);
        assert_eq!(hole.to_string(), "A♠K♠");
    }
}
