//! Card types (Suit/Rank/Card) and text parsing.
//!
//! Small `Copy` enums and a two-byte struct. Ranks carry their face value
//! (Two = 2 .. Ace = 14) so a rank can be used directly as a bit position.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::hand::Hand;
use crate::hole::Hole;

/// A playing card suit. Only equality matters (flush detection).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[inline(always)]
    pub const fn idx(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn from_u8(x: u8) -> Suit {
        match x & 0x3 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        };
        f.write_str(s)
    }
}

impl FromStr for Suit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "c" | "C" | "♣" => Ok(Suit::Clubs),
            "d" | "D" | "♦" => Ok(Suit::Diamonds),
            "h" | "H" | "♥" => Ok(Suit::Hearts),
            "s" | "S" | "♠" => Ok(Suit::Spades),
            _ => Err(Error::InvalidCard(s.to_string())),
        }
    }
}

/// A playing card rank, Two (2) through Ace (14).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Face value, 2..=14.
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Convert 2..14 to a Rank. Values outside the range clamp to the ends.
    #[inline(always)]
    pub const fn from_u8(x: u8) -> Rank {
        match x {
            0..=2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => Rank::Ace,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ten => f.write_str("T"),
            Rank::Jack => f.write_str("J"),
            Rank::Queen => f.write_str("Q"),
            Rank::King => f.write_str("K"),
            Rank::Ace => f.write_str("A"),
            r => write!(f, "{}", r.value()),
        }
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" | "t" | "10" => Ok(Rank::Ten),
            "J" | "j" => Ok(Rank::Jack),
            "Q" | "q" => Ok(Rank::Queen),
            "K" | "k" => Ok(Rank::King),
            "A" | "a" => Ok(Rank::Ace),
            _ => Err(Error::InvalidCard(s.to_string())),
        }
    }
}

/// A card = suit + rank.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[inline(always)]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Standard 0..51 card id mapping:
    /// suit = id / 13, rank = id % 13 + 2.
    #[inline(always)]
    pub const fn from_id(id: u8) -> Self {
        let suit = Suit::from_u8(id / 13);
        let rank = Rank::from_u8(id % 13 + 2);
        Self { suit, rank }
    }

    /// Convert to 0..51 id (inverse of from_id).
    #[inline(always)]
    pub const fn id(self) -> u8 {
        (self.suit as u8) * 13 + (self.rank as u8 - 2)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Rank first, then suit: `As`, `Td`, `10h`, `K♠`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (split, _) = s
            .char_indices()
            .last()
            .ok_or_else(|| Error::InvalidCard(s.to_string()))?;
        let (rank, suit) = s.split_at(split);
        let rank = rank.parse::<Rank>().map_err(|_| Error::InvalidCard(s.to_string()))?;
        let suit = suit.parse::<Suit>().map_err(|_| Error::InvalidCard(s.to_string()))?;
        Ok(Card::new(suit, rank))
    }
}

/// Parse any number of cards. Cards may be run together (`AsKd`) or
/// separated by whitespace or commas (`As, Kd`).
pub fn parse_cards(s: &str) -> Result<Vec<Card>> {
    let mut cards = Vec::new();
    let mut token = String::new();
    for ch in s.chars() {
        if ch.is_whitespace() || ch == ',' {
            continue;
        }
        token.push(ch);
        // a card ends at its suit character
        if token.chars().count() >= 2 && ch.to_string().parse::<Suit>().is_ok() {
            cards.push(token.parse::<Card>()?);
            token.clear();
        }
    }
    if !token.is_empty() {
        return Err(Error::InvalidCard(token));
    }
    Ok(cards)
}

/// Parse exactly five cards into an evaluated hand.
pub fn parse_hand(s: &str) -> Result<Hand> {
    Hand::new(&parse_cards(s)?)
}

/// Parse exactly two hole cards.
pub fn parse_hole_cards(s: &str) -> Result<Hole> {
    Hole::try_from(parse_cards(s)?.as_slice())
}

/// Parse 0..=5 community cards.
pub fn parse_board(s: &str) -> Result<Vec<Card>> {
    let board = parse_cards(s)?;
    if board.len() > 5 {
        return Err(Error::TooManyBoardCards(board.len()));
    }
    Ok(board)
}
