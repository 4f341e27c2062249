//! Five-card poker hand ranking and parallel Hold'em equity.

pub mod card;
pub mod hole;
pub mod error;
pub mod combinations;
pub mod score;
pub mod hand;
pub mod deck;
pub mod pool;
pub mod batch;
pub mod equity;

pub use card::{parse_board, parse_cards, parse_hand, parse_hole_cards, Card, Rank, Suit};
pub use hole::Hole;
pub use error::{Error, Result};
pub use combinations::{binomial, combinations};
pub use score::{Category, Tiebreak};
pub use hand::Hand;
pub use deck::{CardMask, Deck};
pub use batch::{best_hands, best_indices, best_of_batch, evaluate_batch};
pub use equity::{EquityCalculator, EquityResult};
