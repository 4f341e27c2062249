//! Crate error type.

use thiserror::Error;

use crate::card::Card;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("hand must contain exactly 5 cards, got {0}")]
    InvalidHandSize(usize),

    #[error("card {0} appears more than once")]
    DuplicateCards(Card),

    #[error("hole cards must contain exactly 2 cards, got {0}")]
    InvalidHoleCards(usize),

    #[error("cannot draw {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },

    #[error("board holds at most 5 cards, got {0}")]
    TooManyBoardCards(usize),

    #[error("invalid card: {0:?}")]
    InvalidCard(String),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
