//! Equity calculation: Monte Carlo simulation and exact enumeration.
//!
//! Both modes fan out over a fixed-size worker pool. A trial (one sampled
//! runout) or a combination (one enumerated runout) shares nothing with the
//! others except its contribution to the per-player win/tie tallies.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::batch::best_indices;
use crate::card::Card;
use crate::combinations::{binomial, combinations};
use crate::deck::{CardMask, Deck};
use crate::error::{Error, Result};
use crate::hand::Hand;
use crate::hole::Hole;
use crate::pool;

pub const BOARD_SIZE: usize = 5;

/// Outcome totals for one player over one calculation.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct EquityResult {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    pub total: u64,
    /// (wins + ties / players) / total, in [0, 1].
    pub equity: f64,
}

impl EquityResult {
    fn from_counts(wins: u64, ties: u64, total: u64, players: usize) -> Self {
        let equity = if total == 0 {
            0.0
        } else {
            (wins as f64 + ties as f64 / players as f64) / total as f64
        };
        Self {
            wins,
            ties,
            losses: total - wins - ties,
            total,
            equity,
        }
    }

    /// (win, tie, loss) as fractions of the total.
    pub fn probs(&self) -> (f64, f64, f64) {
        let t = self.total as f64;
        if t == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (
            self.wins as f64 / t,
            self.ties as f64 / t,
            self.losses as f64 / t,
        )
    }
}

#[derive(Copy, Clone, Debug)]
pub struct EquityCalculator {
    workers: usize,
    seed: Option<u64>,
}

impl Default for EquityCalculator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl EquityCalculator {
    /// `workers == 0` uses the host-reported parallelism.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: pool::resolve_workers(workers),
            seed: None,
        }
    }

    /// Make sampling reproducible. Worker `i` seeds its RNG with `seed + i`,
    /// so results repeat for a fixed seed and worker count.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Monte Carlo equity over `trials` random completions of `board`.
    pub fn calculate(&self, holes: &[Hole], board: &[Card], trials: u64) -> Result<Vec<EquityResult>> {
        let remaining = unseen(holes, board)?;
        let players = holes.len();
        if players == 0 {
            return Ok(Vec::new());
        }
        let needed = BOARD_SIZE - board.len();
        log::debug!(
            "sampling {} trials for {} players, {} board cards, {} workers",
            trials,
            players,
            board.len(),
            self.workers
        );

        let wins: Vec<AtomicU64> = (0..players).map(|_| AtomicU64::new(0)).collect();
        let ties: Vec<AtomicU64> = (0..players).map(|_| AtomicU64::new(0)).collect();

        if trials > 0 {
            let quotas = pool::split_evenly(trials, self.workers);
            let pool = pool::build(self.workers)?;
            pool.install(|| {
                quotas.par_iter().enumerate().for_each(|(worker, &quota)| {
                    log::trace!("worker {} running {} trials", worker, quota);
                    let mut rng = self.rng(worker);
                    let mut deck = remaining.clone();
                    let mut runout = Vec::with_capacity(BOARD_SIZE);
                    let mut scratch = Vec::with_capacity(BOARD_SIZE + 2);
                    for _ in 0..quota {
                        let (drawn, _) = deck.partial_shuffle(&mut rng, needed);
                        runout.clear();
                        runout.extend_from_slice(board);
                        runout.extend_from_slice(drawn);
                        let winners = showdown(holes, &runout, &mut scratch);
                        tally(&winners, &wins, &ties);
                    }
                });
            });
        }

        Ok(wins
            .iter()
            .zip(&ties)
            .map(|(w, t)| {
                EquityResult::from_counts(
                    w.load(Ordering::Relaxed),
                    t.load(Ordering::Relaxed),
                    trials,
                    players,
                )
            })
            .collect())
    }

    /// Exact equity over every completion of `board`. Returns `Ok(None)`
    /// without doing any work when the number of completions exceeds
    /// `ceiling`.
    pub fn calculate_exact(
        &self,
        holes: &[Hole],
        board: &[Card],
        ceiling: u64,
    ) -> Result<Option<Vec<EquityResult>>> {
        let remaining = unseen(holes, board)?;
        let needed = BOARD_SIZE - board.len();
        let total = binomial(remaining.len(), needed);
        if total > ceiling {
            log::debug!(
                "exact enumeration refused: {} runouts exceed ceiling {}",
                total,
                ceiling
            );
            return Ok(None);
        }
        let players = holes.len();
        if players == 0 {
            return Ok(Some(Vec::new()));
        }
        log::debug!(
            "enumerating {} runouts for {} players, {} board cards, {} workers",
            total,
            players,
            board.len(),
            self.workers
        );

        // a complete board has exactly one runout: itself
        let extras = match needed {
            0 => vec![Vec::new()],
            n => combinations(&remaining, n),
        };

        let pool = pool::build(self.workers)?;
        let outcomes: Vec<Vec<usize>> = pool.install(|| {
            extras
                .par_iter()
                .map_init(
                    || {
                        (
                            Vec::with_capacity(BOARD_SIZE),
                            Vec::with_capacity(BOARD_SIZE + 2),
                        )
                    },
                    |(runout, scratch), extra| {
                        runout.clear();
                        runout.extend_from_slice(board);
                        runout.extend_from_slice(extra);
                        showdown(holes, runout, scratch)
                    },
                )
                .collect()
        });

        let mut wins = vec![0u64; players];
        let mut ties = vec![0u64; players];
        for winners in &outcomes {
            match winners.as_slice() {
                [] => {}
                [one] => wins[*one] += 1,
                tied => tied.iter().for_each(|&i| ties[i] += 1),
            }
        }

        let total = outcomes.len() as u64;
        Ok(Some(
            wins.iter()
                .zip(&ties)
                .map(|(&w, &t)| EquityResult::from_counts(w, t, total, players))
                .collect(),
        ))
    }

    fn rng(&self, worker: usize) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(worker as u64)),
            None => SmallRng::from_os_rng(),
        }
    }
}

/// Validate the visible cards and return every card not among them.
fn unseen(holes: &[Hole], board: &[Card]) -> Result<Vec<Card>> {
    if board.len() > BOARD_SIZE {
        return Err(Error::TooManyBoardCards(board.len()));
    }
    let mut seen = CardMask::new();
    for hole in holes {
        seen.try_extend(hole.cards())?;
    }
    seen.try_extend(board)?;
    let remaining = Deck::without(&seen).into_cards();
    let needed = BOARD_SIZE - board.len();
    if remaining.len() < needed {
        return Err(Error::InsufficientCards {
            requested: needed,
            remaining: remaining.len(),
        });
    }
    Ok(remaining)
}

/// Indices of the players holding the best hand on a complete board.
fn showdown(holes: &[Hole], runout: &[Card], scratch: &mut Vec<Card>) -> Vec<usize> {
    let hands: Vec<Option<Hand>> = holes
        .iter()
        .map(|hole| {
            scratch.clear();
            scratch.extend_from_slice(hole.cards());
            scratch.extend_from_slice(runout);
            Hand::best_of(scratch)
        })
        .collect();
    best_indices(&hands)
}

#[inline(always)]
fn tally(winners: &[usize], wins: &[AtomicU64], ties: &[AtomicU64]) {
    match winners {
        [] => {}
        [one] => {
            wins[*one].fetch_add(1, Ordering::Relaxed);
        }
        tied => {
            for &i in tied {
                ties[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{parse_board, parse_hole_cards, Rank::*, Suit::*};

    fn holes(list: &[&str]) -> Vec<Hole> {
        list.iter().map(|s| parse_hole_cards(s).unwrap()).collect()
    }

    fn assert_consistent(results: &[EquityResult]) {
        for r in results {
            assert_eq!(r.wins + r.ties + r.losses, r.total);
            assert!((0.0..=1.0).contains(&r.equity), "equity {}", r.equity);
        }
    }

    #[test]
    fn aces_beat_kings_preflop() {
        let calc = EquityCalculator::new(4).with_seed(42);
        let results = calc.calculate(&holes(&["AsAh", "KsKh"]), &[], 1000).unwrap();
        assert_eq!(results.len(), 2);
        assert_consistent(&results);
        assert_eq!(results[0].total, 1000);
        assert!(results[0].equity > results[1].equity);
        assert!(
            (0.70..=0.90).contains(&results[0].equity),
            "AA equity {}",
            results[0].equity
        );
    }

    #[test]
    fn trial_split_is_exact() {
        // 1001 does not divide across 4 workers
        let calc = EquityCalculator::new(4).with_seed(1);
        let results = calc
            .calculate(&holes(&["7s7h", "AsKd"]), &parse_board("7d2c5h").unwrap(), 1001)
            .unwrap();
        assert_consistent(&results);
        assert!(results.iter().all(|r| r.total == 1001));
        assert!(results[0].equity > results[1].equity);
    }

    #[test]
    fn seeded_sampling_repeats() {
        let calc = EquityCalculator::new(3).with_seed(99);
        let hs = holes(&["QsQh", "AdKd", "9c8c"]);
        let a = calc.calculate(&hs, &[], 3000).unwrap();
        let b = calc.calculate(&hs, &[], 3000).unwrap();
        assert_eq!(a, b);
        let sum: f64 = a.iter().map(|r| r.equity).sum();
        assert!((sum - 1.0).abs() < 0.1, "equity sum {}", sum);
    }

    #[test]
    fn exact_enumerates_the_river() {
        let calc = EquityCalculator::new(4);
        let board = parse_board("2c5d9hJs").unwrap();
        let results = calc
            .calculate_exact(&holes(&["AsAh", "KsKh"]), &board, 1000)
            .unwrap()
            .expect("44 runouts fit under the ceiling");
        assert_consistent(&results);
        assert!(results.iter().all(|r| r.total == 44));
        // kings need one of the two remaining kings
        assert_eq!(results[1].wins, 2);
        assert_eq!(results[0].wins, 42);
        assert!(results[0].equity > results[1].equity);
    }

    #[test]
    fn exact_refuses_past_ceiling() {
        let calc = EquityCalculator::new(2);
        let out = calc
            .calculate_exact(&holes(&["AsAh", "KsKh"]), &[], 1000)
            .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn exact_complete_board_single_runout() {
        let calc = EquityCalculator::new(2);
        // everyone plays the board
        let board = parse_board("AsKsQsJsTs").unwrap();
        let results = calc
            .calculate_exact(&holes(&["2c3c", "2d3d", "2h3h"]), &board, 1)
            .unwrap()
            .unwrap();
        for r in &results {
            assert_eq!(r.total, 1);
            assert_eq!(r.ties, 1);
            assert!((r.equity - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn exact_matches_sampling() {
        let hs = holes(&["AsKs", "QdQc"]);
        let board = parse_board("Qs7s2h").unwrap();
        let exact = EquityCalculator::new(4)
            .calculate_exact(&hs, &board, 10_000)
            .unwrap()
            .unwrap();
        assert_eq!(exact[0].total, binomial(45, 2));
        let sampled = EquityCalculator::new(4)
            .with_seed(7)
            .calculate(&hs, &board, 20_000)
            .unwrap();
        let diff = (exact[0].equity - sampled[0].equity).abs();
        assert!(diff < 0.03, "exact {} sampled {}", exact[0].equity, sampled[0].equity);
    }

    #[test]
    fn overlapping_cards_are_rejected() {
        let calc = EquityCalculator::new(2);
        let shared = holes(&["AsAh", "AsKd"]);
        assert!(matches!(
            calc.calculate(&shared, &[], 10),
            Err(Error::DuplicateCards(c)) if c == Card::new(Spades, Ace)
        ));

        let board = vec![Card::new(Hearts, Ace), Card::new(Clubs, Two), Card::new(Clubs, Three)];
        assert!(matches!(
            calc.calculate_exact(&holes(&["AsAh", "KsKh"]), &board, 1000),
            Err(Error::DuplicateCards(_))
        ));
    }

    #[test]
    fn oversized_board_is_rejected() {
        let calc = EquityCalculator::new(1);
        let board = parse_board("2c3c4c5c6c").unwrap();
        let mut six = board.clone();
        six.push(Card::new(Diamonds, Nine));
        assert!(matches!(
            calc.calculate(&holes(&["AsAh"]), &six, 10),
            Err(Error::TooManyBoardCards(6))
        ));
    }

    #[test]
    fn too_few_unseen_cards_to_finish_the_board() {
        // 24 players see 48 cards, leaving 4 for a 5-card runout
        let crowd: Vec<Hole> = (0u8..24)
            .map(|i| Hole::new(Card::from_id(2 * i), Card::from_id(2 * i + 1)).unwrap())
            .collect();
        let calc = EquityCalculator::new(2);
        assert!(matches!(
            calc.calculate(&crowd, &[], 100),
            Err(Error::InsufficientCards { requested: 5, remaining: 4 })
        ));
        assert!(matches!(
            calc.calculate_exact(&crowd, &[], 1000),
            Err(Error::InsufficientCards { requested: 5, remaining: 4 })
        ));

        // 23 players and a turn board leave 2 cards for the river
        let board: Vec<Card> = (46u8..50).map(Card::from_id).collect();
        let results = calc.calculate_exact(&crowd[..23], &board, 1000).unwrap().unwrap();
        assert!(results.iter().all(|r| r.total == 2));
        let sampled = calc.calculate(&crowd[..23], &board, 10).unwrap();
        assert!(sampled.iter().all(|r| r.total == 10));
    }

    #[test]
    fn degenerate_inputs() {
        let calc = EquityCalculator::new(2);
        assert!(calc.calculate(&[], &[], 100).unwrap().is_empty());

        let zero = calc.calculate(&holes(&["AsAh", "KsKh"]), &[], 0).unwrap();
        assert!(zero.iter().all(|r| r.total == 0 && r.equity == 0.0));

        let alone = calc.calculate(&holes(&["2c7d"]), &[], 50).unwrap();
        assert_eq!(alone[0].wins, 50);
        assert_eq!(alone[0].equity, 1.0);
    }

    #[test]
    fn default_uses_host_workers() {
        assert_eq!(EquityCalculator::default().workers(), pool::default_workers());
        assert_eq!(EquityCalculator::new(4).workers(), 4);
    }

    #[test]
    fn probs_sum_to_one() {
        let r = EquityResult::from_counts(6, 2, 10, 2);
        assert_eq!(r.losses, 2);
        assert!((r.equity - 0.7).abs() < 1e-12);
        let (w, t, l) = r.probs();
        assert!((w + t + l - 1.0).abs() < 1e-12);
        assert_eq!(EquityResult::default().probs(), (0.0, 0.0, 0.0));
    }
}
