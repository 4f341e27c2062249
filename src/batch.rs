//! Batch evaluation helpers.
//!
//! Every candidate is independent, so a batch fans out over a fixed-size
//! pool and collects back into input order. A candidate that cannot form a
//! hand becomes `None` at its position instead of failing the batch.

use rayon::prelude::*;

use crate::card::Card;
use crate::error::Result;
use crate::hand::Hand;
use crate::pool;

/// Evaluate each 5-card candidate on at most `workers` threads.
pub fn evaluate_batch<C>(candidates: &[C], workers: usize) -> Result<Vec<Option<Hand>>>
where
    C: AsRef<[Card]> + Sync,
{
    let pool = pool::build(workers)?;
    Ok(pool.install(|| {
        candidates
            .par_iter()
            .map(|c| Hand::new(c.as_ref()).ok())
            .collect()
    }))
}

/// Best 5-card hand out of each 5..7 card set, e.g. one set per player on
/// a complete board.
pub fn best_hands<C>(card_sets: &[C], workers: usize) -> Result<Vec<Option<Hand>>>
where
    C: AsRef<[Card]> + Sync,
{
    let pool = pool::build(workers)?;
    Ok(pool.install(|| {
        card_sets
            .par_iter()
            .map(|c| Hand::best_of(c.as_ref()))
            .collect()
    }))
}

/// Evaluate a batch and return the indices of the best hand(s), ties
/// included, together with one of the winning hands.
pub fn best_of_batch<C>(candidates: &[C], workers: usize) -> Result<(Vec<usize>, Option<Hand>)>
where
    C: AsRef<[Card]> + Sync,
{
    let hands = evaluate_batch(candidates, workers)?;
    let winners = best_indices(&hands);
    let best = winners.first().and_then(|&i| hands[i]);
    Ok((winners, best))
}

/// Indices of the strongest hands, in input order. `None` entries are skipped.
pub fn best_indices(hands: &[Option<Hand>]) -> Vec<usize> {
    let mut winners = Vec::new();
    let mut best: Option<&Hand> = None;
    for (i, hand) in hands.iter().enumerate() {
        let Some(hand) = hand else { continue };
        match best.map(|b| hand.compare(b)) {
            None | Some(std::cmp::Ordering::Greater) => {
                winners.clear();
                winners.push(i);
                best = Some(hand);
            }
            Some(std::cmp::Ordering::Equal) => winners.push(i),
            Some(std::cmp::Ordering::Less) => {}
        }
    }
    winners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use crate::score::Category;

    fn sets(list: &[&str]) -> Vec<Vec<Card>> {
        list.iter().map(|s| parse_cards(s).unwrap()).collect()
    }

    #[test]
    fn best_of_batch_finds_royal() {
        let candidates = sets(&["AhAsKdQcJs", "AsKsQsJsTs", "AsKhQdJc9s"]);
        let (winners, best) = best_of_batch(&candidates, 2).unwrap();
        assert_eq!(winners, vec![1]);
        assert_eq!(best.unwrap().category(), Category::RoyalFlush);
    }

    #[test]
    fn invalid_candidates_are_none_in_place() {
        let candidates = sets(&["AsKsQsJsTs", "AsKs", "2c2c3d4h5s", "2c3d4h5s6c"]);
        let hands = evaluate_batch(&candidates, 3).unwrap();
        assert_eq!(hands.len(), 4);
        assert_eq!(hands[0].map(|h| h.category()), Some(Category::RoyalFlush));
        assert!(hands[1].is_none());
        assert!(hands[2].is_none());
        assert_eq!(hands[3].map(|h| h.category()), Some(Category::Straight));
    }

    #[test]
    fn output_order_follows_input() {
        let candidates = sets(&[
            "2c3d4h5s7c", "AcAdKhQs2c", "7c7d7h7s2c", "Ac9c7c4c2c", "KcKdKh4s4c", "6c5d4h3s2c",
        ]);
        let want: Vec<Category> = candidates
            .iter()
            .map(|c| Hand::new(c).unwrap().category())
            .collect();
        let got: Vec<Category> = evaluate_batch(&candidates, 4)
            .unwrap()
            .into_iter()
            .map(|h| h.unwrap().category())
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn ties_return_every_index() {
        let candidates = sets(&["AcAdKhQs2c", "3c4d5h6s8c", "AhAsKcQd2d", ""]);
        let (winners, best) = best_of_batch(&candidates, 2).unwrap();
        assert_eq!(winners, vec![0, 2]);
        assert_eq!(best.unwrap().category(), Category::Pair);
    }

    #[test]
    fn empty_and_all_invalid() {
        let none: Vec<Vec<Card>> = Vec::new();
        assert_eq!(best_of_batch(&none, 1).unwrap(), (vec![], None));
        let bad = sets(&["AsKs", ""]);
        let (winners, best) = best_of_batch(&bad, 1).unwrap();
        assert!(winners.is_empty());
        assert!(best.is_none());
    }

    #[test]
    fn best_hands_per_player() {
        let board = "Kh Qh 7c 2d 2s";
        let flush_draw = format!("AhJh {board}");
        let kings = format!("KcKd {board}");
        let sevens = format!("7d7s {board}");
        let players = sets(&[flush_draw.as_str(), kings.as_str(), sevens.as_str()]);
        let hands = best_hands(&players, 3).unwrap();
        assert_eq!(best_indices(&hands), vec![1]);
        assert_eq!(hands[0].unwrap().category(), Category::Pair);
        assert_eq!(hands[2].unwrap().category(), Category::FullHouse);
    }
}
