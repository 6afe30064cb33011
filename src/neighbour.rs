//! Neighbourhood moves on task orders.
//!
//! Three permutation-preserving operators are mixed with equal probability:
//!
//! - **Swap**: exchange the tasks at two distinct positions.
//! - **Reverse**: reverse the segment between two distinct positions
//!   (2-opt move).
//! - **Relocate**: remove a task and reinsert it elsewhere (insert move).
//!
//! Reversal and relocation reach schedule shapes that would take several
//! swaps, so the mix moves through the search space faster than swap alone.

use rand::Rng;

/// Draw thresholds separating the three operators on a `[0, 1)` sample.
const SWAP_THRESHOLD: f64 = 0.33;
const REVERSE_THRESHOLD: f64 = 0.66;

/// A single perturbation of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange positions `i` and `j`.
    Swap { i: usize, j: usize },
    /// Reverse `order[i..=j]`, with `i < j`.
    Reverse { i: usize, j: usize },
    /// Remove the element at `from`, then insert it at `to` in the
    /// shortened sequence.
    Relocate { from: usize, to: usize },
}

impl Move {
    /// Draws a random move for an order of length `n`.
    ///
    /// Returns `None` when `n < 2`: no perturbation exists. In that case no
    /// random numbers are consumed.
    pub fn sample<R: Rng>(n: usize, rng: &mut R) -> Option<Self> {
        if n < 2 {
            return None;
        }
        let r: f64 = rng.random();
        let (a, b) = distinct_pair(n, rng);

        let mv = if r < SWAP_THRESHOLD {
            Move::Swap { i: a, j: b }
        } else if r < REVERSE_THRESHOLD {
            Move::Reverse {
                i: a.min(b),
                j: a.max(b),
            }
        } else {
            Move::Relocate { from: a, to: b }
        };
        Some(mv)
    }
}

/// Applies `mv` to `order` in place.
///
/// # Panics
///
/// Panics if a position in `mv` is out of bounds for `order`.
pub fn apply_move(order: &mut Vec<usize>, mv: Move) {
    match mv {
        Move::Swap { i, j } => order.swap(i, j),
        Move::Reverse { i, j } => order[i..=j].reverse(),
        Move::Relocate { from, to } => {
            let item = order.remove(from);
            order.insert(to, item);
        }
    }
}

/// Returns a random neighbour of `order`.
///
/// Orders shorter than two are returned as an unchanged copy.
pub fn neighbour<R: Rng>(order: &[usize], rng: &mut R) -> Vec<usize> {
    let mut next = order.to_vec();
    if let Some(mv) = Move::sample(order.len(), rng) {
        apply_move(&mut next, mv);
    }
    next
}

/// Two distinct positions drawn uniformly from `0..n`. Requires `n >= 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        let mut seen = vec![false; n];
        perm.len() == n
            && perm
                .iter()
                .all(|&v| v < n && !std::mem::replace(&mut seen[v], true))
    }

    #[test]
    fn test_empty_and_singleton_unchanged() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(neighbour(&[], &mut rng), Vec::<usize>::new());
        for _ in 0..20 {
            assert_eq!(neighbour(&[0], &mut rng), vec![0]);
        }
    }

    #[test]
    fn test_sample_none_below_two() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Move::sample(0, &mut rng), None);
        assert_eq!(Move::sample(1, &mut rng), None);
    }

    #[test]
    fn test_swap() {
        let mut order = vec![0, 1, 2, 3];
        apply_move(&mut order, Move::Swap { i: 0, j: 3 });
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_reverse_inclusive() {
        let mut order = vec![0, 1, 2, 3, 4];
        apply_move(&mut order, Move::Reverse { i: 1, j: 3 });
        assert_eq!(order, vec![0, 3, 2, 1, 4]);
    }

    #[test]
    fn test_relocate_forward_uses_shortened_sequence() {
        let mut order = vec![0, 1, 2, 3, 4];
        apply_move(&mut order, Move::Relocate { from: 1, to: 3 });
        assert_eq!(order, vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn test_relocate_backward() {
        let mut order = vec![0, 1, 2, 3, 4];
        apply_move(&mut order, Move::Relocate { from: 4, to: 0 });
        assert_eq!(order, vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn test_relocate_to_end() {
        let mut order = vec![0, 1, 2];
        apply_move(&mut order, Move::Relocate { from: 0, to: 2 });
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_sampled_positions_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            match Move::sample(5, &mut rng).expect("n >= 2") {
                Move::Swap { i, j } => assert!(i != j && i < 5 && j < 5),
                Move::Reverse { i, j } => assert!(i < j && j < 5),
                Move::Relocate { from, to } => assert!(from != to && from < 5 && to < 5),
            }
        }
    }

    #[test]
    fn test_all_operators_drawn() {
        let mut rng = StdRng::seed_from_u64(3);
        let (mut swaps, mut reverses, mut relocates) = (0, 0, 0);
        for _ in 0..3000 {
            match Move::sample(6, &mut rng).expect("n >= 2") {
                Move::Swap { .. } => swaps += 1,
                Move::Reverse { .. } => reverses += 1,
                Move::Relocate { .. } => relocates += 1,
            }
        }
        // Roughly a third each.
        for count in [swaps, reverses, relocates] {
            assert!((800..1200).contains(&count), "unbalanced mix: {swaps}/{reverses}/{relocates}");
        }
    }

    #[test]
    fn test_two_elements_always_changes() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert_eq!(neighbour(&[0, 1], &mut rng), vec![1, 0]);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let order: Vec<usize> = (0..10).collect();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(neighbour(&order, &mut a), neighbour(&order, &mut b));
        }
    }

    proptest! {
        #[test]
        fn prop_neighbour_is_permutation(n in 0usize..40, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut order: Vec<usize> = (0..n).collect();
            for _ in 0..25 {
                order = neighbour(&order, &mut rng);
                prop_assert!(is_valid_permutation(&order, n));
            }
        }
    }
}
