//! Unbiased shuffle and selection primitives.
//!
//! Every random decision a round makes (secret item, chameleon, impostor
//! item, starter) goes through these helpers, so a seeded RNG replays a
//! round exactly.

use rand::Rng;
use tracing::instrument;

/// Shuffles `items` in place with Fisher–Yates.
///
/// Each of the `n!` orderings is equally likely given a uniform `rng`.
#[instrument(level = "trace", skip_all, fields(len = items.len()))]
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Draws `count` distinct elements uniformly at random without replacement.
///
/// Shuffles a copy and keeps the first `count`. Asking for more elements
/// than exist returns all of them, shuffled.
#[instrument(level = "trace", skip_all, fields(len = items.len(), count = count))]
pub fn select<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut pool = items.to_vec();
    shuffle(&mut pool, rng);
    pool.truncate(count);
    pool
}

/// Uniform index into a collection of `len` elements.
///
/// Returns `None` for an empty collection.
#[instrument(level = "trace", skip(rng))]
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}

/// Uniform single draw from `items`.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    pick_index(items.len(), rng).map(|i| &items[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![42];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_shuffle_orderings_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        let trials = 6_000;

        for _ in 0..trials {
            let mut items = vec![1u8, 2, 3];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }

        // 3! orderings, each expected ~1000 times.
        assert_eq!(counts.len(), 6);
        for (ordering, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "ordering {ordering:?} drawn {count} times"
            );
        }
    }

    #[test]
    fn test_select_draws_distinct_elements() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool: Vec<u32> = (0..30).collect();
        let chosen = select(&pool, 16, &mut rng);

        assert_eq!(chosen.len(), 16);
        let unique: HashSet<_> = chosen.iter().collect();
        assert_eq!(unique.len(), 16);
        assert!(chosen.iter().all(|c| pool.contains(c)));
    }

    #[test]
    fn test_select_more_than_available_returns_everything() {
        let mut rng = StdRng::seed_from_u64(4);
        let chosen = select(&[1, 2, 3], 10, &mut rng);
        assert_eq!(chosen.len(), 3);
    }

    #[test]
    fn test_pick_index_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(pick_index(0, &mut rng), None);
        assert!(pick::<u8, _>(&[], &mut rng).is_none());
    }

    #[test]
    fn test_pick_index_covers_range() {
        let mut rng = StdRng::seed_from_u64(6);
        let seen: HashSet<usize> = (0..500).filter_map(|_| pick_index(4, &mut rng)).collect();
        assert_eq!(seen, HashSet::from([0, 1, 2, 3]));
    }
}
