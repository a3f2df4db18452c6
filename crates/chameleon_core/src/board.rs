//! The fixed-size shared board.

use std::collections::HashSet;

use derive_more::{Display, Error};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::random;
use crate::types::BoardItem;

/// Number of items on every board.
pub const BOARD_SIZE: usize = 16;

/// Why a provider's items could not become a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Fewer than [`BOARD_SIZE`] items with distinct names were supplied.
    #[display("board needs {} distinct items, got {}", required, distinct)]
    TooFewItems {
        /// Distinct names received.
        distinct: usize,
        /// Items a board must hold.
        required: usize,
    },
}

/// Exactly [`BOARD_SIZE`] items with unique names.
///
/// The only way to build one is [`Board::from_items`], so every `Board`
/// in the program satisfies the size and uniqueness invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    items: Vec<BoardItem>,
}

impl Board {
    /// Builds a board from provider output.
    ///
    /// Items repeating an earlier name are dropped. When more than
    /// [`BOARD_SIZE`] distinct items remain, a uniform random subset is kept.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TooFewItems`] when fewer than [`BOARD_SIZE`]
    /// distinct names are supplied. A shorter board is never produced.
    #[instrument(skip_all, fields(supplied = items.len()))]
    pub fn from_items<R: Rng + ?Sized>(
        items: Vec<BoardItem>,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut seen = HashSet::new();
        let distinct: Vec<BoardItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.name().clone()))
            .collect();

        if distinct.len() < BOARD_SIZE {
            warn!(distinct = distinct.len(), "Not enough distinct items for a board");
            return Err(BoardError::TooFewItems {
                distinct: distinct.len(),
                required: BOARD_SIZE,
            });
        }

        let items = if distinct.len() > BOARD_SIZE {
            debug!(distinct = distinct.len(), "Narrowing oversized board");
            random::select(&distinct, BOARD_SIZE, rng)
        } else {
            distinct
        };

        Ok(Self { items })
    }

    /// Items in provider order.
    pub fn items(&self) -> &[BoardItem] {
        &self.items
    }

    /// Number of items, always [`BOARD_SIZE`].
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed board.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks an item up by name.
    pub fn get(&self, name: &str) -> Option<&BoardItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// True if an item with this name is on the board.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rarity;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn items(n: usize) -> Vec<BoardItem> {
        (0..n)
            .map(|i| BoardItem::new(format!("Item {i}"), Rarity::Common, 3))
            .collect()
    }

    #[test]
    fn test_exact_board_keeps_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::from_items(items(16), &mut rng).expect("16 items is a board");
        assert_eq!(board.len(), BOARD_SIZE);
        assert_eq!(board.items()[0].name(), "Item 0");
        assert_eq!(board.items()[15].name(), "Item 15");
    }

    #[test]
    fn test_short_board_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Board::from_items(items(10), &mut rng).unwrap_err();
        assert_eq!(
            err,
            BoardError::TooFewItems {
                distinct: 10,
                required: 16
            }
        );
    }

    #[test]
    fn test_duplicates_do_not_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut supplied = items(15);
        supplied.push(BoardItem::new("Item 0", Rarity::Epic, 7));
        let err = Board::from_items(supplied, &mut rng).unwrap_err();
        assert!(matches!(err, BoardError::TooFewItems { distinct: 15, .. }));
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(err.to_string(), "board needs 16 distinct items, got 15");
    }

    #[test]
    fn test_oversized_board_narrowed_to_sixteen_unique() {
        let mut rng = StdRng::seed_from_u64(9);
        let board = Board::from_items(items(30), &mut rng).expect("30 items narrow to a board");
        assert_eq!(board.len(), BOARD_SIZE);
        let names: HashSet<_> = board.items().iter().map(|i| i.name().clone()).collect();
        assert_eq!(names.len(), BOARD_SIZE);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::from_items(items(16), &mut rng).expect("board");
        assert!(board.contains("Item 3"));
        assert!(!board.contains("Item 16"));
        assert_eq!(board.get("Item 5").map(|i| i.cost()), Some(&3));
    }
}
