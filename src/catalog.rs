//! Card catalog loaded from TOML, and the board provider backed by it.
//!
//! A catalog is a list of `[[cards]]` tables:
//!
//! ```toml
//! [[cards]]
//! name = "Hog Rider"
//! rarity = "rare"
//! cost = 4
//! categories = ["Win Conditions"]
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chameleon_core::{
    BOARD_SIZE, BoardItem, BoardProvider, MIX_CATEGORY, ProviderError, Rarity, random,
};
use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Deserialize)]
pub struct CatalogCard {
    /// Card name.
    name: String,
    /// Rarity label, parsed leniently.
    #[serde(default)]
    rarity: String,
    /// Elixir cost.
    #[serde(default)]
    cost: u32,
    /// Flavour text.
    #[serde(default)]
    description: Option<String>,
    /// Image reference.
    #[serde(default)]
    image_url: Option<String>,
    /// Categories the card belongs to.
    #[serde(default)]
    categories: Vec<String>,
}

impl CatalogCard {
    /// Whether the card belongs to `category`. Mix matches every card.
    pub fn in_category(&self, category: &str) -> bool {
        category.eq_ignore_ascii_case(MIX_CATEGORY)
            || self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Converts the entry into a board item.
    pub fn to_item(&self) -> BoardItem {
        let mut item = BoardItem::new(
            self.name.trim(),
            Rarity::parse_lenient(&self.rarity),
            self.cost,
        );
        if let Some(description) = &self.description {
            item = item.with_description(description.clone());
        }
        if let Some(url) = &self.image_url {
            item = item.with_image_url(url.clone());
        }
        item
    }
}

/// A collection of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Deserialize)]
pub struct CardCatalog {
    /// All entries in file order.
    #[serde(default)]
    cards: Vec<CatalogCard>,
}

impl CardCatalog {
    /// Loads a catalog from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        debug!("Loading card catalog");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CatalogError::new(format!("Failed to read catalog: {}", e)))?;
        let catalog = Self::from_toml(&content)?;
        info!(cards = catalog.cards.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(content)
            .map_err(|e| CatalogError::new(format!("Failed to parse catalog: {}", e)))?;
        if let Some(blank) = catalog.cards.iter().position(|c| c.name.trim().is_empty()) {
            return Err(CatalogError::new(format!("Card #{} has no name", blank + 1)));
        }
        Ok(catalog)
    }

    /// Items in `category`, with duplicate names dropped.
    #[instrument(skip(self))]
    pub fn items_in(&self, category: &str) -> Vec<BoardItem> {
        let mut seen = std::collections::HashSet::new();
        self.cards
            .iter()
            .filter(|card| card.in_category(category))
            .map(CatalogCard::to_item)
            .filter(|item| seen.insert(item.name().clone()))
            .collect()
    }

    /// Number of distinct cards per category, starting with Mix.
    pub fn category_counts(&self, categories: &[&str]) -> Vec<(String, usize)> {
        categories
            .iter()
            .map(|c| (c.to_string(), self.items_in(c).len()))
            .collect()
    }
}

/// Board provider drawing random boards from a [`CardCatalog`].
#[derive(Debug)]
pub struct CatalogProvider {
    catalog: Arc<CardCatalog>,
    rng: Mutex<StdRng>,
    any_category: bool,
}

impl CatalogProvider {
    /// Creates a provider that filters by the requested category.
    pub fn new(catalog: Arc<CardCatalog>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog,
            rng: Mutex::new(rng),
            any_category: false,
        }
    }

    /// Creates a provider that ignores the category and draws from every card.
    pub fn any_category(catalog: Arc<CardCatalog>, seed: Option<u64>) -> Self {
        Self {
            any_category: true,
            ..Self::new(catalog, seed)
        }
    }
}

#[async_trait]
impl BoardProvider for CatalogProvider {
    #[instrument(skip(self), fields(any_category = self.any_category))]
    async fn fetch_board(&self, category: &str) -> Result<Vec<BoardItem>, ProviderError> {
        let category = if self.any_category { MIX_CATEGORY } else { category };
        let items = self.catalog.items_in(category);
        if items.len() < BOARD_SIZE {
            warn!(available = items.len(), "Not enough cards in category");
            return Err(ProviderError::new(format!(
                "category '{}' has {} cards, need {}",
                category,
                items.len(),
                BOARD_SIZE
            )));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError::new("catalog rng poisoned"))?;
        let board = random::select(&items, BOARD_SIZE, &mut *rng);
        debug!(drawn = board.len(), "Board drawn from catalog");
        Ok(board)
    }
}

/// Catalog loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Catalog error: {} at {}:{}", message, file, line)]
pub struct CatalogError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CatalogError {
    /// Creates a new catalog error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
