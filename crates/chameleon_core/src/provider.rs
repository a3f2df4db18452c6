//! Board content provider interface.
//!
//! The core never knows where board items come from. A provider is asked
//! for a category and answers, asynchronously, with items or an error;
//! the controller validates whatever it receives.

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

use crate::types::BoardItem;

/// Failure reported by a content provider.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("provider error: {} at {}:{}", message, file, line)]
pub struct ProviderError {
    /// Error message.
    pub message: String,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl ProviderError {
    /// Creates a provider error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Supplies the items for a board.
///
/// Implementations should return at least
/// [`BOARD_SIZE`](crate::BOARD_SIZE) items with distinct names; the
/// controller rejects anything shorter. Order carries no meaning.
#[async_trait]
pub trait BoardProvider: Send + Sync {
    /// Fetches items for `category`.
    async fn fetch_board(&self, category: &str) -> Result<Vec<BoardItem>, ProviderError>;
}

#[async_trait]
impl<P: BoardProvider + ?Sized> BoardProvider for Box<P> {
    async fn fetch_board(&self, category: &str) -> Result<Vec<BoardItem>, ProviderError> {
        (**self).fetch_board(category).await
    }
}

/// Provider that always answers with the same items.
#[derive(Debug, Clone)]
pub struct FixedProvider {
    items: Vec<BoardItem>,
}

impl FixedProvider {
    /// Creates a provider answering every request with `items`.
    pub fn new(items: Vec<BoardItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl BoardProvider for FixedProvider {
    #[instrument(skip(self), fields(items = self.items.len()))]
    async fn fetch_board(&self, category: &str) -> Result<Vec<BoardItem>, ProviderError> {
        debug!("Serving fixed board");
        Ok(self.items.clone())
    }
}

/// Tries `primary` and, if it fails, `secondary`.
///
/// Callers cannot tell which of the two answered.
#[derive(Debug, Clone)]
pub struct FallbackProvider<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackProvider<P, S> {
    /// Chains two providers.
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P: BoardProvider, S: BoardProvider> BoardProvider for FallbackProvider<P, S> {
    #[instrument(skip(self))]
    async fn fetch_board(&self, category: &str) -> Result<Vec<BoardItem>, ProviderError> {
        match self.primary.fetch_board(category).await {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "Primary provider failed, using fallback");
                self.secondary.fetch_board(category).await
            }
        }
    }
}
