//! Tests for driving rounds through async board providers.

use std::sync::Mutex;

use async_trait::async_trait;
use chameleon_core::{
    BoardItem, BoardProvider, FallbackProvider, FixedProvider, GameController, GameError, Phase,
    ProviderError, Rarity, RoundOptions,
};

fn items(count: usize) -> Vec<BoardItem> {
    (0..count)
        .map(|i| BoardItem::new(format!("Card {i}"), Rarity::Rare, 4))
        .collect()
}

/// Provider that records the categories it was asked for.
struct Recording {
    asked: Mutex<Vec<String>>,
}

#[async_trait]
impl BoardProvider for Recording {
    async fn fetch_board(&self, category: &str) -> Result<Vec<BoardItem>, ProviderError> {
        self.asked.lock().unwrap().push(category.to_string());
        Ok(items(16))
    }
}

struct Offline;

#[async_trait]
impl BoardProvider for Offline {
    async fn fetch_board(&self, _category: &str) -> Result<Vec<BoardItem>, ProviderError> {
        Err(ProviderError::new("network unreachable"))
    }
}

fn three_players() -> GameController {
    let mut game = GameController::seeded(12);
    for name in ["Ada", "Brin", "Cy"] {
        game.add_player(name).unwrap();
    }
    game
}

#[tokio::test]
async fn test_start_round_reaches_reveal() {
    let mut game = three_players();
    let provider = FixedProvider::new(items(16));
    let phase = game
        .start_round(RoundOptions::default(), &provider)
        .await
        .unwrap();
    assert_eq!(phase, Phase::RevealInterstitial);
    assert_eq!(game.state().board_items().len(), 16);
}

#[tokio::test]
async fn test_provider_receives_category() {
    let mut game = three_players();
    let provider = Recording {
        asked: Mutex::new(Vec::new()),
    };
    let options = RoundOptions::default().with_category("Spells");
    game.start_round(options, &provider).await.unwrap();
    assert_eq!(*provider.asked.lock().unwrap(), vec!["Spells".to_string()]);
}

#[tokio::test]
async fn test_provider_failure_returns_to_setup() {
    let mut game = three_players();
    let result = game.start_round(RoundOptions::default(), &Offline).await;
    assert_eq!(
        result,
        Err(GameError::BoardUnavailable("network unreachable".into()))
    );
    assert_eq!(game.phase(), Phase::Setup);
    assert!(game.state().board().is_none());
}

#[tokio::test]
async fn test_short_provider_board_returns_to_setup() {
    let mut game = three_players();
    let provider = FixedProvider::new(items(10));
    let result = game.start_round(RoundOptions::default(), &provider).await;
    assert!(matches!(result, Err(GameError::BoardUnavailable(_))));
    assert_eq!(game.phase(), Phase::Setup);
}

#[tokio::test]
async fn test_fallback_board_indistinguishable() {
    let mut game = three_players();
    let provider = FallbackProvider::new(Offline, FixedProvider::new(items(16)));
    let phase = game
        .start_round(RoundOptions::default(), &provider)
        .await
        .unwrap();
    assert_eq!(phase, Phase::RevealInterstitial);
}

#[tokio::test]
async fn test_split_request_then_load() {
    let mut game = three_players();
    let request = game.start_game(RoundOptions::default()).unwrap();
    assert_eq!(request.category(), "Mix");
    assert_eq!(game.phase(), Phase::LoadingBoard);

    let boxed: Box<dyn BoardProvider> = Box::new(FixedProvider::new(items(16)));
    let phase = game.load_board(&boxed, request).await.unwrap();
    assert_eq!(phase, Phase::RevealInterstitial);
}
