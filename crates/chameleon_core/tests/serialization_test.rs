//! Tests for the serialized shape of phases and round summaries.

use chameleon_core::{BoardItem, GameController, Phase, Rarity, RoundOptions};
use serde_json::json;
use strum::IntoEnumIterator;

fn items() -> Vec<BoardItem> {
    (0..16)
        .map(|i| BoardItem::new(format!("Card {i}"), Rarity::Rare, 4))
        .collect()
}

#[test]
fn test_phase_names_screaming_snake_case() {
    assert_eq!(serde_json::to_value(Phase::Setup).unwrap(), json!("SETUP"));
    assert_eq!(
        serde_json::to_value(Phase::LoadingBoard).unwrap(),
        json!("LOADING_BOARD")
    );
    assert_eq!(
        serde_json::to_value(Phase::RevealInterstitial).unwrap(),
        json!("REVEAL_INTERSTITIAL")
    );
    assert_eq!(serde_json::to_value(Phase::GameOver).unwrap(), json!("GAME_OVER"));
}

#[test]
fn test_phase_serde_name_matches_display() {
    for phase in Phase::iter() {
        let text = serde_json::to_string(&phase).unwrap();
        assert_eq!(text, format!("\"{}\"", phase));
        let back: Phase = serde_json::from_str(&text).unwrap();
        assert_eq!(back, phase);
    }
}

#[test]
fn test_round_summary_json_shape() {
    let mut game = GameController::seeded(12);
    for name in ["Ada", "Brin", "Cy"] {
        game.add_player(name).unwrap();
    }
    game.start_game(RoundOptions::default()).unwrap();
    game.content_ready(items()).unwrap();
    while game.phase().is_revealing() {
        game.reveal_role().unwrap();
        game.finish_reveal().unwrap();
    }
    game.start_voting().unwrap();
    game.cast_vote(true).unwrap();

    let summary = game.summary().unwrap();
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["round"], 1);
    assert_eq!(value["chameleon"]["name"], json!(summary.chameleon().name()));
    assert_eq!(value["chameleon"]["is_chameleon"], true);
    assert_eq!(value["secret"]["name"], json!(summary.secret().name()));
    assert!(value["impostor"].is_null());
    assert_eq!(value["outcome"], json!({ "Accused": { "caught": true } }));
}
