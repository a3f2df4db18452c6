//! Tests for the TOML card catalog and the providers built on it.

use std::io::Write;
use std::sync::Arc;

use chameleon_core::{
    BoardProvider, FallbackProvider, GameController, Phase, Rarity, RoundOptions,
};
use clash_chameleon::{CardCatalog, CatalogProvider};
use tempfile::NamedTempFile;

/// Catalog with `spells` spell cards and `tanks` tank cards.
fn catalog_file(spells: usize, tanks: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for i in 0..spells {
        writeln!(
            file,
            "[[cards]]\nname = \"Spell {i}\"\nrarity = \"Epic\"\ncost = 3\ndescription = \"Boom\"\ncategories = [\"Spells\"]\n"
        )
        .expect("write");
    }
    for i in 0..tanks {
        writeln!(
            file,
            "[[cards]]\nname = \"Tank {i}\"\nrarity = \"legendary\"\ncost = 8\nimage_url = \"https://img/{i}.png\"\ncategories = [\"Tanks\", \"Win Conditions\"]\n"
        )
        .expect("write");
    }
    file
}

#[test]
fn test_load_catalog_from_file() {
    let file = catalog_file(4, 2);
    let catalog = CardCatalog::from_file(file.path()).expect("Load failed");
    assert_eq!(catalog.cards().len(), 6);

    let tanks = catalog.items_in("Win Conditions");
    assert_eq!(tanks.len(), 2);
    assert_eq!(*tanks[0].rarity(), Rarity::Legendary);
    assert_eq!(tanks[0].image_url().as_deref(), Some("https://img/0.png"));
}

#[test]
fn test_missing_catalog_file() {
    let err = CardCatalog::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(err.message.contains("Failed to read catalog"));
}

#[test]
fn test_category_counts() {
    let file = catalog_file(3, 5);
    let catalog = CardCatalog::from_file(file.path()).expect("Load failed");
    let counts = catalog.category_counts(&["Mix", "Spells", "Tanks", "Swarms"]);
    let numbers: Vec<usize> = counts.iter().map(|(_, n)| *n).collect();
    assert_eq!(numbers, [8, 3, 5, 0]);
}

#[tokio::test]
async fn test_thin_category_falls_back_to_whole_catalog() {
    let file = catalog_file(12, 6);
    let catalog = Arc::new(CardCatalog::from_file(file.path()).expect("Load failed"));
    let provider = FallbackProvider::new(
        CatalogProvider::new(Arc::clone(&catalog), Some(1)),
        CatalogProvider::any_category(catalog, Some(2)),
    );

    let board = provider.fetch_board("Tanks").await.expect("fallback board");
    assert_eq!(board.len(), 16);
}

#[tokio::test]
async fn test_catalog_drives_full_round_start() {
    let file = catalog_file(20, 0);
    let catalog = Arc::new(CardCatalog::from_file(file.path()).expect("Load failed"));
    let provider = CatalogProvider::new(catalog, Some(11));

    let mut game = GameController::seeded(11);
    for name in ["Ada", "Brin", "Cy"] {
        game.add_player(name).expect("add");
    }
    let options = RoundOptions::default().with_category("Spells");
    let phase = game.start_round(options, &provider).await.expect("round");
    assert_eq!(phase, Phase::RevealInterstitial);
    assert!(
        game.state()
            .board_items()
            .iter()
            .all(|item| item.name().starts_with("Spell"))
    );
}

#[tokio::test]
async fn test_small_catalog_leaves_game_in_setup() {
    let file = catalog_file(5, 5);
    let catalog = Arc::new(CardCatalog::from_file(file.path()).expect("Load failed"));
    let provider = CatalogProvider::new(catalog, None);

    let mut game = GameController::seeded(3);
    for name in ["Ada", "Brin", "Cy"] {
        game.add_player(name).expect("add");
    }
    assert!(game.start_round(RoundOptions::default(), &provider).await.is_err());
    assert_eq!(game.phase(), Phase::Setup);
}
