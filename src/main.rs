//! Clash Chameleon - unified CLI
//!
//! Play on a shared terminal, simulate rounds, or inspect a card catalog.

#![warn(missing_docs)]

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chameleon_core::{FallbackProvider, Winner};
use clap::Parser;
use clash_chameleon::cli::{Cli, Command};
use clash_chameleon::{
    CATEGORIES, CardCatalog, CatalogProvider, ConfigError, ConfigOverrides, GameConfig,
    Simulation, tui,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Play { round, players } => {
            let config = config.with_overrides(ConfigOverrides::from(round))?;
            let provider = build_provider(&config)?;
            tui::run_tui(config, &players, provider).await
        }
        Command::Simulate {
            round,
            rounds,
            players,
            json,
        } => {
            init_stderr_tracing();
            let config = config.with_overrides(ConfigOverrides::from(round))?;
            run_simulation(&config, rounds, players, json).await
        }
        Command::Categories { catalog } => {
            let path = catalog.or_else(|| config.catalog().clone());
            list_categories(path.as_deref())
        }
    }
}

/// Catalog provider for the configured category, falling back to the whole catalog.
#[instrument(skip(config))]
fn build_provider(
    config: &GameConfig,
) -> Result<FallbackProvider<CatalogProvider, CatalogProvider>> {
    let path = config.catalog().as_deref().ok_or_else(|| {
        ConfigError::new("no card catalog configured; pass --catalog or set `catalog`".to_string())
    })?;
    let catalog = Arc::new(CardCatalog::from_file(path)?);
    let seed = *config.seed();
    Ok(FallbackProvider::new(
        CatalogProvider::new(Arc::clone(&catalog), seed),
        CatalogProvider::any_category(catalog, seed.map(|s| s.wrapping_add(1))),
    ))
}

#[instrument(skip(config))]
async fn run_simulation(config: &GameConfig, rounds: u32, players: usize, json: bool) -> Result<()> {
    let provider = build_provider(config)?;
    let simulation = Simulation::new(provider, config.round_options(), players, *config.seed());
    let report = simulation
        .run(rounds)
        .await
        .context("simulation stopped")?;

    for summary in report.rounds() {
        if json {
            println!("{}", serde_json::to_string(summary)?);
        } else {
            println!("{}", summary);
        }
    }
    if !json {
        let caught = report
            .rounds()
            .iter()
            .filter(|s| s.outcome().winner() == Some(Winner::Citizens))
            .count();
        println!();
        println!("Chameleon caught in {} of {} rounds", caught, report.rounds().len());
    }
    info!(rounds = report.rounds().len(), "Simulation finished");
    Ok(())
}

fn list_categories(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        for category in CATEGORIES {
            println!("{}", category);
        }
        return Ok(());
    };
    let catalog = CardCatalog::from_file(path)?;
    for (category, count) in catalog.category_counts(&CATEGORIES) {
        println!("{:<16}{:>4} cards", category, count);
    }
    Ok(())
}

fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
