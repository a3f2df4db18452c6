//! Clash Chameleon - a pass-the-device chameleon party game
//!
//! This crate wires the [`chameleon_core`] state machine to the outside
//! world: configuration files, a card catalog provider, a terminal UI and a
//! headless simulator.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with CLI overrides
//! - **Catalog**: TOML card catalog and the board provider drawing from it
//! - **TUI**: one ratatui screen per game phase
//! - **Simulate**: automated rounds for testing and demos
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use clash_chameleon::{CardCatalog, CatalogProvider, GameConfig, Simulation};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let catalog = Arc::new(CardCatalog::from_file("cards.toml")?);
//! let config = GameConfig::default();
//! let provider = CatalogProvider::new(catalog, *config.seed());
//! let report = Simulation::new(provider, config.round_options(), 4, None)
//!     .run(3)
//!     .await?;
//! println!("{} rounds played", report.rounds().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
pub mod cli;
mod config;
mod simulate;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{
    CATEGORIES, CONFIG_ENV, ConfigError, ConfigOverrides, DEFAULT_CONFIG_FILE, GameConfig,
};

// Crate-level exports - Card catalog
pub use catalog::{CardCatalog, CatalogCard, CatalogError, CatalogProvider};

// Crate-level exports - Simulation
pub use simulate::{Simulation, SimulationReport};
