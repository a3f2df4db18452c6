//! Command-line interface for clash_chameleon.

use std::path::PathBuf;

use chameleon_core::{GameMode, ResolutionStyle};
use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;

/// Clash Chameleon - pass-the-device social deduction over a card board
#[derive(Parser, Debug)]
#[command(name = "clash_chameleon")]
#[command(about = "Pass-the-device chameleon party game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the config file (defaults to $CLASH_CHAMELEON_CONFIG or clash_chameleon.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play on this terminal, passing the keyboard between players
    Play {
        /// Round settings
        #[command(flatten)]
        round: RoundArgs,

        /// Players to seat before the first round
        #[arg(short, long = "player")]
        players: Vec<String>,
    },

    /// Play automated rounds and print their summaries
    Simulate {
        /// Round settings
        #[command(flatten)]
        round: RoundArgs,

        /// Number of rounds
        #[arg(short = 'n', long, default_value = "5")]
        rounds: u32,

        /// Number of players
        #[arg(long, default_value = "4")]
        players: usize,

        /// Print summaries as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// List categories and how many catalog cards each one has
    Categories {
        /// Card catalog (TOML)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Round settings shared by play and simulate.
#[derive(Args, Debug, Clone, Default)]
pub struct RoundArgs {
    /// Board category
    #[arg(long)]
    pub category: Option<String>,

    /// Game mode
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<GameMode>,

    /// How the vote resolves
    #[arg(long, value_parser = parse_resolution)]
    pub resolution: Option<ResolutionStyle>,

    /// Hide the board while playing
    #[arg(long)]
    pub hide_board: bool,

    /// Card catalog (TOML)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Seed for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<RoundArgs> for ConfigOverrides {
    fn from(args: RoundArgs) -> Self {
        Self {
            category: args.category,
            mode: args.mode,
            hide_board: args.hide_board,
            resolution: args.resolution,
            catalog: args.catalog,
            seed: args.seed,
        }
    }
}

fn parse_mode(value: &str) -> Result<GameMode, String> {
    value
        .parse()
        .map_err(|_| format!("unknown mode '{}', expected classic or impostor", value))
}

fn parse_resolution(value: &str) -> Result<ResolutionStyle, String> {
    value
        .parse()
        .map_err(|_| format!("unknown resolution '{}', expected accusation or reveal_only", value))
}
