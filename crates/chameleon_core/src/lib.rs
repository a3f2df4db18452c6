//! Chameleon core - game logic for a pass-the-device social deduction game
//!
//! One player is secretly the chameleon. Everyone else learns a secret card
//! from a 16-card board; players give one-word hints and then try to find
//! the chameleon.
//!
//! # Architecture
//!
//! - **Controller**: the phase state machine that owns all state
//! - **Board**: validation and narrowing of provider content
//! - **Reveal**: what each player privately sees, per mode
//! - **Provider**: async interface for board content
//! - **View**: read-only per-phase projections for front ends
//! - **Invariants / Contracts**: checks that guard every transition
//!
//! # Example
//!
//! ```no_run
//! use chameleon_core::{FixedProvider, GameController, RoundOptions};
//!
//! # async fn example(provider: FixedProvider) -> Result<(), chameleon_core::GameError> {
//! let mut game = GameController::new();
//! for name in ["Ada", "Brin", "Cy"] {
//!     game.add_player(name)?;
//! }
//! game.start_round(RoundOptions::default(), &provider).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod contracts;
mod controller;
pub mod invariants;
mod outcome;
mod provider;
pub mod random;
mod reveal;
mod state;
mod types;
mod view;

// Crate-level exports - State machine
pub use action::{Action, ActionKind, GameError};
pub use controller::{BoardRequest, GameController};
pub use state::GameState;

// Crate-level exports - Domain types
pub use board::{BOARD_SIZE, Board, BoardError};
pub use outcome::{Outcome, RoundSummary, Winner};
pub use types::{
    BoardItem, GameMode, MIN_PLAYERS, MIX_CATEGORY, Phase, Player, PlayerId, Rarity,
    ResolutionStyle, RoundOptions,
};

// Crate-level exports - Reveal and presentation
pub use reveal::{Reveal, RevealContent, resolve_for, resolve_reveal};
pub use view::{HINT_PROMPT, PhaseView, ReviewEntry, rules, view};

// Crate-level exports - Content providers
pub use provider::{BoardProvider, FallbackProvider, FixedProvider, ProviderError};
