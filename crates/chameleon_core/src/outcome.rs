//! Round outcomes and the GAME_OVER summary.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::instrument;

use crate::state::GameState;
use crate::types::{BoardItem, Phase, Player};

/// Side that won an accusation vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Winner {
    /// The chameleon was caught.
    Citizens,
    /// The chameleon escaped.
    Chameleon,
}

/// How a round was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The table voted; a winner is recorded.
    Accused {
        /// Whether the table caught the chameleon.
        caught: bool,
    },
    /// The chameleon and the secret were revealed for discussion.
    Revealed,
}

impl Outcome {
    /// Returns the winner if the round was decided by vote.
    pub fn winner(&self) -> Option<Winner> {
        match self {
            Outcome::Accused { caught: true } => Some(Winner::Citizens),
            Outcome::Accused { caught: false } => Some(Winner::Chameleon),
            Outcome::Revealed => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner() {
            Some(Winner::Citizens) => write!(f, "Citizens win"),
            Some(Winner::Chameleon) => write!(f, "Chameleon wins"),
            None => write!(f, "Chameleon revealed"),
        }
    }
}

/// Everything the table learns once a round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct RoundSummary {
    /// 1-based round number since the last reset.
    round: u32,
    /// The player who held the chameleon role.
    chameleon: Player,
    /// The true secret item.
    secret: BoardItem,
    /// The decoy the chameleon saw, in impostor mode.
    impostor: Option<BoardItem>,
    /// The player who took the first turn.
    starter: Player,
    /// How the round was resolved.
    outcome: Outcome,
}

impl RoundSummary {
    /// Builds the summary from a state in GAME_OVER.
    ///
    /// Returns `None` in every other phase, so the chameleon's identity
    /// cannot leak through this type while a round is live.
    #[instrument(skip(state), fields(phase = %state.phase()))]
    pub fn from_state(state: &GameState) -> Option<Self> {
        if *state.phase() != Phase::GameOver {
            return None;
        }
        Some(Self {
            round: *state.round(),
            chameleon: state.chameleon()?.clone(),
            secret: state.secret_item().clone()?,
            impostor: state.impostor_item().clone(),
            starter: state.starter()?.clone(),
            outcome: (*state.outcome())?,
        })
    }
}

impl std::fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Round {}: {}. The chameleon was {}; the secret was {}",
            self.round,
            self.outcome,
            self.chameleon.name(),
            self.secret.name()
        )?;
        if let Some(decoy) = &self.impostor {
            write!(f, " (they saw {})", decoy.name())?;
        }
        Ok(())
    }
}
