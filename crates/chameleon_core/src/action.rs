//! First-class events submitted to the state machine, and the errors they
//! can produce.
//!
//! Every driver (TUI, simulator, tests) speaks to the controller in terms
//! of [`Action`] values, so the phase guard lives in one place.

use derive_more::{Display, Error};
use strum::EnumDiscriminants;

use crate::types::{BoardItem, Phase, PlayerId, RoundOptions};

/// An event for the game phase state machine.
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(ActionKind), derive(strum::Display, Hash))]
pub enum Action {
    /// Append a player to the roster (SETUP).
    AddPlayer(String),
    /// Drop a player from the roster (SETUP).
    RemovePlayer(PlayerId),
    /// Begin a round and request a board (SETUP).
    StartGame(RoundOptions),
    /// The provider delivered items (LOADING_BOARD).
    ContentReady(Vec<BoardItem>),
    /// The provider failed (LOADING_BOARD).
    ContentFailed(String),
    /// Show the current player their role (REVEAL_INTERSTITIAL).
    Reveal,
    /// Hide the role and pass the device on (REVEAL_INFO).
    FinishReveal,
    /// Leave the board for the vote (PLAYING).
    StartVoting,
    /// Return from the vote to the board (VOTING).
    BackToBoard,
    /// Declare whether the chameleon was caught (VOTING, accusation style).
    CastVote {
        /// Whether the table caught the chameleon.
        caught: bool,
    },
    /// Reveal the chameleon without a vote (VOTING, reveal-only style).
    RevealChameleon,
    /// Start another round with the same roster (GAME_OVER).
    PlayAgain,
    /// Return to SETUP from anywhere.
    Reset,
}

/// Error produced when an event cannot be applied.
///
/// The state is left unchanged by every error except
/// [`GameError::BoardUnavailable`], which always leaves the game in SETUP.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The event is not accepted in the current phase.
    #[display("{} is not allowed during {}", action, phase)]
    InvalidTransition {
        /// Phase the game was in.
        phase: Phase,
        /// Rejected event.
        action: ActionKind,
    },

    /// Not enough players to start a round.
    #[display("need at least {} players, have {}", required, count)]
    InsufficientPlayers {
        /// Players on the roster.
        count: usize,
        /// Minimum roster size.
        required: usize,
    },

    /// The board could not be produced; the game is back in SETUP.
    #[display("board unavailable: {}", _0)]
    BoardUnavailable(#[error(not(source))] String),

    /// No player with this id is on the roster.
    #[display("unknown player {}", _0)]
    UnknownPlayer(#[error(not(source))] PlayerId),

    /// A player name was empty after trimming.
    #[display("player name must not be empty")]
    EmptyName,

    /// A postcondition failed after a transition.
    #[display("invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

impl GameError {
    /// Shorthand for an [`GameError::InvalidTransition`].
    pub(crate) fn invalid(phase: Phase, action: ActionKind) -> Self {
        Self::InvalidTransition { phase, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_names() {
        assert_eq!(ActionKind::from(&Action::Reveal), ActionKind::Reveal);
        assert_eq!(
            ActionKind::from(&Action::CastVote { caught: true }),
            ActionKind::CastVote
        );
        assert_eq!(ActionKind::StartGame.to_string(), "StartGame");
    }

    #[test]
    fn test_error_messages() {
        let err = GameError::invalid(Phase::Playing, ActionKind::AddPlayer);
        assert_eq!(err.to_string(), "AddPlayer is not allowed during PLAYING");

        let err = GameError::InsufficientPlayers {
            count: 2,
            required: 3,
        };
        assert_eq!(err.to_string(), "need at least 3 players, have 2");
    }

    #[test]
    fn test_errors_have_no_source() {
        use std::error::Error as _;

        let err = GameError::BoardUnavailable("offline".to_string());
        assert_eq!(err.to_string(), "board unavailable: offline");
        assert!(err.source().is_none());
        assert!(GameError::UnknownPlayer(PlayerId::from_raw(4)).source().is_none());
        assert!(GameError::InvariantViolation("x".into()).source().is_none());
    }
}
