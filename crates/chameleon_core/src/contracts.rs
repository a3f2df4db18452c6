//! Contract-based validation for phase transitions.
//!
//! Preconditions guard every event at the controller boundary;
//! postconditions re-check the round invariants after role assignment.

use tracing::{instrument, warn};

use crate::action::{ActionKind, GameError};
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::types::{MIN_PLAYERS, Phase};
use crate::GameState;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is in one of the phases that accept an event.
pub struct InPhase;

impl InPhase {
    /// Rejects `action` unless the current phase is one of `accepted`.
    #[instrument(skip(state), fields(phase = %state.phase()))]
    pub fn check(state: &GameState, accepted: &[Phase], action: ActionKind) -> Result<(), GameError> {
        let phase = *state.phase();
        if accepted.contains(&phase) {
            Ok(())
        } else {
            warn!(%phase, %action, "Rejected event for phase");
            Err(GameError::invalid(phase, action))
        }
    }
}

/// Precondition: the roster is large enough for a round.
pub struct EnoughPlayers;

impl EnoughPlayers {
    /// Rejects with [`GameError::InsufficientPlayers`] below [`MIN_PLAYERS`].
    #[instrument(skip(state), fields(count = state.players().len()))]
    pub fn check(state: &GameState) -> Result<(), GameError> {
        let count = state.players().len();
        if count >= MIN_PLAYERS {
            Ok(())
        } else {
            warn!(count, required = MIN_PLAYERS, "Not enough players");
            Err(GameError::InsufficientPlayers {
                count,
                required: MIN_PLAYERS,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Round start contract
// ─────────────────────────────────────────────────────────────

/// Contract for the round-start algorithm.
///
/// Preconditions:
/// - A board is being loaded
/// - The roster has at least [`MIN_PLAYERS`] players
///
/// Postconditions:
/// - All round invariants hold
/// - The roster is unchanged (same ids, same order)
/// - The round counter advanced by one
/// - The reveal starts at the first player
pub struct RoundStartContract;

impl Contract<GameState, ()> for RoundStartContract {
    fn pre(state: &GameState, _action: &()) -> Result<(), GameError> {
        InPhase::check(state, &[Phase::LoadingBoard], ActionKind::ContentReady)?;
        EnoughPlayers::check(state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), GameError> {
        RoundInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let ids = |s: &GameState| s.players().iter().map(|p| *p.id()).collect::<Vec<_>>();
        if ids(before) != ids(after) {
            return Err(GameError::InvariantViolation(
                "Roster changed during round start".to_string(),
            ));
        }
        if *after.round() != before.round() + 1 {
            return Err(GameError::InvariantViolation(
                "Round counter did not advance".to_string(),
            ));
        }
        if *after.phase() != Phase::RevealInterstitial || *after.current_player_index() != 0 {
            return Err(GameError::InvariantViolation(
                "Reveal does not start at the first player".to_string(),
            ));
        }
        Ok(())
    }
}
