//! Reveal cursor invariant: the cursor always points at a player while revealing.

use super::Invariant;
use crate::GameState;

/// Invariant: while revealing, `current_player_index` is within the roster.
pub struct RevealCursorInvariant;

impl Invariant<GameState> for RevealCursorInvariant {
    fn holds(state: &GameState) -> bool {
        !state.phase().is_revealing() || *state.current_player_index() < state.players().len()
    }

    fn description() -> &'static str {
        "Reveal cursor stays within the roster"
    }
}
