//! Round fields invariant: round-scoped fields move together.

use super::Invariant;
use crate::types::Phase;
use crate::GameState;

/// Invariant: round-scoped fields are all set while a round is active and
/// all clear in SETUP or LOADING_BOARD. An outcome exists only at GAME_OVER.
pub struct RoundFieldsInvariant;

impl Invariant<GameState> for RoundFieldsInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board().is_some();
        let secret = state.secret_item().is_some();
        let starter = state.starter_player_id().is_some();
        let outcome_ok = state.outcome().is_some() == (*state.phase() == Phase::GameOver);

        if state.phase().is_round_active() {
            board && secret && starter && state.starter().is_some() && outcome_ok
        } else {
            !board && !secret && !starter && state.impostor_item().is_none() && outcome_ok
        }
    }

    fn description() -> &'static str {
        "Round-scoped fields are set together during a round and cleared outside it"
    }
}
