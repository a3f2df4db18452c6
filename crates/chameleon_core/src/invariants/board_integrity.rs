//! Board integrity invariant: the board, secret and decoy agree.

use std::collections::HashSet;

use super::Invariant;
use crate::board::BOARD_SIZE;
use crate::types::GameMode;
use crate::GameState;

/// Invariant: during a round the board holds [`BOARD_SIZE`] unique names,
/// the secret is on it, and in impostor mode (only) a decoy is on it whose
/// name differs from the secret.
pub struct BoardIntegrityInvariant;

impl Invariant<GameState> for BoardIntegrityInvariant {
    fn holds(state: &GameState) -> bool {
        if !state.phase().is_round_active() {
            return true;
        }

        let items = state.board_items();
        let names: HashSet<&str> = items.iter().map(|i| i.name().as_str()).collect();
        if items.len() != BOARD_SIZE || names.len() != BOARD_SIZE {
            return false;
        }

        let Some(secret) = state.secret_item() else {
            return false;
        };
        if !names.contains(secret.name().as_str()) {
            return false;
        }

        match (state.game_mode(), state.impostor_item()) {
            (GameMode::Classic, None) => true,
            (GameMode::Impostor, Some(decoy)) => {
                decoy.name() != secret.name() && names.contains(decoy.name().as_str())
            }
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Board has 16 unique items containing the secret and, in impostor mode, a distinct decoy"
    }
}
