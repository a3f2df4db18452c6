//! Single chameleon invariant: exactly one chameleon per live round.

use super::Invariant;
use crate::GameState;

/// Invariant: exactly one player holds the chameleon role while a round is
/// active, and nobody does outside a round.
pub struct SingleChameleonInvariant;

impl Invariant<GameState> for SingleChameleonInvariant {
    fn holds(state: &GameState) -> bool {
        let expected = if state.phase().is_round_active() { 1 } else { 0 };
        state.chameleon_count() == expected
    }

    fn description() -> &'static str {
        "Exactly one chameleon during a round, none outside it"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase, Player, PlayerId};

    fn roster(flags: &[bool]) -> Vec<Player> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &flag)| {
                let mut p = Player::new(PlayerId::from_raw(i as u64), format!("P{i}"));
                p.set_chameleon(flag);
                p
            })
            .collect()
    }

    #[test]
    fn test_setup_without_roles_holds() {
        let mut state = GameState::new();
        state.players = roster(&[false, false, false]);
        assert!(SingleChameleonInvariant::holds(&state));
    }

    #[test]
    fn test_two_chameleons_violates() {
        let mut state = GameState::new();
        state.players = roster(&[true, false, true]);
        state.phase = Phase::Playing;
        assert!(!SingleChameleonInvariant::holds(&state));
    }

    #[test]
    fn test_no_chameleon_during_round_violates() {
        let mut state = GameState::new();
        state.players = roster(&[false, false, false]);
        state.phase = Phase::Voting;
        assert!(!SingleChameleonInvariant::holds(&state));
    }
}
