//! Read-only projections of the state for each phase.
//!
//! A front end renders whatever [`view`] returns and never touches the
//! state directly. Hidden information only appears in the variants where
//! the rules allow it: the private reveal and the game-over review.

use serde::Serialize;

use crate::outcome::RoundSummary;
use crate::reveal::{Reveal, resolve_reveal};
use crate::types::{BoardItem, MIN_PLAYERS, Phase, Player, ResolutionStyle};
use crate::GameState;

/// Footer shown under the board while playing.
pub const HINT_PROMPT: &str = "Give a one-word hint. Don't be too obvious, don't be too vague.";

/// One board cell in the game-over review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry<'a> {
    /// The item.
    pub item: &'a BoardItem,
    /// Whether this was the secret.
    pub is_secret: bool,
    /// Whether this was the decoy handed to the chameleon.
    pub is_impostor: bool,
}

/// What the screen for the current phase shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PhaseView<'a> {
    /// Roster editing.
    Setup {
        /// Current roster.
        players: &'a [Player],
        /// Whether StartGame would pass the roster check.
        can_start: bool,
    },
    /// Waiting on the provider.
    LoadingBoard {
        /// Category being fetched.
        category: &'a str,
    },
    /// "Pass the device to ..." screen.
    RevealInterstitial {
        /// Player who should take the device.
        player: &'a Player,
        /// One-based position in the reveal order.
        position: usize,
        /// Roster size.
        total: usize,
    },
    /// The private reveal.
    RevealInfo(Reveal),
    /// Discussion around the board.
    Playing {
        /// Player taking the first turn.
        starter: &'a Player,
        /// Board items, `None` when the board is hidden.
        board: Option<&'a [BoardItem]>,
    },
    /// The vote.
    Voting {
        /// Which events resolve the round.
        resolution: ResolutionStyle,
    },
    /// Result and board review.
    GameOver {
        /// Round summary.
        summary: RoundSummary,
        /// Every board item, flagged with its true identity.
        review: Vec<ReviewEntry<'a>>,
    },
}

/// Projects `state` for its current phase.
///
/// Returns `None` only if the state is missing fields its phase requires.
pub fn view(state: &GameState) -> Option<PhaseView<'_>> {
    let view = match state.phase() {
        Phase::Setup => PhaseView::Setup {
            players: state.players(),
            can_start: state.players().len() >= MIN_PLAYERS,
        },
        Phase::LoadingBoard => PhaseView::LoadingBoard {
            category: state.options().category(),
        },
        Phase::RevealInterstitial => PhaseView::RevealInterstitial {
            player: state.current_player()?,
            position: state.current_player_index() + 1,
            total: state.players().len(),
        },
        Phase::RevealInfo => PhaseView::RevealInfo(resolve_reveal(state)?),
        Phase::Playing => PhaseView::Playing {
            starter: state.starter()?,
            board: (!state.board_hidden()).then(|| state.board_items()),
        },
        Phase::Voting => PhaseView::Voting {
            resolution: *state.options().resolution(),
        },
        Phase::GameOver => PhaseView::GameOver {
            summary: RoundSummary::from_state(state)?,
            review: review(state),
        },
    };
    Some(view)
}

fn review(state: &GameState) -> Vec<ReviewEntry<'_>> {
    let secret = state.secret_item().as_ref().map(|i| i.name());
    let impostor = state.impostor_item().as_ref().map(|i| i.name());
    state
        .board_items()
        .iter()
        .map(|item| ReviewEntry {
            item,
            is_secret: Some(item.name()) == secret,
            is_impostor: Some(item.name()) == impostor,
        })
        .collect()
}

/// The "How to play" text.
pub fn rules() -> &'static str {
    "\
1. Roles: one player is the Chameleon, everyone else is a Citizen.
2. Secret: Citizens see the secret card. In classic mode the Chameleon sees
   nothing; in impostor mode the Chameleon sees a different card and does
   not know it.
3. Hints: starting with the first player, go around and say ONE word
   related to your card.
4. Goal: Citizens try to find the Chameleon. The Chameleon tries to blend
   in or guess the secret card."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::GameController;
    use crate::types::{GameMode, Rarity, RoundOptions};

    fn items() -> Vec<BoardItem> {
        (0..16)
            .map(|i| BoardItem::new(format!("Card {i}"), Rarity::Rare, 4))
            .collect()
    }

    fn playing(options: RoundOptions) -> GameController {
        let mut game = GameController::seeded(3);
        for name in ["A", "B", "C"] {
            game.add_player(name).expect("add");
        }
        game.start_game(options).expect("start");
        game.content_ready(items()).expect("ready");
        while game.phase().is_revealing() {
            game.reveal_role().expect("reveal");
            game.finish_reveal().expect("finish");
        }
        game
    }

    #[test]
    fn test_setup_reports_start_readiness() {
        let mut game = GameController::seeded(1);
        game.add_player("A").expect("add");
        let Some(PhaseView::Setup { can_start, .. }) = view(game.state()) else {
            panic!("expected setup view");
        };
        assert!(!can_start);
    }

    #[test]
    fn test_playing_shows_board_unless_hidden() {
        let game = playing(RoundOptions::default());
        let Some(PhaseView::Playing { board, .. }) = view(game.state()) else {
            panic!("expected playing view");
        };
        assert_eq!(board.map(<[BoardItem]>::len), Some(16));

        let game = playing(RoundOptions::default().with_hide_board(true));
        let Some(PhaseView::Playing { board, .. }) = view(game.state()) else {
            panic!("expected playing view");
        };
        assert!(board.is_none());
    }

    #[test]
    fn test_review_marks_secret_and_decoy() {
        let mut game = playing(RoundOptions::new(GameMode::Impostor));
        game.start_voting().expect("vote");
        game.reveal_chameleon().expect("reveal");
        let Some(PhaseView::GameOver { summary, review }) = view(game.state()) else {
            panic!("expected game over view");
        };
        let secret: Vec<_> = review.iter().filter(|e| e.is_secret).collect();
        let decoy: Vec<_> = review.iter().filter(|e| e.is_impostor).collect();
        assert_eq!(secret.len(), 1);
        assert_eq!(decoy.len(), 1);
        assert_eq!(secret[0].item, summary.secret());
    }

    #[test]
    fn test_rules_mention_one_word_hints() {
        assert!(rules().contains("ONE word"));
    }
}
