//! The game state aggregate owned by the controller.

use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::board::Board;
use crate::outcome::Outcome;
use crate::types::{BoardItem, GameMode, Phase, Player, PlayerId, RoundOptions};

/// Complete game state.
///
/// Only [`GameController`](crate::GameController) mutates it, and only
/// through the enumerated transitions; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GameState {
    /// Roster in insertion order, which is also the reveal order.
    pub(crate) players: Vec<Player>,
    /// Reveal cursor into `players`, meaningful while revealing.
    pub(crate) current_player_index: usize,
    /// Active board, `None` outside a round.
    pub(crate) board: Option<Board>,
    /// Item shown to citizens.
    pub(crate) secret_item: Option<BoardItem>,
    /// Decoy shown to the chameleon in impostor mode.
    pub(crate) impostor_item: Option<BoardItem>,
    /// Current phase.
    pub(crate) phase: Phase,
    /// Player taking the first turn.
    pub(crate) starter_player_id: Option<PlayerId>,
    /// Options of the current or most recent round.
    pub(crate) options: RoundOptions,
    /// How the last round resolved, set at GAME_OVER.
    pub(crate) outcome: Option<Outcome>,
    /// Rounds started since the last reset.
    pub(crate) round: u32,
}

impl GameState {
    /// Creates an empty state in SETUP.
    #[instrument]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            current_player_index: 0,
            board: None,
            secret_item: None,
            impostor_item: None,
            phase: Phase::Setup,
            starter_player_id: None,
            options: RoundOptions::default(),
            outcome: None,
            round: 0,
        }
    }

    /// Items of the active board, empty outside a round.
    pub fn board_items(&self) -> &[BoardItem] {
        self.board.as_ref().map(Board::items).unwrap_or_default()
    }

    /// Mode of the current or most recent round.
    pub fn game_mode(&self) -> GameMode {
        *self.options.mode()
    }

    /// Whether the board is hidden while playing.
    pub fn board_hidden(&self) -> bool {
        *self.options.hide_board()
    }

    /// Looks a player up by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| *p.id() == id)
    }

    /// Player under the reveal cursor.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// The player holding the chameleon role, if roles are assigned.
    pub fn chameleon(&self) -> Option<&Player> {
        self.players.iter().find(|p| *p.is_chameleon())
    }

    /// Number of players flagged as chameleon.
    pub fn chameleon_count(&self) -> usize {
        self.players.iter().filter(|p| *p.is_chameleon()).count()
    }

    /// The player taking the first turn.
    pub fn starter(&self) -> Option<&Player> {
        self.starter_player_id.and_then(|id| self.player(id))
    }

    /// Clears every round-scoped field and role flag in one step.
    #[instrument(skip(self))]
    pub(crate) fn clear_round(&mut self) {
        debug!("Clearing round-scoped fields");
        self.board = None;
        self.secret_item = None;
        self.impostor_item = None;
        self.starter_player_id = None;
        self.current_player_index = 0;
        self.outcome = None;
        for player in &mut self.players {
            player.set_chameleon(false);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
