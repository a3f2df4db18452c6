//! Reveal content resolution.
//!
//! One function decides what a player sees on their private reveal, for
//! both modes. It is a pure function of the state, so presentation and
//! tests always agree.

use serde::Serialize;
use tracing::instrument;

use crate::types::{BoardItem, GameMode, Player, PlayerId};
use crate::GameState;

/// What a player's private reveal shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RevealContent {
    /// "You are the chameleon", no item. Classic mode only.
    Chameleon,
    /// An item, labelled the same way for citizens and for an impostor-mode
    /// chameleon.
    Item(BoardItem),
}

/// The reveal for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reveal {
    /// Who the reveal is for.
    pub player_id: PlayerId,
    /// Their name, for the header.
    pub player_name: String,
    /// What they are shown.
    pub content: RevealContent,
}

/// Decides what `player` sees given the round's mode and items.
///
/// Returns `None` when the round is missing an item the mode requires.
pub fn resolve_for(
    player: &Player,
    mode: GameMode,
    secret: Option<&BoardItem>,
    impostor: Option<&BoardItem>,
) -> Option<RevealContent> {
    match (mode, *player.is_chameleon()) {
        (GameMode::Classic, true) => Some(RevealContent::Chameleon),
        (GameMode::Impostor, true) => impostor.cloned().map(RevealContent::Item),
        (_, false) => secret.cloned().map(RevealContent::Item),
    }
}

/// Resolves the reveal for the player under the reveal cursor.
///
/// Returns `None` outside a live round or when the cursor is out of range.
#[instrument(skip(state), fields(phase = %state.phase(), cursor = state.current_player_index()))]
pub fn resolve_reveal(state: &GameState) -> Option<Reveal> {
    if !state.phase().is_round_active() {
        return None;
    }
    let player = state.current_player()?;
    let content = resolve_for(
        player,
        state.game_mode(),
        state.secret_item().as_ref(),
        state.impostor_item().as_ref(),
    )?;
    Some(Reveal {
        player_id: *player.id(),
        player_name: player.name().clone(),
        content,
    })
}
