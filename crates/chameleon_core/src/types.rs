//! Core domain types: players, board items, modes and phases.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// Minimum roster size for a round to start.
pub const MIN_PLAYERS: usize = 3;

// ─────────────────────────────────────────────────────────────
//  Players
// ─────────────────────────────────────────────────────────────

/// Opaque identifier for a player.
///
/// Allocated by the controller from a monotonic counter and never reused.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("player-{}", _0)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Wraps a raw id.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A participant in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Unique id.
    id: PlayerId,
    /// Display name, never empty.
    name: String,
    /// Whether this player holds the chameleon role in the current round.
    is_chameleon: bool,
    /// Score slot carried with the player; rounds never change it.
    score: u32,
}

impl Player {
    /// Creates a citizen with no points.
    pub(crate) fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            is_chameleon: false,
            score: 0,
        }
    }

    pub(crate) fn set_chameleon(&mut self, value: bool) {
        self.is_chameleon = value;
    }
}

// ─────────────────────────────────────────────────────────────
//  Board items
// ─────────────────────────────────────────────────────────────

/// Rarity tier of a board item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Rarity {
    /// Most frequent tier.
    #[default]
    Common,
    /// Second tier.
    Rare,
    /// Third tier.
    Epic,
    /// Fourth tier.
    Legendary,
    /// Unique heroes.
    Champion,
}

impl Rarity {
    /// Parses a rarity label, falling back to [`Rarity::Common`] for
    /// anything unrecognised.
    #[instrument]
    pub fn parse_lenient(label: &str) -> Self {
        label.trim().parse().unwrap_or_default()
    }
}

/// One item on the shared board.
///
/// Immutable once produced by a content provider. Names are unique within
/// a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct BoardItem {
    /// Display name, unique within a board.
    #[new(into)]
    name: String,
    /// Rarity tier.
    rarity: Rarity,
    /// Play cost.
    cost: u32,
    /// Optional flavour text.
    #[new(default)]
    #[serde(default)]
    description: Option<String>,
    /// Optional image reference.
    #[new(default)]
    #[serde(default)]
    image_url: Option<String>,
}

impl BoardItem {
    /// Attaches flavour text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches an image reference.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────
//  Round configuration
// ─────────────────────────────────────────────────────────────

/// How the chameleon experiences the reveal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// The chameleon is told they are the chameleon and sees no item.
    #[default]
    Classic,
    /// The chameleon is shown a decoy item and never told their role.
    Impostor,
}

/// How a round ends once voting is over.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResolutionStyle {
    /// The table declares whether the chameleon was caught; a winner is recorded.
    Accusation,
    /// The chameleon and the secret are simply revealed; no winner.
    RevealOnly,
}

impl ResolutionStyle {
    /// Resolution used by a mode when none is configured.
    #[instrument]
    pub fn default_for(mode: GameMode) -> Self {
        match mode {
            GameMode::Classic => Self::Accusation,
            GameMode::Impostor => Self::RevealOnly,
        }
    }
}

/// Settings chosen at StartGame and reused by PlayAgain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RoundOptions {
    /// Content category requested from the provider.
    category: String,
    /// Reveal mode.
    mode: GameMode,
    /// Hide the board during PLAYING (presentation only).
    hide_board: bool,
    /// How the round resolves.
    resolution: ResolutionStyle,
}

/// Category that matches every item.
pub const MIX_CATEGORY: &str = "Mix";

impl RoundOptions {
    /// Creates options for `mode` with its default resolution.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        Self {
            category: MIX_CATEGORY.to_string(),
            mode,
            hide_board: false,
            resolution: ResolutionStyle::default_for(mode),
        }
    }

    /// Sets the requested category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets whether the board is hidden while playing.
    pub fn with_hide_board(mut self, hide_board: bool) -> Self {
        self.hide_board = hide_board;
        self
    }

    /// Overrides the resolution style.
    pub fn with_resolution(mut self, resolution: ResolutionStyle) -> Self {
        self.resolution = resolution;
        self
    }
}

impl Default for RoundOptions {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

// ─────────────────────────────────────────────────────────────
//  Phases
// ─────────────────────────────────────────────────────────────

/// State of the game phase state machine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Roster editing; no round in progress.
    #[default]
    Setup,
    /// Waiting for the content provider.
    LoadingBoard,
    /// "Pass the device to ..." screen before a private reveal.
    RevealInterstitial,
    /// The current player's private role/item reveal.
    RevealInfo,
    /// Hint-giving around the shared board.
    Playing,
    /// Discussion and vote.
    Voting,
    /// Round resolved.
    GameOver,
}

impl Phase {
    /// True from the first reveal through GAME_OVER, when round-scoped
    /// fields are populated.
    pub fn is_round_active(self) -> bool {
        matches!(
            self,
            Self::RevealInterstitial
                | Self::RevealInfo
                | Self::Playing
                | Self::Voting
                | Self::GameOver
        )
    }

    /// True while players are being shown their roles one by one.
    pub fn is_revealing(self) -> bool {
        matches!(self, Self::RevealInterstitial | Self::RevealInfo)
    }
}
