//! The game phase state machine.
//!
//! [`GameController`] exclusively owns the [`GameState`] and its RNG. Each
//! public operation is one row of the transition table: it checks the
//! phase guard, mutates the state as a single effect, and returns the new
//! phase. Rejected events leave the state untouched.
//!
//! The board fetch is the only suspension point. [`GameController::start_game`]
//! moves to LOADING_BOARD and hands back a [`BoardRequest`]; the driver
//! resolves it with a provider and reports back through
//! [`GameController::content_ready`] or [`GameController::content_failed`].
//! [`GameController::load_board`] does both steps for drivers that can
//! simply await.

use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::action::{Action, ActionKind, GameError};
use crate::board::Board;
use crate::contracts::{Contract, EnoughPlayers, InPhase, RoundStartContract};
use crate::outcome::{Outcome, RoundSummary};
use crate::provider::BoardProvider;
use crate::random;
use crate::reveal::{Reveal, resolve_reveal};
use crate::types::{
    BoardItem, GameMode, Phase, Player, PlayerId, ResolutionStyle, RoundOptions,
};
use crate::GameState;

/// A pending board fetch, produced by StartGame and PlayAgain.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BoardRequest {
    /// Category to ask the provider for.
    category: String,
    /// Number the round will carry once it starts.
    round: u32,
}

/// Random picks for one round, drawn before anything is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoundDraw {
    pub(crate) board: Board,
    pub(crate) secret: BoardItem,
    pub(crate) chameleon_index: usize,
    pub(crate) impostor: Option<BoardItem>,
    pub(crate) starter_index: usize,
}

/// Owns the game state and drives it through the phase state machine.
#[derive(Debug)]
pub struct GameController<R = StdRng> {
    state: GameState,
    rng: R,
    next_player_id: u64,
}

impl GameController<StdRng> {
    /// Creates a controller seeded from system entropy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a controller whose rounds are reproducible from `seed`.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameController<R> {
    /// Creates a controller drawing from `rng`.
    #[instrument(skip(rng))]
    pub fn with_rng(rng: R) -> Self {
        info!("Creating game controller");
        Self {
            state: GameState::new(),
            rng,
            next_player_id: 1,
        }
    }

    /// Read-only view of the state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        *self.state.phase()
    }

    /// Player under the reveal cursor, while revealing.
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase().is_revealing() {
            self.state.current_player()
        } else {
            None
        }
    }

    /// Player taking the first turn, once a round has started.
    pub fn starter(&self) -> Option<&Player> {
        self.state.starter()
    }

    /// The chameleon. Only disclosed at GAME_OVER.
    pub fn chameleon(&self) -> Option<&Player> {
        if self.phase() == Phase::GameOver {
            self.state.chameleon()
        } else {
            None
        }
    }

    /// What the current player is shown. Only available in REVEAL_INFO.
    pub fn reveal(&self) -> Option<Reveal> {
        if self.phase() == Phase::RevealInfo {
            resolve_reveal(&self.state)
        } else {
            None
        }
    }

    /// Summary of the finished round. Only available at GAME_OVER.
    pub fn summary(&self) -> Option<RoundSummary> {
        RoundSummary::from_state(&self.state)
    }

    // ─────────────────────────────────────────────────────────────
    //  Dispatcher
    // ─────────────────────────────────────────────────────────────

    /// Applies any event and returns the resulting phase.
    ///
    /// StartGame and PlayAgain return LOADING_BOARD; the board must then be
    /// delivered with [`Action::ContentReady`] or [`Action::ContentFailed`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as the dedicated operation for each event.
    #[instrument(skip(self, action), fields(phase = %self.phase(), action = %ActionKind::from(&action)))]
    pub fn apply(&mut self, action: Action) -> Result<Phase, GameError> {
        match action {
            Action::AddPlayer(name) => self.add_player(&name).map(|_| self.phase()),
            Action::RemovePlayer(id) => self.remove_player(id).map(|_| self.phase()),
            Action::StartGame(options) => self.start_game(options).map(|_| self.phase()),
            Action::ContentReady(items) => self.content_ready(items),
            Action::ContentFailed(reason) => self.content_failed(reason),
            Action::Reveal => self.reveal_role(),
            Action::FinishReveal => self.finish_reveal(),
            Action::StartVoting => self.start_voting(),
            Action::BackToBoard => self.back_to_board(),
            Action::CastVote { caught } => self.cast_vote(caught),
            Action::RevealChameleon => self.reveal_chameleon(),
            Action::PlayAgain => self.play_again().map(|_| self.phase()),
            Action::Reset => Ok(self.reset()),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  SETUP
    // ─────────────────────────────────────────────────────────────

    /// Appends a player with a fresh id.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside SETUP,
    /// [`GameError::EmptyName`] for a blank name.
    #[instrument(skip(self))]
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, GameError> {
        InPhase::check(&self.state, &[Phase::Setup], ActionKind::AddPlayer)?;
        let name = name.trim();
        if name.is_empty() {
            warn!("Rejected empty player name");
            return Err(GameError::EmptyName);
        }

        let id = PlayerId::from_raw(self.next_player_id);
        self.next_player_id += 1;
        self.state.players.push(Player::new(id, name.to_string()));
        info!(player_id = %id, name, roster = self.state.players.len(), "Player added");
        Ok(id)
    }

    /// Removes a player from the roster.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside SETUP,
    /// [`GameError::UnknownPlayer`] if no player has this id.
    #[instrument(skip(self))]
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, GameError> {
        InPhase::check(&self.state, &[Phase::Setup], ActionKind::RemovePlayer)?;
        let index = self
            .state
            .players
            .iter()
            .position(|p| *p.id() == id)
            .ok_or_else(|| {
                warn!(player_id = %id, "Unknown player");
                GameError::UnknownPlayer(id)
            })?;
        let removed = self.state.players.remove(index);
        info!(player_id = %id, roster = self.state.players.len(), "Player removed");
        Ok(removed)
    }

    /// Starts a round: records the options and enters LOADING_BOARD.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside SETUP,
    /// [`GameError::InsufficientPlayers`] below three players.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, options: RoundOptions) -> Result<BoardRequest, GameError> {
        InPhase::check(&self.state, &[Phase::Setup], ActionKind::StartGame)?;
        EnoughPlayers::check(&self.state)?;
        self.state.options = options;
        Ok(self.begin_loading())
    }

    // ─────────────────────────────────────────────────────────────
    //  LOADING_BOARD
    // ─────────────────────────────────────────────────────────────

    /// Delivers the provider's items and runs the round-start algorithm.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside LOADING_BOARD.
    /// [`GameError::BoardUnavailable`] when fewer than 16 distinct items
    /// arrive; the game is then back in SETUP with no round fields set.
    #[instrument(skip(self, items), fields(supplied = items.len()))]
    pub fn content_ready(&mut self, items: Vec<BoardItem>) -> Result<Phase, GameError> {
        RoundStartContract::pre(&self.state, &())?;

        let draw = match self.draw_round(items) {
            Ok(draw) => draw,
            Err(e) => {
                self.abort_round();
                return Err(e);
            }
        };

        let before = cfg!(debug_assertions).then(|| self.state.clone());
        self.commit_round(draw);

        if let Some(before) = before {
            if let Err(e) = RoundStartContract::post(&before, &self.state) {
                warn!(error = %e, "Round start postcondition failed");
                self.abort_round();
                return Err(e);
            }
        }

        Ok(self.phase())
    }

    /// Reports a provider failure.
    ///
    /// Always ends in SETUP with round fields cleared.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside LOADING_BOARD; otherwise
    /// always [`GameError::BoardUnavailable`] carrying `reason`.
    #[instrument(skip(self, reason))]
    pub fn content_failed(&mut self, reason: impl Into<String>) -> Result<Phase, GameError> {
        InPhase::check(&self.state, &[Phase::LoadingBoard], ActionKind::ContentFailed)?;
        let reason = reason.into();
        warn!(reason = %reason, "Board fetch failed");
        self.abort_round();
        Err(GameError::BoardUnavailable(reason))
    }

    /// Resolves `request` with `provider` and feeds the result back in.
    ///
    /// # Errors
    ///
    /// As [`Self::content_ready`] and [`Self::content_failed`].
    #[instrument(skip(self, provider))]
    pub async fn load_board<P: BoardProvider + ?Sized>(
        &mut self,
        provider: &P,
        request: BoardRequest,
    ) -> Result<Phase, GameError> {
        match provider.fetch_board(&request.category).await {
            Ok(items) => self.content_ready(items),
            Err(e) => self.content_failed(e.message),
        }
    }

    /// StartGame followed by [`Self::load_board`].
    ///
    /// # Errors
    ///
    /// As [`Self::start_game`] and [`Self::load_board`].
    #[instrument(skip(self, provider))]
    pub async fn start_round<P: BoardProvider + ?Sized>(
        &mut self,
        options: RoundOptions,
        provider: &P,
    ) -> Result<Phase, GameError> {
        let request = self.start_game(options)?;
        self.load_board(provider, request).await
    }

    // ─────────────────────────────────────────────────────────────
    //  Reveal cycle
    // ─────────────────────────────────────────────────────────────

    /// Shows the current player their role.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside REVEAL_INTERSTITIAL.
    #[instrument(skip(self))]
    pub fn reveal_role(&mut self) -> Result<Phase, GameError> {
        InPhase::check(&self.state, &[Phase::RevealInterstitial], ActionKind::Reveal)?;
        self.state.phase = Phase::RevealInfo;
        debug!(cursor = self.state.current_player_index, "Revealing");
        Ok(self.phase())
    }

    /// Hides the role and moves to the next player, or to PLAYING after the last.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside REVEAL_INFO.
    #[instrument(skip(self))]
    pub fn finish_reveal(&mut self) -> Result<Phase, GameError> {
        InPhase::check(&self.state, &[Phase::RevealInfo], ActionKind::FinishReveal)?;
        let last = self.state.players.len().saturating_sub(1);
        if self.state.current_player_index < last {
            self.state.current_player_index += 1;
            self.state.phase = Phase::RevealInterstitial;
            debug!(cursor = self.state.current_player_index, "Passing device");
        } else {
            self.state.phase = Phase::Playing;
            info!(
                starter = ?self.state.starter_player_id,
                "All players revealed, round in play"
            );
        }
        Ok(self.phase())
    }

    // ─────────────────────────────────────────────────────────────
    //  PLAYING / VOTING
    // ─────────────────────────────────────────────────────────────

    /// Moves from the board to the vote.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside PLAYING.
    #[instrument(skip(self))]
    pub fn start_voting(&mut self) -> Result<Phase, GameError> {
        InPhase::check(&self.state, &[Phase::Playing], ActionKind::StartVoting)?;
        self.state.phase = Phase::Voting;
        info!("Voting started");
        Ok(self.phase())
    }

    /// Returns from the vote to the board.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside VOTING.
    #[instrument(skip(self))]
    pub fn back_to_board(&mut self) -> Result<Phase, GameError> {
        InPhase::check(&self.state, &[Phase::Voting], ActionKind::BackToBoard)?;
        self.state.phase = Phase::Playing;
        Ok(self.phase())
    }

    /// Records whether the chameleon was caught.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside VOTING or when the round
    /// resolves by reveal only.
    #[instrument(skip(self))]
    pub fn cast_vote(&mut self, caught: bool) -> Result<Phase, GameError> {
        InPhase::check(&self.state, &[Phase::Voting], ActionKind::CastVote)?;
        self.require_resolution(ResolutionStyle::Accusation, ActionKind::CastVote)?;

        self.finish_round(Outcome::Accused { caught });
        Ok(self.phase())
    }

    /// Ends the round by revealing the chameleon, with no winner.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside VOTING or when the round
    /// resolves by accusation.
    #[instrument(skip(self))]
    pub fn reveal_chameleon(&mut self) -> Result<Phase, GameError> {
        InPhase::check(&self.state, &[Phase::Voting], ActionKind::RevealChameleon)?;
        self.require_resolution(ResolutionStyle::RevealOnly, ActionKind::RevealChameleon)?;
        self.finish_round(Outcome::Revealed);
        Ok(self.phase())
    }

    // ─────────────────────────────────────────────────────────────
    //  GAME_OVER
    // ─────────────────────────────────────────────────────────────

    /// Starts a fresh round with the same roster and options.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidTransition`] outside GAME_OVER,
    /// [`GameError::InsufficientPlayers`] below three players.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) -> Result<BoardRequest, GameError> {
        InPhase::check(&self.state, &[Phase::GameOver], ActionKind::PlayAgain)?;
        EnoughPlayers::check(&self.state)?;
        Ok(self.begin_loading())
    }

    /// Returns to SETUP from any phase.
    ///
    /// Clears round fields, role flags and the round counter. The roster
    /// stays.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Phase {
        self.state.clear_round();
        self.state.round = 0;
        self.state.phase = Phase::Setup;
        info!(roster = self.state.players.len(), "Game reset");
        self.phase()
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn require_resolution(
        &self,
        expected: ResolutionStyle,
        action: ActionKind,
    ) -> Result<(), GameError> {
        if *self.state.options.resolution() == expected {
            Ok(())
        } else {
            warn!(%action, resolution = %self.state.options.resolution(), "Wrong resolution event");
            Err(GameError::invalid(self.phase(), action))
        }
    }

    fn begin_loading(&mut self) -> BoardRequest {
        self.state.clear_round();
        self.state.phase = Phase::LoadingBoard;
        let request = BoardRequest {
            category: self.state.options.category().clone(),
            round: self.state.round + 1,
        };
        info!(
            category = %request.category,
            mode = %self.state.options.mode(),
            round = request.round,
            "Loading board"
        );
        request
    }

    fn abort_round(&mut self) {
        self.state.clear_round();
        self.state.phase = Phase::Setup;
        info!("Round aborted, back to setup");
    }

    /// Steps 1–5 of round start: every draw, nothing committed.
    fn draw_round(&mut self, items: Vec<BoardItem>) -> Result<RoundDraw, GameError> {
        let board = Board::from_items(items, &mut self.rng)
            .map_err(|e| GameError::BoardUnavailable(e.to_string()))?;

        let secret = random::pick(board.items(), &mut self.rng)
            .cloned()
            .ok_or_else(|| GameError::InvariantViolation("empty board".to_string()))?;

        let roster = self.state.players.len();
        let chameleon_index = random::pick_index(roster, &mut self.rng)
            .ok_or_else(|| GameError::InvariantViolation("empty roster".to_string()))?;

        let impostor = match self.state.options.mode() {
            GameMode::Classic => None,
            GameMode::Impostor => {
                let decoys: Vec<&BoardItem> = board
                    .items()
                    .iter()
                    .filter(|item| item.name() != secret.name())
                    .collect();
                let decoy = random::pick(&decoys, &mut self.rng)
                    .map(|item| (*item).clone())
                    .ok_or_else(|| GameError::InvariantViolation("no decoy".to_string()))?;
                Some(decoy)
            }
        };

        let starter_index = random::pick_index(roster, &mut self.rng)
            .ok_or_else(|| GameError::InvariantViolation("empty roster".to_string()))?;

        Ok(RoundDraw {
            board,
            secret,
            chameleon_index,
            impostor,
            starter_index,
        })
    }

    /// Step 6: write every round field in one go.
    pub(crate) fn commit_round(&mut self, draw: RoundDraw) {
        for (index, player) in self.state.players.iter_mut().enumerate() {
            player.set_chameleon(index == draw.chameleon_index);
        }
        self.state.starter_player_id = Some(*self.state.players[draw.starter_index].id());
        self.state.board = Some(draw.board);
        self.state.secret_item = Some(draw.secret);
        self.state.impostor_item = draw.impostor;
        self.state.current_player_index = 0;
        self.state.outcome = None;
        self.state.round += 1;
        self.state.phase = Phase::RevealInterstitial;
        info!(
            round = self.state.round,
            players = self.state.players.len(),
            "Roles assigned, reveal begins"
        );
    }

    fn finish_round(&mut self, outcome: Outcome) {
        self.state.outcome = Some(outcome);
        self.state.phase = Phase::GameOver;
        // Hidden information may be logged once the round is over.
        info!(
            round = self.state.round,
            outcome = %outcome,
            chameleon = ?self.state.chameleon().map(|p| p.name()),
            secret = ?self.state.secret_item.as_ref().map(|i| i.name()),
            "Round over"
        );
    }
}
