//! Application state and key handling for the terminal UI.

use chameleon_core::{
    Action, BoardRequest, GameController, GameError, GameMode, Phase, PlayerId, ResolutionStyle,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tracing::{debug, info, instrument, warn};

use crate::config::{CATEGORIES, GameConfig};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Nothing beyond redrawing.
    Redraw,
    /// A board must be fetched before the round can start.
    LoadBoard(BoardRequest),
    /// Leave the application.
    Quit,
}

/// Intent decoded from a key press, before it reaches the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Forward an event to the controller.
    Game(Action),
    /// Start a round with the configured options.
    Start,
    /// Replay with the same table.
    PlayAgain,
    /// Add the typed name to the roster.
    SubmitName,
    /// Edit the name field.
    Type(char),
    /// Delete the last typed character.
    Backspace,
    /// Remove the highlighted player.
    RemoveSelected,
    /// Move the roster highlight.
    SelectPrevious,
    /// Move the roster highlight.
    SelectNext,
    /// Cycle the board category.
    NextCategory,
    /// Switch between classic and impostor.
    ToggleMode,
    /// Show or hide the board while playing.
    ToggleHideBoard,
    /// Open or close the rules overlay.
    ToggleRules,
    /// Leave the application.
    Quit,
}

/// Decodes a key press for the current phase.
///
/// Letters are free text in SETUP, so setup commands live on function keys.
#[instrument]
pub fn intent_for(phase: Phase, resolution: ResolutionStyle, key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }
    if key.code == KeyCode::F(1) {
        return Some(Intent::ToggleRules);
    }

    let intent = match (phase, key.code) {
        (Phase::Setup, KeyCode::Enter) => Intent::SubmitName,
        (Phase::Setup, KeyCode::Backspace) => Intent::Backspace,
        (Phase::Setup, KeyCode::Delete) => Intent::RemoveSelected,
        (Phase::Setup, KeyCode::Up) => Intent::SelectPrevious,
        (Phase::Setup, KeyCode::Down) => Intent::SelectNext,
        (Phase::Setup, KeyCode::Tab) => Intent::NextCategory,
        (Phase::Setup, KeyCode::F(2)) => Intent::ToggleMode,
        (Phase::Setup, KeyCode::F(3)) => Intent::ToggleHideBoard,
        (Phase::Setup, KeyCode::F(5)) => Intent::Start,
        (Phase::Setup, KeyCode::Esc) => Intent::Quit,
        (Phase::Setup, KeyCode::Char(c)) => Intent::Type(c),

        (Phase::LoadingBoard, KeyCode::Esc) => Intent::Game(Action::Reset),

        (Phase::RevealInterstitial, KeyCode::Enter | KeyCode::Char(' ')) => {
            Intent::Game(Action::Reveal)
        }
        (Phase::RevealInfo, KeyCode::Enter | KeyCode::Char(' ')) => {
            Intent::Game(Action::FinishReveal)
        }

        (Phase::Playing, KeyCode::Char('v')) => Intent::Game(Action::StartVoting),

        (Phase::Voting, KeyCode::Char('b')) => Intent::Game(Action::BackToBoard),
        (Phase::Voting, KeyCode::Char('c')) if resolution == ResolutionStyle::Accusation => {
            Intent::Game(Action::CastVote { caught: true })
        }
        (Phase::Voting, KeyCode::Char('e')) if resolution == ResolutionStyle::Accusation => {
            Intent::Game(Action::CastVote { caught: false })
        }
        (Phase::Voting, KeyCode::Char('r')) if resolution == ResolutionStyle::RevealOnly => {
            Intent::Game(Action::RevealChameleon)
        }

        (Phase::GameOver, KeyCode::Char('p')) => Intent::PlayAgain,
        (Phase::GameOver, KeyCode::Char('r')) => Intent::Game(Action::Reset),

        (_, KeyCode::Char('?')) => Intent::ToggleRules,
        (_, KeyCode::Char('q')) => Intent::Quit,
        (_, KeyCode::Char('x')) if phase != Phase::Setup => Intent::Game(Action::Reset),
        _ => return None,
    };
    Some(intent)
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    game: GameController,
    config: GameConfig,
    name_input: String,
    roster_state: ListState,
    status: String,
    show_rules: bool,
}

impl App {
    /// Creates the application with a fresh game.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Self {
        let game = match config.seed() {
            Some(seed) => GameController::seeded(*seed),
            None => GameController::new(),
        };
        Self {
            game,
            config,
            name_input: String::new(),
            roster_state: ListState::default(),
            status: "Add at least 3 players to start".to_string(),
            show_rules: false,
        }
    }

    /// The game controller.
    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Mutable access for the event loop's board fetch.
    pub fn game_mut(&mut self) -> &mut GameController {
        &mut self.game
    }

    /// Current settings.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Text typed into the name field.
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Roster highlight.
    pub fn roster_state(&self) -> ListState {
        self.roster_state.clone()
    }

    /// Message shown in the status bar.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the rules overlay is open.
    pub fn show_rules(&self) -> bool {
        self.show_rules
    }

    /// Seats players before the first round. Blank names are skipped.
    #[instrument(skip(self))]
    pub fn seat(&mut self, names: &[String]) {
        for name in names {
            if let Err(e) = self.game.add_player(name) {
                warn!(error = %e, "Skipping player from command line");
            }
        }
        self.refresh_setup_status();
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> AppEvent {
        let resolution = *self.game.state().options().resolution();
        let Some(intent) = intent_for(self.game.phase(), resolution, key) else {
            return AppEvent::Redraw;
        };
        if self.show_rules && intent != Intent::Quit {
            self.show_rules = false;
            return AppEvent::Redraw;
        }
        debug!(?intent, "Key decoded");
        self.handle_intent(intent)
    }

    /// Applies a decoded intent.
    #[instrument(skip(self))]
    pub fn handle_intent(&mut self, intent: Intent) -> AppEvent {
        match intent {
            Intent::Quit => return AppEvent::Quit,
            Intent::ToggleRules => self.show_rules = !self.show_rules,
            Intent::Type(c) => self.name_input.push(c),
            Intent::Backspace => {
                self.name_input.pop();
            }
            Intent::SubmitName => self.submit_name(),
            Intent::RemoveSelected => self.remove_selected(),
            Intent::SelectPrevious => self.move_selection(-1),
            Intent::SelectNext => self.move_selection(1),
            Intent::NextCategory => {
                let current = CATEGORIES
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(self.config.category()))
                    .unwrap_or(CATEGORIES.len() - 1);
                self.config
                    .set_category(CATEGORIES[(current + 1) % CATEGORIES.len()]);
            }
            Intent::ToggleMode => {
                let mode = match self.config.mode() {
                    GameMode::Classic => GameMode::Impostor,
                    GameMode::Impostor => GameMode::Classic,
                };
                self.config.set_mode(mode);
            }
            Intent::ToggleHideBoard => self.config.toggle_hide_board(),
            Intent::Start => {
                let result = self.game.start_game(self.config.round_options());
                return self.after_request(result);
            }
            Intent::PlayAgain => {
                let result = self.game.play_again();
                return self.after_request(result);
            }
            Intent::Game(action) => {
                if let Err(e) = self.game.apply(action) {
                    self.report(&e);
                } else {
                    self.status.clear();
                    if self.game.phase() == Phase::Setup {
                        self.refresh_setup_status();
                    }
                }
            }
        }
        AppEvent::Redraw
    }

    /// Records the result of a board fetch.
    pub fn board_loaded(&mut self, result: Result<Phase, GameError>) {
        match result {
            Ok(phase) => {
                info!(%phase, "Board ready");
                self.status.clear();
            }
            Err(e) => self.report(&e),
        }
    }

    fn after_request(&mut self, result: Result<BoardRequest, GameError>) -> AppEvent {
        match result {
            Ok(request) => {
                self.status = format!("Loading {} board...", request.category());
                AppEvent::LoadBoard(request)
            }
            Err(e) => {
                self.report(&e);
                AppEvent::Redraw
            }
        }
    }

    fn submit_name(&mut self) {
        let name = std::mem::take(&mut self.name_input);
        match self.game.add_player(&name) {
            Ok(_) => self.refresh_setup_status(),
            Err(e) => self.report(&e),
        }
    }

    fn remove_selected(&mut self) {
        let Some(id) = self.selected_player() else {
            return;
        };
        match self.game.remove_player(id) {
            Ok(player) => {
                self.status = format!("Removed {}", player.name());
                let len = self.game.state().players().len();
                if len == 0 {
                    self.roster_state.select(None);
                } else if self.roster_state.selected().is_some_and(|i| i >= len) {
                    self.roster_state.select(Some(len - 1));
                }
            }
            Err(e) => self.report(&e),
        }
    }

    fn selected_player(&self) -> Option<PlayerId> {
        let index = self.roster_state.selected()?;
        self.game.state().players().get(index).map(|p| *p.id())
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.game.state().players().len();
        if len == 0 {
            return;
        }
        let current = self.roster_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.roster_state.select(Some(next));
    }

    fn refresh_setup_status(&mut self) {
        let count = self.game.state().players().len();
        self.status = if count < chameleon_core::MIN_PLAYERS {
            format!(
                "{} player(s) seated, need {}",
                count,
                chameleon_core::MIN_PLAYERS
            )
        } else {
            format!("{} players seated, press F5 to start", count)
        };
    }

    fn report(&mut self, error: &GameError) {
        warn!(error = %error, "Event rejected");
        self.status = error.to_string();
    }
}
