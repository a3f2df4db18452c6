//! Game configuration loaded from TOML.

use std::path::{Path, PathBuf};

use chameleon_core::{GameMode, MIX_CATEGORY, ResolutionStyle, RoundOptions};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CLASH_CHAMELEON_CONFIG";

/// Config file used when neither the CLI nor the environment names one.
pub const DEFAULT_CONFIG_FILE: &str = "clash_chameleon.toml";

/// Categories offered in the setup screen.
pub const CATEGORIES: [&str; 6] = [
    MIX_CATEGORY,
    "Win Conditions",
    "Spells",
    "Swarms",
    "Tanks",
    "Air Troops",
];

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board category requested from the provider.
    #[serde(default = "default_category")]
    category: String,

    /// Classic or impostor.
    #[serde(default)]
    mode: GameMode,

    /// Hide the board while playing.
    #[serde(default)]
    hide_board: bool,

    /// How the vote resolves. Follows the mode when unset.
    #[serde(default)]
    resolution: Option<ResolutionStyle>,

    /// Path to the card catalog.
    #[serde(default)]
    catalog: Option<PathBuf>,

    /// Seed for reproducible rounds.
    #[serde(default)]
    seed: Option<u64>,

    /// Log file used by the terminal UI.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_category() -> String {
    MIX_CATEGORY.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("clash_chameleon.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            mode: GameMode::default(),
            hide_board: false,
            resolution: None,
            catalog: None,
            seed: None,
            log_file: default_log_file(),
        }
    }
}

/// Values from the command line that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Category override.
    pub category: Option<String>,
    /// Mode override.
    pub mode: Option<GameMode>,
    /// Forces the board hidden when set.
    pub hide_board: bool,
    /// Resolution override.
    pub resolution: Option<ResolutionStyle>,
    /// Catalog override.
    pub catalog: Option<PathBuf>,
    /// Seed override.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(category = %config.category, mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config file and loads it.
    ///
    /// An explicit path must exist. Otherwise [`CONFIG_ENV`] and then
    /// [`DEFAULT_CONFIG_FILE`] are tried, falling back to defaults when
    /// neither file exists.
    #[instrument]
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if path.exists() {
            Self::from_file(&path)
        } else {
            info!(path = %path.display(), "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(category) = overrides.category {
            self.category = category;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if overrides.hide_board {
            self.hide_board = true;
        }
        if overrides.resolution.is_some() {
            self.resolution = overrides.resolution;
        }
        if overrides.catalog.is_some() {
            self.catalog = overrides.catalog;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self.validate()?;
        Ok(self)
    }

    /// Resolution in effect, explicit or derived from the mode.
    pub fn effective_resolution(&self) -> ResolutionStyle {
        self.resolution
            .unwrap_or_else(|| ResolutionStyle::default_for(self.mode))
    }

    /// Round options for the controller.
    pub fn round_options(&self) -> RoundOptions {
        RoundOptions::new(self.mode)
            .with_category(self.category.clone())
            .with_hide_board(self.hide_board)
            .with_resolution(self.effective_resolution())
    }

    /// Replaces the category.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Replaces the mode. An unset resolution follows the new mode.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    /// Flips board visibility.
    pub fn toggle_hide_board(&mut self) {
        self.hide_board = !self.hide_board;
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.category.trim().is_empty() {
            return Err(ConfigError::new("category must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
