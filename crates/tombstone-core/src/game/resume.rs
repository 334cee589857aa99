//! Resume-or-new-game decision made when the game page is shown.
//!
//! The navigation layer passes optional parameters. Only `GameState=Resume`
//! means the player is continuing; anything else starts a new game. The
//! score line always shows whatever the current game state holds.

use std::collections::HashMap;

use strum::{Display, EnumString, IntoStaticStr};
use tracing::debug;

use super::context::GameContext;
use crate::settings::SettingsBackend;

/// Navigation parameter carrying the resume intent
pub const GAME_STATE_PARAM: &str = "GameState";

pub const RESUME_TEXT: &str = "Game state: resuming an existing game.";
pub const NEW_GAME_TEXT: &str = "Game state: starting a new game.";

/// Optional string parameters supplied when a page is entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    params: HashMap<String, String>,
}

impl NavigationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string such as `GameState=Resume&level=2`.
    ///
    /// A leading `?` is ignored and a key without `=` maps to an empty value.
    /// Later duplicates win.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for NavigationParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// Whether the game page continues a game or starts one
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, Display)]
pub enum ResumeMode {
    Resume,
    NewGame,
}

impl ResumeMode {
    /// `Resume` only for an exact `GameState=Resume`
    pub fn from_params(params: &NavigationParams) -> Self {
        match params.get(GAME_STATE_PARAM) {
            Some("Resume") => Self::Resume,
            _ => Self::NewGame,
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            Self::Resume => RESUME_TEXT,
            Self::NewGame => NEW_GAME_TEXT,
        }
    }

    /// Parameters that navigate to the game page with this intent
    pub fn to_params(self) -> NavigationParams {
        let value: &'static str = self.into();
        NavigationParams::new().with(GAME_STATE_PARAM, value)
    }
}

/// What the game page shows after navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePageView {
    pub mode: ResumeMode,
    pub status_text: &'static str,
    pub score_text: String,
}

/// Build the game page view for the given navigation parameters.
///
/// Creates the game state if none exists yet. Never resets it: starting a
/// fresh game is the caller's job.
pub fn on_navigated_to<B: SettingsBackend>(
    ctx: &mut GameContext<B>,
    params: &NavigationParams,
) -> GamePageView {
    let mode = ResumeMode::from_params(params);
    let score = ctx.game_state().score;
    debug!("Game page shown: mode={}, score={}", mode, score);

    GamePageView {
        mode,
        status_text: mode.status_text(),
        score_text: format!("Score: {}", score),
    }
}
