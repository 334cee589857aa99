use strum::{Display, IntoStaticStr};
use tracing::debug;

use super::state::GameState;
use crate::settings::{SettingsBackend, SettingsStore};

/// Where the current game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, Display)]
pub enum SessionPhase {
    /// No game state has been created yet
    #[strum(serialize = "absent")]
    Absent,
    #[strum(serialize = "active")]
    Active,
    /// State exists but no game is running (not started yet, or finished)
    #[strum(serialize = "ended")]
    Ended,
}

/// Everything a running application needs to survive a suspend/resume.
///
/// Owns the settings store and at most one [`GameState`], created on first
/// access and kept until explicitly replaced. Pass it to whatever needs the
/// current game instead of reaching for a global.
#[derive(Debug)]
pub struct GameContext<B> {
    settings: SettingsStore<B>,
    game_state: Option<GameState>,
}

impl<B: SettingsBackend> GameContext<B> {
    pub fn new(settings: SettingsStore<B>) -> Self {
        Self {
            settings,
            game_state: None,
        }
    }

    pub fn with_backend(backend: B) -> Self {
        Self::new(SettingsStore::new(backend))
    }

    /// The current game state, created with defaults on first use.
    ///
    /// Always the same instance until [`replace_game_state`](Self::replace_game_state).
    pub fn game_state(&mut self) -> &mut GameState {
        self.game_state.get_or_insert_with(|| {
            debug!("Creating game state");
            GameState::default()
        })
    }

    /// Overwrite the current game state
    pub fn replace_game_state(&mut self, state: GameState) {
        debug!(
            "Replacing game state (score={}, active={})",
            state.score, state.is_game_active
        );
        self.game_state = Some(state);
    }

    /// Replace the game state with a fresh, active one
    pub fn start_new_game(&mut self) -> &mut GameState {
        self.replace_game_state(GameState {
            is_game_active: true,
            ..GameState::default()
        });
        self.game_state()
    }

    pub fn has_game_state(&self) -> bool {
        self.game_state.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.game_state {
            None => SessionPhase::Absent,
            Some(state) if state.is_game_active => SessionPhase::Active,
            Some(_) => SessionPhase::Ended,
        }
    }

    pub fn settings(&self) -> &SettingsStore<B> {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore<B> {
        &mut self.settings
    }

    pub fn into_settings(self) -> SettingsStore<B> {
        self.settings
    }
}
