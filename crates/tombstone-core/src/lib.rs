//! # tombstone-core
//!
//! Persistence for a game that the host can suspend and kill at any time.
//!
//! This crate provides:
//! - A typed, case-insensitive settings store with default fallback
//! - In-memory and JSON file backends for that store
//! - The per-application game state and its lazily created accessor
//! - The resume-or-new-game decision made when the game page is shown

pub mod config;
pub mod error;
pub mod game;
pub mod settings;

pub use config::{TombstoneConfig, TombstoneConfigBuilder, default_settings_path};
pub use error::{Error, Result};
pub use game::{
    GAME_STATE_PARAM, GameContext, GamePageView, GameState, HighScoreQualifier, NEW_GAME_TEXT,
    NavigationParams, RESUME_TEXT, ResumeMode, SessionPhase, TargetPage, end_game,
    on_navigated_to,
};
pub use settings::{
    FileBackend, FromSetting, MemoryBackend, SettingsBackend, SettingsItem, SettingsStore,
    TIMESTAMP_FORMAT, ToSetting, ValueHolder, normalize_name,
};
