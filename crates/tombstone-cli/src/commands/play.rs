//! Game commands: play, end and status.
//!
//! Each invocation is a separate process, so the game state is written to
//! the settings file on the way out and read back on the way in. That is
//! the suspend/resume cycle a real host forces on the game.

use anyhow::{Context, Result};
use tombstone_core::{
    FileBackend, GameContext, GameState, ResumeMode, SettingsBackend, SettingsStore,
    TombstoneConfig, end_game, on_navigated_to,
};
use tracing::{debug, info, warn};

/// Setting holding the tombstoned score
pub const SCORE_SETTING: &str = "Score";
/// Setting holding the tombstoned active flag
pub const ACTIVE_SETTING: &str = "IsGameActive";

/// Write the current game state into the settings
pub fn save_game_state<B: SettingsBackend>(ctx: &mut GameContext<B>) -> Result<()> {
    let state = ctx.game_state().clone();
    let settings = ctx.settings_mut();
    settings.set_value(SCORE_SETTING, state.score)?;
    settings.set_value(ACTIVE_SETTING, state.is_game_active)?;
    debug!(
        "Saved game state (score={}, active={})",
        state.score, state.is_game_active
    );
    Ok(())
}

/// Read a tombstoned game state; defaults when nothing was saved
pub fn load_game_state<B: SettingsBackend>(settings: &SettingsStore<B>) -> Result<GameState> {
    Ok(GameState {
        score: settings.get_value(SCORE_SETTING, 0)?,
        is_game_active: settings.get_value(ACTIVE_SETTING, false)?,
    })
}

/// Put the tombstoned game state back into the context
pub fn restore_game_state<B: SettingsBackend>(ctx: &mut GameContext<B>) -> Result<()> {
    let state = load_game_state(ctx.settings())?;
    ctx.replace_game_state(state);
    Ok(())
}

/// Explicit flags win; `None` leaves the choice to [`resolve_mode`]
pub fn requested_mode(resume: bool, new: bool) -> Option<ResumeMode> {
    if resume {
        Some(ResumeMode::Resume)
    } else if new {
        Some(ResumeMode::NewGame)
    } else {
        None
    }
}

/// Resume when asked to, or on launch when a saved game is still active
pub fn resolve_mode<B: SettingsBackend>(
    config: &TombstoneConfig,
    settings: &SettingsStore<B>,
    requested: Option<ResumeMode>,
) -> Result<ResumeMode> {
    if let Some(mode) = requested {
        return Ok(mode);
    }
    let active = settings.get_value(ACTIVE_SETTING, false)?;
    if config.resume_on_launch && active {
        Ok(ResumeMode::Resume)
    } else {
        Ok(ResumeMode::NewGame)
    }
}

/// Enter the game page, score `points`, and tombstone the result.
///
/// Returns the lines shown to the player.
pub fn play_in<B: SettingsBackend>(
    config: &TombstoneConfig,
    ctx: &mut GameContext<B>,
    requested: Option<ResumeMode>,
    points: i32,
) -> Result<Vec<String>> {
    let mode = resolve_mode(config, ctx.settings(), requested)?;
    match mode {
        ResumeMode::Resume => {
            restore_game_state(ctx)?;
            if !ctx.game_state().is_game_active {
                warn!("Resuming a game that had already ended");
            }
        }
        ResumeMode::NewGame => {
            ctx.start_new_game();
        }
    }

    let view = on_navigated_to(ctx, &mode.to_params());
    let mut lines = vec![view.status_text.to_string(), view.score_text];

    if points != 0 {
        let state = ctx.game_state();
        state.is_game_active = true;
        state.add_score(points);
        lines.push(format!("Scored {} points, score now {}", points, state.score));
    }

    save_game_state(ctx)?;
    Ok(lines)
}

/// End the tombstoned game and report the next page
pub fn end_in<B: SettingsBackend>(
    ctx: &mut GameContext<B>,
    qualify_at: i32,
) -> Result<Vec<String>> {
    restore_game_state(ctx)?;
    let target = end_game(ctx, &|score: i32| score >= qualify_at);
    let score = ctx.game_state().score;
    save_game_state(ctx)?;

    Ok(vec![
        format!("Final score: {}", score),
        format!("Next page: {}", target),
    ])
}

fn open(config: &TombstoneConfig) -> Result<GameContext<FileBackend>> {
    config.open_context().with_context(|| {
        format!(
            "Failed to open settings file {}",
            config.settings_path.display()
        )
    })
}

pub fn play(config: &TombstoneConfig, requested: Option<ResumeMode>, points: i32) -> Result<()> {
    let mut ctx = open(config)?;
    for line in play_in(config, &mut ctx, requested, points)? {
        println!("{}", line);
    }
    Ok(())
}

pub fn end(config: &TombstoneConfig, qualify_at: i32) -> Result<()> {
    let mut ctx = open(config)?;
    for line in end_in(&mut ctx, qualify_at)? {
        println!("{}", line);
    }
    info!("Game state saved to {}", config.settings_path.display());
    Ok(())
}

pub fn status(config: &TombstoneConfig) -> Result<()> {
    let ctx = open(config)?;
    let state = load_game_state(ctx.settings())?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
