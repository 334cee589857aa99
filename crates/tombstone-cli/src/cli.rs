use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tombstone")]
#[command(about = "Inspect and drive persisted game settings and state")]
pub struct Args {
    /// Settings file (defaults to the platform data directory)
    #[arg(short, long, global = true, env = "TOMBSTONE_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add or overwrite a setting
    Set {
        name: String,
        value: String,
        #[arg(short, long, value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },
    /// Print a setting, or the default when it is not set
    Get {
        name: String,
        #[arg(short, long, value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Remove a setting
    Delete { name: String },
    /// Remove every setting
    Clear,
    /// List all settings
    List {
        #[arg(long)]
        json: bool,
    },
    /// Store several `name=value` settings in order
    Apply {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Enter the game page, optionally scoring points, then save the game
    Play {
        /// Continue the saved game
        #[arg(long, conflicts_with = "new")]
        resume: bool,
        /// Start over even if a saved game is active
        #[arg(long)]
        new: bool,
        #[arg(short, long, default_value_t = 0)]
        points: i32,
    },
    /// End the saved game and report the next page
    End {
        /// Lowest score that enters the high-score table
        #[arg(long, default_value_t = 1000)]
        qualify_at: i32,
    },
    /// Show the saved game state
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Int,
    Float,
    Bool,
    Date,
}
