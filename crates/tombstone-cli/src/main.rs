mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tombstone_core::TombstoneConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tombstone=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = TombstoneConfig::builder();
    if let Some(path) = args.settings {
        builder = builder.settings_path(path);
    }
    let config = builder.build();
    debug!("Using settings file {}", config.settings_path.display());

    match args.command {
        Command::Set { name, value, kind } => commands::settings::set(&config, &name, &value, kind),
        Command::Get {
            name,
            kind,
            default,
        } => commands::settings::get(&config, &name, kind, default.as_deref()),
        Command::Delete { name } => commands::settings::delete(&config, &name),
        Command::Clear => commands::settings::clear(&config),
        Command::List { json } => commands::settings::list(&config, json),
        Command::Apply { assignments } => commands::settings::apply(&config, &assignments),
        Command::Play {
            resume,
            new,
            points,
        } => commands::play::play(&config, commands::play::requested_mode(resume, new), points),
        Command::End { qualify_at } => commands::play::end(&config, qualify_at),
        Command::Status => commands::play::status(&config),
    }
}
