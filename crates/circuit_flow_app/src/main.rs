// SPDX-License-Identifier: MIT OR Apache-2.0
//! Circuit Flow - a 3D rotating-wire circuit puzzle
//!
//! Terminal front-end for the connectivity engine:
//! - Built-in or external level catalogs
//! - Interactive play or scripted runs
//! - Text or JSON board output
//!
//! Logs go to stderr so that the board on stdout stays machine-readable.

mod commands;
mod render;
mod session;
mod settings;

use anyhow::Context;
use circuit_flow_graph::{LevelCatalog, PuzzleController};
use clap::Parser;
use session::Session;
use settings::{GameSettings, SETTINGS_FILE_NAME};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "circuit_flow", version, about = "Rotate wires until current flows")]
struct Cli {
    /// Settings file
    #[arg(long, default_value = SETTINGS_FILE_NAME)]
    settings: PathBuf,

    /// Level to start on (overrides the settings file)
    #[arg(long)]
    level: Option<u32>,

    /// Level catalog (.ron or .json) replacing the built-in levels
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print every board as a JSON line
    #[arg(long)]
    json: bool,

    /// Write the effective settings to the settings file before playing
    #[arg(long)]
    save_settings: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file = GameSettings::load_or_default(&cli.settings)
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;

    init_tracing(&file.log_filter);
    tracing::info!("Starting Circuit Flow v{}", env!("CARGO_PKG_VERSION"));

    let (controller, settings) = prepare(&cli, file)?;
    let mut session = Session::new(controller, settings, cli.json);

    let mut stdout = io::stdout().lock();
    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), &mut stdout)?
        }
        None => session.run(io::stdin().lock(), &mut stdout)?,
    };

    tracing::debug!(?summary, level = session.controller().level(), "Exiting");
    Ok(())
}

/// Settings after applying command line overrides to the file's values
fn effective_settings(cli: &Cli, file: GameSettings) -> GameSettings {
    GameSettings {
        start_level: cli.level.unwrap_or(file.start_level),
        catalog: cli.catalog.clone().or(file.catalog),
        ..file
    }
}

/// Resolve settings, load the catalog and start the level.
///
/// Settings are only written back once the start level has been accepted.
fn prepare(cli: &Cli, file: GameSettings) -> anyhow::Result<(PuzzleController, GameSettings)> {
    let settings = effective_settings(cli, file);

    let catalog = match &settings.catalog {
        Some(path) => LevelCatalog::load(path)
            .with_context(|| format!("Failed to load level catalog {}", path.display()))?,
        None => LevelCatalog::builtin().context("Built-in level catalog is invalid")?,
    };
    let controller = PuzzleController::with_level(catalog, settings.start_level)?;

    if cli.save_settings {
        settings
            .save(&cli.settings)
            .with_context(|| format!("Failed to save settings to {}", cli.settings.display()))?;
        tracing::info!("Saved settings to {}", cli.settings.display());
    }

    Ok((controller, settings))
}

fn init_tracing(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
