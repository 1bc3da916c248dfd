//! Garden CLI Application
//!
//! Command-line interface for the garden plant-care tracker.

mod args;
mod cli;
mod images;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use garden_core::GardenStoreBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        settings_file,
        no_color,
        command,
    } = Args::parse();

    let store = GardenStoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .context("Failed to initialize garden store")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(store, settings_file, renderer);

    info!("Garden started");

    match command {
        Some(Plant { command }) => cli.handle_plant_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Settings { command }) => cli.handle_settings_command(command),
        Some(Assist { command }) => cli.handle_assist_command(command).await,
        None => cli.list_plants().await,
    }
}
