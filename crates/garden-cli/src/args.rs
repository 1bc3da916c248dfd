use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AssistCommands, PlantCommands, SettingsCommands, TaskCommands};

/// Keep track of your plants, their photos and their seasonal care tasks
///
/// Records live in a local SQLite database. The optional assistant uses the
/// OpenAI chat-completions API with the key stored via `garden settings`.
#[derive(Parser)]
#[command(version, about, name = "garden")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/garden/garden.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the settings file. Defaults to
    /// $XDG_CONFIG_HOME/garden/settings.json
    #[arg(long, global = true)]
    pub settings_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the garden CLI
///
/// Without a command, `garden` lists all plants.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plants and their photos
    #[command(alias = "p")]
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Manage care tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show or change settings such as the OpenAI API key
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Ask the gardening assistant
    #[command(alias = "a")]
    Assist {
        #[command(subcommand)]
        command: AssistCommands,
    },
}
