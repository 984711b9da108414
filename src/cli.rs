use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Developer CLI for rendering lesson lists
#[derive(Parser)]
#[command(name = "lesson-accordion")]
#[command(about = "Render lesson accordions from JSON data files", long_about = None)]
pub struct Cli {
    /// Config file (TOML). Defaults to the per-user config if present.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the accordion markup for a lesson data file
    Render {
        /// Lesson data file (JSON list)
        data: PathBuf,
    },
    /// Mount the widget into a headless page and print the container HTML
    Mount {
        /// Page URL (http, https, file) or local path
        #[arg(short, long)]
        page: String,
        /// Data file name, as the container's source attribute would give it
        #[arg(short, long)]
        source: Option<String>,
        /// Leave icon placeholders as they are
        #[arg(long)]
        no_icons: bool,
    },
}
