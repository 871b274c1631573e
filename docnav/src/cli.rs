//! Command-line interface definitions for docnav

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Kind of navigation source
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceFormat {
    /// Generated HTML documentation page
    Html,
    /// TOML outline of the documented API
    Outline,
}

/// CLI structure for the docnav application
#[derive(Parser)]
#[command(name = "docnav")]
#[command(version)]
#[command(about = "Sidebar navigation for generated API documentation", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for docnav
#[derive(Subcommand)]
pub enum Commands {
    /// Load a page and replay key presses against it
    Browse {
        /// HTML page or docnav.toml outline
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Source format (detected from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<SourceFormat>,

        /// Comma-separated keys to press (pgup, pgdn or key codes)
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the classes, member counts and navigation order of a page
    Inspect {
        /// HTML page or docnav.toml outline
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Source format (detected from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<SourceFormat>,
    },

    /// Check pages against the navigation contract
    Check {
        /// Page or directory of pages (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Show every issue instead of a count per page
        #[arg(short, long)]
        verbose: bool,
    },
}
