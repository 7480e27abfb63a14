//! Command-line interface definitions for sectionmark

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the sectionmark application
#[derive(Parser, Debug)]
#[command(name = "sectionmark")]
#[command(version)]
#[command(about = "Parse markdown content into typed sections", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to sectionmark.toml beside the input)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for sectionmark
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse one markdown file and print the sections as JSON
    Parse {
        /// Markdown file, or `-` for standard input
        input: PathBuf,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,

        /// Emit a code block left open at end of input instead of dropping it
        #[arg(long)]
        flush_unterminated_code: bool,
    },

    /// Print the level-2 heading navigation of a markdown file as JSON
    Nav {
        /// Markdown file, or `-` for standard input
        input: PathBuf,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print word count, headings and section totals for a markdown file
    Stats {
        /// Markdown file, or `-` for standard input
        input: PathBuf,
    },

    /// Parse a content directory and write one JSON file per source
    Build {
        /// Content directory (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "sections")]
        output: PathBuf,
    },

    /// Write a default sectionmark.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}
