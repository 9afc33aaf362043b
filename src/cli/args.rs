//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Book catalog manager: read, append and delete book records in an XML file
#[derive(Parser, Debug)]
#[command(name = "bookcat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase tracing output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Catalog file (default: catalog_path from settings)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the catalog XML
    Show,

    /// List books, one per line
    List,

    /// Append a book and save
    Add {
        /// Book id (not checked for uniqueness)
        #[arg(long)]
        id: String,
        /// Title
        #[arg(long)]
        title: String,
        /// Author
        #[arg(long)]
        author: String,
        /// Publication year
        #[arg(long)]
        year: String,
    },

    /// Delete the first book with the given id and save
    Delete {
        /// Book id
        id: String,
    },

    /// Show titles grouped by year
    ByYear,

    /// Walk through show, add, delete and group on the catalog file
    Demo {
        /// Write the three-book sample catalog first if the file is missing
        #[arg(long)]
        seed: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create local config template (.bookcat.toml)
    Init {
        /// Create global config instead
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
