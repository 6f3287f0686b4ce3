//! Command-line interface definitions for webdocs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the webdocs application
#[derive(Parser)]
#[command(name = "webdocs")]
#[command(version)]
#[command(about = "Search and browse a community documentation site", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for webdocs
#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter documentation site
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Site title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Search the documentation
    Search {
        /// Free-text query (matched case-insensitively)
        query: String,

        /// Site directory (defaults to current directory)
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        site: PathBuf,

        /// Display language (defaults to the site's base language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the section a documentation path points at
    Open {
        /// Path such as /docs/javascript#closures
        path: String,

        /// Site directory (defaults to current directory)
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        site: PathBuf,

        /// Display language (defaults to the site's base language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Section index to use when the anchor does not match
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// List categories and section anchors
    List {
        /// Site directory (defaults to current directory)
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        site: PathBuf,

        /// Display language (defaults to the site's base language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Look up an interface string by dotted key
    Translate {
        /// Dotted key such as home.searchPlaceholder
        key: String,

        /// Site directory (defaults to current directory)
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        site: PathBuf,

        /// Display language (defaults to the site's base language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Check content for anchor collisions and missing translations
    Check {
        /// Site directory (defaults to current directory)
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        site: PathBuf,
    },
}
