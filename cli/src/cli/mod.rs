mod cache;

pub use cache::CacheCommands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the shade ramp derived from a base color
    #[command(alias = "ramp")]
    Shades {
        /// Base color (#rgb or #rrggbb)
        color: String,

        /// Output JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Resolve a theme JSON file (or - for stdin) into CSS variables
    Apply {
        /// Path to a backend theme payload, or - for stdin
        file: PathBuf,

        /// Also write the resolved config to the theme cache
        #[arg(short, long)]
        cache: bool,
    },

    /// Fetch the active theme from the backend, apply it and refresh the cache
    #[command(alias = "f")]
    Fetch {
        /// Theme endpoint (overrides api_url from config)
        #[arg(short, long)]
        url: Option<String>,

        /// Print the resolved :root block
        #[arg(short, long)]
        print: bool,
    },

    /// Render the <head> snippet: cached :root styles plus the inline bootstrap script
    Head {
        /// CSP nonce for the <script> tag
        #[arg(long)]
        nonce: Option<String>,

        /// Print only the bare JavaScript
        #[arg(long)]
        script_only: bool,
    },

    /// Inspect or clear the theme cache
    Cache {
        #[command(subcommand)]
        command: Option<CacheCommands>,
    },

    /// Show or edit the configuration file
    Config {
        #[arg(long)]
        path: bool,

        #[arg(long)]
        reset: bool,

        #[arg(short, long)]
        edit: bool,
    },

    /// Show the most recent log file
    Logs {
        #[arg(short, long, default_value_t = 50)]
        lines: usize,

        #[arg(short, long)]
        follow: bool,
    },
}

/// Theme color pipeline for the Modele site.
///
/// Derives shade ramps from base colors, resolves backend theme payloads into
/// CSS custom properties, and maintains the theme cache read before first paint.
#[derive(Debug, Parser)]
#[command(name = "modele-theme", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true)]
    pub log_level: Option<String>,
}
