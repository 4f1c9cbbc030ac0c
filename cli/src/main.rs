mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    match cli.command {
        Commands::Shades { color, json } => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::shades::run(&color, json)
        }
        Commands::Apply { file, cache } => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::apply::run(&file, cache)
        }
        Commands::Fetch { url, print } => {
            let _guard = logging::init(config.log_level, LogMode::Both, log_level_override);
            commands::fetch::run(url, print)
        }
        Commands::Head { nonce, script_only } => {
            let _guard = logging::init(config.log_level, LogMode::File, log_level_override);
            commands::head::run(nonce, script_only)
        }
        Commands::Cache { command } => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::cache::run(command)
        }
        Commands::Config { path, reset, edit } => {
            let _guard = logging::init(config.log_level, LogMode::Stderr, log_level_override);
            commands::config::run(path, reset, edit)
        }
        Commands::Logs { lines, follow } => commands::logs::run(lines, follow),
    }
}
