use color_eyre::eyre::Result;

use modele_theme::cache::now_millis;
use modele_theme::{CacheStatus, CachedThemeEntry, CACHE_KEY};

use crate::cli::CacheCommands;
use crate::config::UserConfig;

pub fn run(command: Option<CacheCommands>) -> Result<()> {
    let config = UserConfig::load();
    let mut cache = config.theme_cache();

    match command.unwrap_or(CacheCommands::Show { raw: false }) {
        CacheCommands::Show { raw: true } => match cache.raw() {
            Some(raw) => println!("{}", raw),
            None => println!("No cached theme."),
        },
        CacheCommands::Show { raw: false } => {
            let now = now_millis();
            let status = cache.inspect_at(now);
            println!("Status:  {}", status.label());
            match &status {
                CacheStatus::Fresh(entry) | CacheStatus::Expired(entry) => {
                    print_entry(entry, now, cache.expiry().as_millis());
                }
                CacheStatus::VersionMismatch { found } => {
                    println!("Version: {} (expected {})", found, modele_theme::CACHE_VERSION);
                }
                CacheStatus::Missing | CacheStatus::Corrupt => {}
            }
        }
        CacheCommands::Path => {
            println!("{}", cache.storage().path_for(CACHE_KEY).display());
        }
        CacheCommands::Clear => {
            cache.clear()?;
            tracing::info!("theme cache cleared");
            println!("Theme cache cleared.");
        }
    }

    Ok(())
}

fn print_entry(entry: &CachedThemeEntry, now: i64, expiry_ms: u128) {
    println!("Version: {}", entry.version);
    println!("Written: {}", entry.age_description(now));

    let age_ms = entry.age(now).as_millis();
    if age_ms <= expiry_ms {
        let remaining = std::time::Duration::from_millis((expiry_ms - age_ms) as u64);
        let remaining = std::time::Duration::from_secs(remaining.as_secs());
        println!("Expires: in {}", humantime::format_duration(remaining));
    }

    match serde_json::to_string_pretty(&entry.config) {
        Ok(json) => println!("Config:\n{}", json),
        Err(e) => tracing::warn!(error = %e, "could not render cached config"),
    }
}
