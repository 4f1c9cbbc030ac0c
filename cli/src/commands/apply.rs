use std::io::Read;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use serde_json::Value;

use modele_theme::provider::unwrap_envelope;
use modele_theme::{normalize_theme_config, resolve_variables, ThemeConfig};

use crate::config::UserConfig;

pub fn run(file: &Path, cache: bool) -> Result<()> {
    let content = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)
            .wrap_err_with(|| format!("Failed to read {}", file.display()))?
    };

    let config = parse_payload(&content)?;
    tracing::debug!(?config, "normalized theme payload");

    if cache {
        let mut theme_cache = UserConfig::load().theme_cache();
        theme_cache.write(&config)?;
        tracing::info!("theme cache updated from {}", file.display());
    }

    println!("{}", resolve_variables(&config).to_css());
    Ok(())
}

pub fn parse_payload(content: &str) -> Result<ThemeConfig> {
    let raw: Value = serde_json::from_str(content).wrap_err("Theme payload is not valid JSON")?;
    Ok(normalize_theme_config(&unwrap_envelope(raw)))
}
