use color_eyre::eyre::{eyre, Result};

use crate::config::{config_path, UserConfig};

pub fn run(path: bool, reset: bool, edit: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
    } else if reset {
        UserConfig::reset(&config_file)?;
        println!("Config reset to defaults at: {}", config_file.display());
    } else if edit {
        if UserConfig::ensure_file(&config_file)? {
            tracing::info!(path = %config_file.display(), "created default config");
        }
        let editor = editor();
        let status = std::process::Command::new(&editor)
            .arg(&config_file)
            .status()?;
        if !status.success() {
            return Err(eyre!("{} exited with {}", editor, status));
        }
        // Warns on invalid TOML.
        let _ = UserConfig::load_from(&config_file);
    } else {
        println!("Config file: {}", config_file.display());
        println!();
        println!("{}", toml::to_string_pretty(&UserConfig::load().redacted())?);
    }

    Ok(())
}

fn editor() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| "nano".to_string())
}
