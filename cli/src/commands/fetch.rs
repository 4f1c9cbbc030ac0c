use std::time::Duration;

use color_eyre::eyre::{eyre, Result};
use serde_json::Value;

use modele_theme::{
    normalize_theme_config, CssVariables, HttpThemeSource, ThemeError, ThemeProvider, ThemeSource,
};

use crate::config::UserConfig;

pub fn run(url: Option<String>, print: bool) -> Result<()> {
    let config = UserConfig::load();
    let url = url.or_else(|| config.api_url.clone()).ok_or_else(|| {
        eyre!("No theme endpoint configured. Pass --url or set api_url in the config file.")
    })?;

    let source = HttpThemeSource::new(url)
        .with_token(config.api_token.clone())
        .with_timeout(config.fetch_timeout());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let page = runtime.block_on(refresh(&config, source))?;

    if print {
        println!("{}", page.to_css());
    }
    Ok(())
}

/// Paint from cache, then reconcile with the backend. A failed or slow fetch
/// keeps whatever the cache painted.
async fn refresh(config: &UserConfig, source: HttpThemeSource) -> Result<CssVariables> {
    let mut provider = ThemeProvider::new(config.theme_cache());
    let mut page = CssVariables::new();

    match provider.hydrate(&mut page) {
        Some(entry) => tracing::info!(timestamp = entry.timestamp, "painted from cache"),
        None => tracing::info!("no usable cache, waiting for backend"),
    }

    let raw = match fetch_with_deadline(source).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "theme fetch failed, cached colors kept");
            eprintln!("Theme fetch failed: {}", e);
            if provider.applied().is_some() {
                eprintln!("Cached theme left in place.");
            }
            return Err(e.into());
        }
    };

    let outcome = provider.reconcile(normalize_theme_config(&raw), &mut page)?;
    if outcome.changed {
        println!("Theme updated and cached.");
    } else {
        println!("Theme unchanged; cache refreshed.");
    }

    Ok(page)
}

async fn fetch_with_deadline(source: HttpThemeSource) -> std::result::Result<Value, ThemeError> {
    let deadline = source.timeout() + Duration::from_secs(1);
    let task = tokio::task::spawn_blocking(move || source.fetch());

    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(ThemeError::Network(join.to_string())),
        Err(_) => Err(ThemeError::Timeout(deadline)),
    }
}
