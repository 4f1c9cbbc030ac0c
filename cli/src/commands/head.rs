use color_eyre::eyre::Result;

use modele_bootstrap::script::{self, ScriptOptions};
use modele_theme::{cached_root_css, CACHE_KEY, CACHE_VERSION};

use crate::config::UserConfig;

pub fn run(nonce: Option<String>, script_only: bool) -> Result<()> {
    let config = UserConfig::load();
    let options = ScriptOptions {
        cache_key: CACHE_KEY.to_string(),
        cache_version: CACHE_VERSION.to_string(),
        expiry_ms: i64::try_from(config.cache_expiry().as_millis()).unwrap_or(i64::MAX),
        nonce,
    };

    if script_only {
        println!("{}", script::render(&options));
        return Ok(());
    }

    let style = cached_root_css(&config.theme_cache());
    println!("{}", render_head(style.as_deref(), &options));
    Ok(())
}

/// Cached styles (when usable) followed by the bootstrap script tag.
pub fn render_head(style: Option<&str>, options: &ScriptOptions) -> String {
    let mut head = String::new();
    if let Some(css) = style {
        head.push_str("<style id=\"modele-theme\">\n");
        head.push_str(&css.replace("</", "<\\/"));
        head.push_str("\n</style>\n");
    }
    head.push_str(&script::inline_tag(options));
    head
}
