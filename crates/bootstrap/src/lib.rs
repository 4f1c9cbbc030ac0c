//! Pre-paint theme bootstrap.
//!
//! Reads the cached theme entry straight from storage and writes the CSS
//! custom properties before the application mounts, so the first frame
//! already has the right colors. Everything needed (cache validation, color
//! math, variable mapping) lives in this crate; it shares no code with
//! `modele-theme`.
//!
//! Any failure is silent: the caller keeps its default colors and the
//! application's own theme provider repaints later.
//!
//! [`script`] renders the same logic as a JavaScript snippet for the document
//! head, where no module system exists yet.

use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

mod apply;
pub mod palette;
pub mod script;

pub use apply::apply_cached_config;

/// Storage key read on startup.
pub const CACHE_KEY: &str = "modele_theme_cache";
/// Only entries carrying exactly this version are used.
pub const CACHE_VERSION: &str = "1.0.0";
/// Entries older than this are ignored.
pub const CACHE_EXPIRY_MS: i64 = 5 * 60 * 1000;

/// Validate the stored entry and apply it through `set_variable`.
///
/// `raw` is the stored text for [`CACHE_KEY`], if any. Returns `true` when a
/// theme was applied. Never panics.
pub fn run(raw: Option<&str>, now_ms: i64, set_variable: &mut dyn FnMut(&str, &str)) -> bool {
    let Some(config) = raw.and_then(|raw| usable_config(raw, now_ms)) else {
        return false;
    };

    panic::catch_unwind(AssertUnwindSafe(|| apply_cached_config(&config, set_variable))).is_ok()
}

/// The `config` object of a stored entry, or `None` if the entry is
/// unparseable, from another schema version, or expired.
pub fn usable_config(raw: &str, now_ms: i64) -> Option<Value> {
    let mut entry: Value = serde_json::from_str(raw).ok()?;

    if entry.get("version")?.as_str()? != CACHE_VERSION {
        return None;
    }
    let timestamp = entry.get("timestamp")?.as_f64()?;
    if now_ms as f64 - timestamp > CACHE_EXPIRY_MS as f64 {
        return None;
    }

    match entry.get_mut("config")?.take() {
        config @ Value::Object(_) => Some(config),
        _ => None,
    }
}
