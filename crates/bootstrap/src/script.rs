//! The head snippet served to browsers.
//!
//! The JavaScript in `assets/bootstrap.js` performs the same steps as
//! [`crate::run`] against `localStorage` and `document.documentElement`. It
//! has no imports and is wrapped in `try/catch`, so it can run synchronously
//! in `<head>` before any bundle loads and never blocks rendering.

use crate::{CACHE_EXPIRY_MS, CACHE_KEY, CACHE_VERSION};

const TEMPLATE: &str = include_str!("../assets/bootstrap.js");

#[derive(Debug, Clone)]
pub struct ScriptOptions {
    pub cache_key: String,
    pub cache_version: String,
    pub expiry_ms: i64,
    /// CSP nonce added to the `<script>` tag.
    pub nonce: Option<String>,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            cache_key: CACHE_KEY.to_string(),
            cache_version: CACHE_VERSION.to_string(),
            expiry_ms: CACHE_EXPIRY_MS,
            nonce: None,
        }
    }
}

/// The bootstrap JavaScript with constants filled in.
pub fn render(options: &ScriptOptions) -> String {
    TEMPLATE
        .replace("__CACHE_KEY__", &js_string(&options.cache_key))
        .replace("__CACHE_VERSION__", &js_string(&options.cache_version))
        .replace("__CACHE_EXPIRY_MS__", &options.expiry_ms.max(0).to_string())
        .replace("</", "<\\/")
}

/// `render` wrapped in a `<script>` element for direct inclusion in `<head>`.
pub fn inline_tag(options: &ScriptOptions) -> String {
    let nonce = options
        .nonce
        .as_deref()
        .map(|n| format!(" nonce=\"{}\"", escape_attr(n)))
        .unwrap_or_default();
    format!("<script{}>{}</script>", nonce, render(options))
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
