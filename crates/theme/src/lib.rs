//! Theme color pipeline.
//!
//! Base colors from the backend are expanded into HSL shade ramps, written to
//! CSS custom properties through a [`StyleSink`], and cached so the next page
//! load can paint before the backend answers.

mod applier;
pub mod cache;
pub mod color;
mod config;
mod error;
pub mod provider;
pub mod shades;
pub mod storage;

pub use applier::{apply_theme, resolve_variables, CssVariables, StyleSink};
pub use cache::{CacheStatus, CachedThemeEntry, ThemeCache, CACHE_EXPIRY, CACHE_KEY, CACHE_VERSION};
pub use color::{hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, Hsl, Rgb};
pub use config::{normalize_theme_config, ThemeConfig, Typography};
pub use error::{Result, ThemeError};
pub use provider::{HttpThemeSource, RefreshOutcome, ThemeProvider, ThemeSource};
pub use shades::{generate_color_shades, ShadeRamp, SHADE_KEYS};
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Apply the cached theme, if usable, and return the rendered `:root` block.
///
/// This is what a server places in `<head>` ahead of the inline bootstrap
/// script so clients without script still get the last known colors.
pub fn cached_root_css<S: Storage>(cache: &ThemeCache<S>) -> Option<String> {
    cache
        .read()
        .map(|entry| resolve_variables(&entry.config).to_css())
}
