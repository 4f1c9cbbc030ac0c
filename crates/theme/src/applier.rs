//! Mapping a `ThemeConfig` onto CSS custom properties.
//!
//! The variable names written here are a public contract: stylesheets and
//! the Tailwind config bind to them directly.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::color::hex_to_rgb;
use crate::config::ThemeConfig;
use crate::shades::{generate_color_shades, ShadeRamp};

/// Destination for CSS custom properties (the document root in a browser).
pub trait StyleSink {
    fn set_variable(&mut self, name: &str, value: &str);
}

impl<S: StyleSink + ?Sized> StyleSink for &mut S {
    fn set_variable(&mut self, name: &str, value: &str) {
        (**self).set_variable(name, value);
    }
}

/// Ordered in-memory variable set that renders as a `:root` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssVariables {
    vars: BTreeMap<String, String>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.vars
    }

    /// Render as `:root { --name: value; ... }`.
    ///
    /// Declarations whose value could end the declaration, the block or the
    /// enclosing `<style>` element are left out.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.vars {
            if !is_inert_css_value(value) {
                tracing::warn!(name = %name, "dropping unsafe value from stylesheet");
                continue;
            }
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push('}');
        css
    }
}

impl StyleSink for CssVariables {
    fn set_variable(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

const FONT_FALLBACK: &str = ", sans-serif";

/// Aliases rewritten on every apply. Values are `var()` references so they
/// follow whichever config last wrote the referenced group.
const DERIVED_ALIASES: [(&str, &str); 12] = [
    ("--color-status-todo", "var(--color-primary-500)"),
    ("--color-status-in-progress", "var(--color-warning-500)"),
    ("--color-status-done", "var(--color-secondary-500)"),
    ("--color-status-error", "var(--color-danger-500)"),
    ("--color-chart-default", "var(--color-primary-500)"),
    ("--color-chart-success", "var(--color-success-500)"),
    ("--color-chart-warning", "var(--color-warning-500)"),
    ("--color-chart-danger", "var(--color-danger-500)"),
    ("--color-text-link", "var(--color-primary-500)"),
    ("--color-text-link-rgb", "var(--color-primary-rgb)"),
    ("--color-error", "var(--color-danger-500)"),
    ("--color-success", "var(--color-secondary-500)"),
];

/// Write every variable group present in `config` to `sink`.
///
/// Absent or malformed groups are skipped; nothing is ever written empty.
pub fn apply_theme(config: &ThemeConfig, sink: &mut dyn StyleSink) {
    let palettes = [
        ("primary", config.primary_color.as_deref()),
        ("secondary", config.secondary_color.as_deref()),
        ("danger", config.danger_color.as_deref()),
        ("warning", config.warning_color.as_deref()),
        ("info", config.info_color.as_deref()),
        ("success", config.success_color.as_deref()),
    ];

    for (group, hex) in palettes {
        let Some(hex) = present(hex) else {
            continue;
        };
        let ramp = generate_color_shades(hex);
        if ramp.is_empty() {
            tracing::debug!(group, hex, "skipping malformed color");
            continue;
        }

        write_ramp(sink, group, &ramp);
        match group {
            "danger" => write_ramp(sink, "error", &ramp),
            "secondary" if present(config.success_color.as_deref()).is_none() => {
                write_ramp(sink, "success", &ramp)
            }
            _ => {}
        }
    }

    let raw = [
        ("--color-background", config.background_color.as_deref()),
        ("--color-foreground", config.foreground_color.as_deref()),
        ("--color-muted", config.muted_color.as_deref()),
        ("--color-muted-foreground", config.muted_foreground_color.as_deref()),
        ("--color-border", config.border_color.as_deref()),
        ("--color-input", config.input_color.as_deref()),
        ("--color-ring", config.ring_color.as_deref()),
    ];
    for (name, value) in raw {
        if let Some(value) = present(value) {
            sink.set_variable(name, value);
        }
    }

    apply_typography(config, sink);

    if let Some(radius) = present(config.border_radius.as_deref()) {
        sink.set_variable("--border-radius", radius);
    }

    for (name, value) in DERIVED_ALIASES {
        sink.set_variable(name, value);
    }
}

/// Apply to a fresh `CssVariables` and return it.
pub fn resolve_variables(config: &ThemeConfig) -> CssVariables {
    let mut vars = CssVariables::new();
    apply_theme(config, &mut vars);
    vars
}

fn write_ramp(sink: &mut dyn StyleSink, group: &str, ramp: &ShadeRamp) {
    for (shade, hex) in ramp.iter() {
        sink.set_variable(&format!("--color-{group}-{shade}"), hex);
    }
    if let Some(rgb) = ramp.base().and_then(hex_to_rgb) {
        sink.set_variable(&format!("--color-{group}-rgb"), &rgb.to_channel_list());
    }
}

fn apply_typography(config: &ThemeConfig, sink: &mut dyn StyleSink) {
    let typography = config.typography.as_ref();
    let fonts = [
        (
            "--font-family",
            typography.and_then(|t| t.font_family.as_deref()),
            config.font_family.as_deref(),
        ),
        (
            "--font-family-heading",
            typography.and_then(|t| t.font_family_heading.as_deref()),
            config.font_family_heading.as_deref(),
        ),
        (
            "--font-family-subheading",
            typography.and_then(|t| t.font_family_subheading.as_deref()),
            config.font_family_subheading.as_deref(),
        ),
    ];

    for (name, structured, flat) in fonts {
        if let Some(value) = present(structured) {
            sink.set_variable(name, value);
        } else if let Some(value) = present(flat) {
            sink.set_variable(name, &format!("{value}{FONT_FALLBACK}"));
        }
    }
}

fn is_inert_css_value(value: &str) -> bool {
    !value.contains(|c| matches!(c, ';' | '{' | '}' | '<'))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
