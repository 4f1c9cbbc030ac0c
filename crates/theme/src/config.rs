//! Theme configuration and backend payload normalization.
//!
//! The backend is loose about where it puts things: colors may be flat
//! (`primary_color`), camelCased (`primaryColor`), or nested under a `colors`
//! object (`colors.primary_color`, `colors.primary`). `normalize_theme_config`
//! folds every known shape into one `ThemeConfig` so the applier only ever
//! sees a single layout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolved configuration for one theme. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family_heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family_subheading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
}

/// Structured typography block. Values are used as-is, without a fallback
/// family appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family_heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family_subheading: Option<String>,
}

impl Typography {
    fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.font_family_heading.is_none()
            && self.font_family_subheading.is_none()
    }
}

impl ThemeConfig {
    /// True when no field is set; applying such a config only rewrites the
    /// derived aliases.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Lookup chain for one field: first non-blank hit wins.
struct FieldPaths {
    snake: &'static str,
    camel: &'static str,
    short: &'static [&'static str],
}

const fn field(
    snake: &'static str,
    camel: &'static str,
    short: &'static [&'static str],
) -> FieldPaths {
    FieldPaths {
        snake,
        camel,
        short,
    }
}

const PRIMARY: FieldPaths = field("primary_color", "primaryColor", &["primary"]);
const SECONDARY: FieldPaths = field("secondary_color", "secondaryColor", &["secondary"]);
const DANGER: FieldPaths = field("danger_color", "dangerColor", &["danger"]);
const WARNING: FieldPaths = field("warning_color", "warningColor", &["warning"]);
const INFO: FieldPaths = field("info_color", "infoColor", &["info"]);
const SUCCESS: FieldPaths = field("success_color", "successColor", &["success"]);
const BACKGROUND: FieldPaths = field("background_color", "backgroundColor", &["background"]);
const FOREGROUND: FieldPaths = field("foreground_color", "foregroundColor", &["foreground"]);
const MUTED: FieldPaths = field("muted_color", "mutedColor", &["muted"]);
const MUTED_FOREGROUND: FieldPaths = field(
    "muted_foreground_color",
    "mutedForegroundColor",
    &["muted_foreground", "mutedForeground"],
);
const BORDER: FieldPaths = field("border_color", "borderColor", &["border"]);
const INPUT: FieldPaths = field("input_color", "inputColor", &["input"]);
const RING: FieldPaths = field("ring_color", "ringColor", &["ring"]);

/// Fold a raw backend payload into a `ThemeConfig`.
///
/// Per field the precedence is `config.<snake>`, `config.<camel>`,
/// `config.colors.<snake>`, `config.colors.<camel>`, then the short names under
/// `config.colors`. Blank strings count as absent.
pub fn normalize_theme_config(raw: &Value) -> ThemeConfig {
    let colors = raw.get("colors");
    let color = |paths: &FieldPaths| -> Option<String> {
        text(raw.get(paths.snake))
            .or_else(|| text(raw.get(paths.camel)))
            .or_else(|| colors.and_then(|c| text(c.get(paths.snake))))
            .or_else(|| colors.and_then(|c| text(c.get(paths.camel))))
            .or_else(|| {
                colors.and_then(|c| paths.short.iter().find_map(|name| text(c.get(*name))))
            })
    };

    let typography = raw.get("typography").map(|t| Typography {
        font_family: pick(t, "font_family", "fontFamily"),
        font_family_heading: pick(t, "font_family_heading", "fontFamilyHeading"),
        font_family_subheading: pick(t, "font_family_subheading", "fontFamilySubheading"),
    });

    ThemeConfig {
        primary_color: color(&PRIMARY),
        secondary_color: color(&SECONDARY),
        danger_color: color(&DANGER),
        warning_color: color(&WARNING),
        info_color: color(&INFO),
        success_color: color(&SUCCESS),
        background_color: color(&BACKGROUND),
        foreground_color: color(&FOREGROUND),
        muted_color: color(&MUTED),
        muted_foreground_color: color(&MUTED_FOREGROUND),
        border_color: color(&BORDER),
        input_color: color(&INPUT),
        ring_color: color(&RING),
        font_family: pick(raw, "font_family", "fontFamily"),
        font_family_heading: pick(raw, "font_family_heading", "fontFamilyHeading"),
        font_family_subheading: pick(raw, "font_family_subheading", "fontFamilySubheading"),
        typography: typography.filter(|t| !t.is_empty()),
        border_radius: radius(raw.get("border_radius")).or_else(|| radius(raw.get("borderRadius"))),
    }
}

fn pick(obj: &Value, snake: &str, camel: &str) -> Option<String> {
    text(obj.get(snake)).or_else(|| text(obj.get(camel)))
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Radius accepts a CSS length string or a bare number of pixels.
fn radius(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => n.as_f64().map(|px| format!("{px}px")),
        other => text(Some(other)),
    }
}
