use serde_json::Value;

use crate::palette::{parse_hex, shades};

const GROUPS: [(&str, &str); 6] = [
    ("primary", "primaryColor"),
    ("secondary", "secondaryColor"),
    ("danger", "dangerColor"),
    ("warning", "warningColor"),
    ("info", "infoColor"),
    ("success", "successColor"),
];

const RAW: [(&str, &str); 7] = [
    ("--color-background", "backgroundColor"),
    ("--color-foreground", "foregroundColor"),
    ("--color-muted", "mutedColor"),
    ("--color-muted-foreground", "mutedForegroundColor"),
    ("--color-border", "borderColor"),
    ("--color-input", "inputColor"),
    ("--color-ring", "ringColor"),
];

const FONTS: [(&str, &str); 3] = [
    ("--font-family", "fontFamily"),
    ("--font-family-heading", "fontFamilyHeading"),
    ("--font-family-subheading", "fontFamilySubheading"),
];

const ALIASES: [(&str, &str); 12] = [
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

fn field<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key)?.as_str().filter(|s| !s.trim().is_empty())
}

fn write_group(set: &mut dyn FnMut(&str, &str), name: &str, ramp: &[(u16, String)]) {
    for (shade, hex) in ramp {
        set(&format!("--color-{name}-{shade}"), hex);
    }
    let base = ramp.iter().find(|(shade, _)| *shade == 500);
    if let Some((r, g, b)) = base.and_then(|(_, hex)| parse_hex(hex)) {
        set(&format!("--color-{name}-rgb"), &format!("{r}, {g}, {b}"));
    }
}

/// Write the variables for a cached (camelCase) theme config.
pub fn apply_cached_config(config: &Value, set: &mut dyn FnMut(&str, &str)) {
    let has_success = field(config, "successColor").is_some();

    for (name, key) in GROUPS {
        let Some(base) = field(config, key) else { continue };
        let ramp = shades(base);
        if ramp.is_empty() {
            continue;
        }
        write_group(set, name, &ramp);
        if name == "danger" {
            write_group(set, "error", &ramp);
        }
        if name == "secondary" && !has_success {
            write_group(set, "success", &ramp);
        }
    }

    for (var, key) in RAW {
        if let Some(value) = field(config, key) {
            set(var, value);
        }
    }

    let typography = config.get("typography").filter(|t| t.is_object());
    for (var, key) in FONTS {
        if let Some(value) = typography.and_then(|t| field(t, key)) {
            set(var, value);
        } else if let Some(value) = field(config, key) {
            set(var, &format!("{value}, sans-serif"));
        }
    }

    if let Some(radius) = field(config, "borderRadius") {
        set("--border-radius", radius);
    }

    for (var, value) in ALIASES {
        set(var, value);
    }
}
