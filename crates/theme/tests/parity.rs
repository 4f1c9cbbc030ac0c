//! Shared properties run against both the theme crate and the pre-paint
//! bootstrap, which must stay behaviorally identical.

use std::collections::BTreeMap;
use std::process::Command;
use std::sync::OnceLock;

use modele_theme::{
    generate_color_shades, hex_to_rgb, hsl_to_rgb, resolve_variables, rgb_to_hex, rgb_to_hsl,
    MemoryStorage, ThemeCache, ThemeConfig, Typography, CACHE_KEY, CACHE_VERSION,
    SHADE_KEYS,
};
use modele_bootstrap::script::{self, ScriptOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const NOW: i64 = 1_700_000_000_000;

fn hex_color() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<bool>()).prop_map(|(r, g, b, upper)| {
        let hex = format!("#{:02x}{:02x}{:02x}", r, g, b);
        if upper {
            hex.to_uppercase()
        } else {
            hex
        }
    })
}

/// Bases with room for five strictly lighter and five strictly darker shades.
fn ramp_base() -> impl Strategy<Value = String> {
    hex_color().prop_filter("lightness outside ramp-able band", |hex| {
        let rgb = hex_to_rgb(hex).unwrap();
        let l = rgb_to_hsl(rgb.r, rgb.g, rgb.b).l;
        (4.0..=94.0).contains(&l)
    })
}

fn maybe<T: std::fmt::Debug + Clone>(s: impl Strategy<Value = T>) -> impl Strategy<Value = Option<T>> {
    prop_oneof![Just(None), s.prop_map(Some)]
}

fn color_field() -> impl Strategy<Value = Option<String>> {
    maybe(prop_oneof![
        4 => hex_color(),
        1 => Just("not-a-color".to_string()),
        1 => Just("#abc".to_string()),
    ])
}

fn text_field() -> impl Strategy<Value = Option<String>> {
    maybe(prop_oneof![
        Just("Inter".to_string()),
        Just("Playfair Display, serif".to_string()),
        Just("0.5rem".to_string()),
        Just("hsl(210 40% 96%)".to_string()),
    ])
}

fn theme_config() -> impl Strategy<Value = ThemeConfig> {
    let colors = (
        color_field(),
        color_field(),
        color_field(),
        color_field(),
        color_field(),
        color_field(),
    );
    let raw = (text_field(), text_field(), text_field(), text_field(), text_field());
    let fonts = (
        text_field(),
        text_field(),
        text_field(),
        maybe((text_field(), text_field(), text_field())),
        text_field(),
    );

    (colors, raw, fonts).prop_map(
        |(
            (primary, secondary, danger, warning, info, success),
            (background, foreground, muted, border, ring),
            (font, heading, subheading, typography, radius),
        )| ThemeConfig {
            primary_color: primary,
            secondary_color: secondary,
            danger_color: danger,
            warning_color: warning,
            info_color: info,
            success_color: success,
            background_color: background,
            foreground_color: foreground,
            muted_color: muted,
            muted_foreground_color: None,
            border_color: border,
            input_color: None,
            ring_color: ring,
            font_family: font,
            font_family_heading: heading,
            font_family_subheading: subheading,
            typography: typography.map(|(a, b, c)| Typography {
                font_family: a,
                font_family_heading: b,
                font_family_subheading: c,
            }),
            border_radius: radius,
        },
    )
}

fn bootstrap_variables(config: &ThemeConfig) -> (bool, BTreeMap<String, String>) {
    let mut cache = ThemeCache::new(MemoryStorage::new());
    cache.write_at(config, NOW).unwrap();
    let raw = cache.raw();

    let mut vars = BTreeMap::new();
    let applied = modele_bootstrap::run(raw.as_deref(), NOW, &mut |name, value| {
        vars.insert(name.to_string(), value.to_string());
    });
    (applied, vars)
}

fn cached_entry(config: &ThemeConfig) -> String {
    let mut cache = ThemeCache::new(MemoryStorage::new());
    cache.write_at(config, NOW).unwrap();
    cache.raw().unwrap()
}

fn node_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        let found = Command::new("node")
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false);
        if !found {
            eprintln!("node not found, skipping head script checks");
        }
        found
    })
}

/// Run the rendered head script against stub `localStorage` and
/// `document.documentElement.style` and collect what it sets.
fn head_script_variables(stored: Option<&str>) -> BTreeMap<String, String> {
    let stored = match stored {
        Some(raw) => serde_json::Value::String(raw.to_string()).to_string(),
        None => "null".to_string(),
    };
    let harness = format!(
        r#"var stored = {stored};
var vars = {{}};
var window = {{ localStorage: {{ getItem: function (key) {{ return key === {key} ? stored : null; }} }} }};
var document = {{ documentElement: {{ style: {{ setProperty: function (n, v) {{ vars[n] = String(v); }} }} }} }};
Date.now = function () {{ return {NOW}; }};
{script}
process.stdout.write(JSON.stringify(vars));
"#,
        key = serde_json::Value::String(CACHE_KEY.to_string()),
        script = script::render(&ScriptOptions::default()),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("head.js");
    std::fs::write(&path, harness).unwrap();
    let out = Command::new("node").arg(&path).output().unwrap();
    assert!(
        out.status.success(),
        "node failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap()
}

fn lightness(hex: &str) -> f64 {
    let rgb = hex_to_rgb(hex).unwrap();
    rgb_to_hsl(rgb.r, rgb.g, rgb.b).l
}

proptest! {
    #[test]
    fn round_trip_within_one_channel(hex in hex_color()) {
        let rgb = hex_to_rgb(&hex).unwrap();
        let hsl = rgb_to_hsl(rgb.r, rgb.g, rgb.b);
        let back = hsl_to_rgb(hsl.h, hsl.s, hsl.l);
        let back = hex_to_rgb(&rgb_to_hex(back.r as f64, back.g as f64, back.b as f64)).unwrap();
        prop_assert!(rgb.r.abs_diff(back.r) <= 1);
        prop_assert!(rgb.g.abs_diff(back.g) <= 1);
        prop_assert!(rgb.b.abs_diff(back.b) <= 1);

        let boot = modele_bootstrap::palette::parse_hex(&hex).unwrap();
        let (h, s, l) = modele_bootstrap::palette::to_hsl(boot);
        let boot_back = modele_bootstrap::palette::from_hsl(h, s, l);
        prop_assert!(boot.0.abs_diff(boot_back.0) <= 1);
        prop_assert!(boot.1.abs_diff(boot_back.1) <= 1);
        prop_assert!(boot.2.abs_diff(boot_back.2) <= 1);
    }

    #[test]
    fn shade_500_is_identity(hex in hex_color()) {
        let expected = hex.to_lowercase();
        let ramp = generate_color_shades(&hex);
        prop_assert_eq!(ramp.get(500), Some(expected.as_str()));

        let boot = modele_bootstrap::palette::shades(&hex);
        prop_assert_eq!(&boot[5], &(500u16, expected));
    }

    #[test]
    fn lightness_strictly_decreases(hex in ramp_base()) {
        let ramp = generate_color_shades(&hex);
        let values: Vec<f64> = SHADE_KEYS.iter().map(|k| lightness(ramp.get(*k).unwrap())).collect();
        for pair in values.windows(2) {
            prop_assert!(pair[0] > pair[1], "{} -> {:?}", hex, values);
        }

        let boot: Vec<f64> = modele_bootstrap::palette::shades(&hex)
            .iter()
            .map(|(_, h)| lightness(h))
            .collect();
        prop_assert_eq!(boot, values);
    }

    #[test]
    fn ramps_agree(hex in hex_color()) {
        let ours: Vec<(u16, String)> = generate_color_shades(&hex)
            .iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        prop_assert_eq!(ours, modele_bootstrap::palette::shades(&hex));
    }

    #[test]
    fn applied_variables_agree(config in theme_config()) {
        let (applied, boot) = bootstrap_variables(&config);
        prop_assert!(applied);
        prop_assert_eq!(resolve_variables(&config).into_map(), boot);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn head_script_matches_applier(config in theme_config()) {
        if !node_available() {
            return Ok(());
        }
        let entry = cached_entry(&config);
        prop_assert_eq!(
            head_script_variables(Some(entry.as_str())),
            resolve_variables(&config).into_map()
        );
    }
}

#[test]
fn head_script_scenarios() {
    if !node_available() {
        return;
    }

    let scenarios = [
        ThemeConfig {
            primary_color: Some("#3B82F6".into()),
            ..Default::default()
        },
        ThemeConfig {
            danger_color: Some("#EF4444".into()),
            ..Default::default()
        },
        ThemeConfig {
            secondary_color: Some("#10B981".into()),
            ..Default::default()
        },
        ThemeConfig {
            primary_color: Some("not-a-color".into()),
            warning_color: Some("#fa0".into()),
            background_color: Some("hsl(0 0% 100%)".into()),
            font_family: Some("Inter".into()),
            typography: Some(Typography {
                font_family_heading: Some("Lora, serif".into()),
                ..Default::default()
            }),
            border_radius: Some("0.5rem".into()),
            ..Default::default()
        },
    ];

    for config in &scenarios {
        let entry = cached_entry(config);
        assert_eq!(
            head_script_variables(Some(entry.as_str())),
            resolve_variables(config).into_map()
        );
    }
}

#[test]
fn head_script_ignores_unusable_entries() {
    if !node_available() {
        return;
    }

    let config = r##"{"primaryColor":"#3b82f6"}"##;
    let expired = format!(
        r#"{{"version":"{CACHE_VERSION}","timestamp":{},"config":{config}}}"#,
        NOW - 6 * 60 * 1000
    );
    let other_version = format!(r#"{{"version":"0.9.0","timestamp":{NOW},"config":{config}}}"#);
    let no_config = format!(r#"{{"version":"{CACHE_VERSION}","timestamp":{NOW}}}"#);

    for stored in [
        None,
        Some("{oops"),
        Some("null"),
        Some(expired.as_str()),
        Some(other_version.as_str()),
        Some(no_config.as_str()),
    ] {
        assert_eq!(head_script_variables(stored), BTreeMap::new(), "{:?}", stored);
    }

    let fresh = format!(r#"{{"version":"{CACHE_VERSION}","timestamp":{NOW},"config":{config}}}"#);
    let vars = head_script_variables(Some(fresh.as_str()));
    assert_eq!(vars.get("--color-primary-500").map(String::as_str), Some("#3b82f6"));
}

#[test]
fn malformed_color_is_empty_for_both() {
    assert_eq!(hex_to_rgb("not-a-color"), None);
    assert!(generate_color_shades("not-a-color").is_empty());
    assert_eq!(modele_bootstrap::palette::parse_hex("not-a-color"), None);
    assert!(modele_bootstrap::palette::shades("not-a-color").is_empty());

    let config = ThemeConfig {
        primary_color: Some("not-a-color".into()),
        ..Default::default()
    };
    let ours = resolve_variables(&config);
    let (_, boot) = bootstrap_variables(&config);
    assert!(!ours.contains("--color-primary-500"));
    assert_eq!(ours.into_map(), boot);
}

#[test]
fn blue_scenario_for_both() {
    let ramp = generate_color_shades("#3B82F6");
    assert_eq!(ramp.get(500), Some("#3b82f6"));
    assert!(lightness(ramp.get(50).unwrap()) >= 95.0);
    assert!(lightness(ramp.get(950).unwrap()) <= 12.0);

    let boot = modele_bootstrap::palette::shades("#3B82F6");
    assert_eq!(boot[5].1, "#3b82f6");
    assert!(lightness(&boot[0].1) >= 95.0);
    assert!(lightness(&boot[10].1) <= 12.0);
}

#[test]
fn danger_only_scenario_for_both() {
    let config = ThemeConfig {
        danger_color: Some("#EF4444".into()),
        ..Default::default()
    };
    let ours = resolve_variables(&config).into_map();
    let (_, boot) = bootstrap_variables(&config);
    assert_eq!(ours, boot);

    for shade in SHADE_KEYS {
        assert_eq!(
            ours.get(&format!("--color-danger-{shade}")),
            ours.get(&format!("--color-error-{shade}"))
        );
        assert!(!ours.contains_key(&format!("--color-primary-{shade}")));
    }
    assert_eq!(ours.get("--color-error-rgb").map(String::as_str), Some("239, 68, 68"));
}

#[test]
fn secondary_fallback_scenario_for_both() {
    let config = ThemeConfig {
        secondary_color: Some("#10B981".into()),
        ..Default::default()
    };
    let ours = resolve_variables(&config).into_map();
    let (_, boot) = bootstrap_variables(&config);
    assert_eq!(ours, boot);
    assert_eq!(ours.get("--color-success-500"), ours.get("--color-secondary-500"));
    assert_eq!(ours.get("--color-success-500").map(String::as_str), Some("#10b981"));
}
