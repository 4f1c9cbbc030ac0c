//! Shade ramp generation.
//!
//! A single base color is expanded into eleven shades (`50` through `950`)
//! by walking lightness along a fixed table and bending saturation so very
//! light tints fade out and deep shades stay rich. Shade `500` is always the
//! base color itself.

use std::collections::BTreeMap;

use crate::color::{hex_to_rgb, hsl_to_rgb, rgb_to_hsl};

/// Shade keys in ramp order, lightest first.
pub const SHADE_KEYS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Shade key of the identity entry.
pub const BASE_SHADE: u16 = 500;

/// Target lightness for each non-base shade.
const LIGHTER_TARGETS: [(u16, f64); 5] = [(50, 98.0), (100, 93.0), (200, 86.0), (300, 76.0), (400, 66.0)];
const DARKER_TARGETS: [(u16, f64); 5] = [(600, 46.0), (700, 36.0), (800, 26.0), (900, 16.0), (950, 9.0)];

/// Relative positions used when the base leaves too little room for the
/// fixed table: fraction of the distance from the base towards white/black.
const LIGHTER_FRACTIONS: [f64; 5] = [0.95, 0.85, 0.7, 0.5, 0.3];
const DARKER_FRACTIONS: [f64; 5] = [0.84, 0.62, 0.45, 0.28, 0.16];

/// Minimum lightness gap kept between the base and its nearest shade.
const MIN_STEP: f64 = 2.0;

const LIGHT_TINT_THRESHOLD: f64 = 90.0;
const LIGHT_TINT_FLOOR: f64 = 30.0;
const TINT_FLOOR: f64 = 25.0;

/// Eleven hex colors keyed by shade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadeRamp {
    shades: BTreeMap<u16, String>,
}

impl ShadeRamp {
    pub fn get(&self, shade: u16) -> Option<&str> {
        self.shades.get(&shade).map(String::as_str)
    }

    /// The identity entry, `None` for an empty ramp.
    pub fn base(&self) -> Option<&str> {
        self.get(BASE_SHADE)
    }

    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shades.len()
    }

    /// Shades in key order, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.shades.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Expand `base_hex` into a full ramp. Malformed input yields an empty ramp.
pub fn generate_color_shades(base_hex: &str) -> ShadeRamp {
    let Some(rgb) = hex_to_rgb(base_hex) else {
        return ShadeRamp::default();
    };
    let base = rgb_to_hsl(rgb.r, rgb.g, rgb.b);

    let mut shades = BTreeMap::new();
    shades.insert(BASE_SHADE, rgb.to_hex());

    for (shade, target) in lighter_targets(base.l) {
        let saturation = lighter_saturation(base.s, base.l, target);
        shades.insert(shade, hsl_to_rgb(base.h, saturation, target).to_hex());
    }

    for (shade, target) in darker_targets(base.l) {
        let saturation = darker_saturation(base.s, base.l, target);
        shades.insert(shade, hsl_to_rgb(base.h, saturation, target).to_hex());
    }

    ShadeRamp { shades }
}

fn lighter_targets(base_l: f64) -> Vec<(u16, f64)> {
    let nearest = LIGHTER_TARGETS[LIGHTER_TARGETS.len() - 1].1;
    if nearest - base_l >= MIN_STEP {
        return LIGHTER_TARGETS.to_vec();
    }
    LIGHTER_TARGETS
        .iter()
        .zip(LIGHTER_FRACTIONS)
        .map(|((shade, _), f)| (*shade, base_l + (100.0 - base_l) * f))
        .collect()
}

fn darker_targets(base_l: f64) -> Vec<(u16, f64)> {
    let nearest = DARKER_TARGETS[0].1;
    if base_l - nearest >= MIN_STEP {
        return DARKER_TARGETS.to_vec();
    }
    DARKER_TARGETS
        .iter()
        .zip(DARKER_FRACTIONS)
        .map(|((shade, _), f)| (*shade, base_l * f))
        .collect()
}

/// Tints lose saturation as they approach white, faster above lightness 90.
/// Floors never push saturation above the base's own, so greys stay grey.
fn lighter_saturation(base_s: f64, base_l: f64, target_l: f64) -> f64 {
    let progress = ((target_l - base_l) / (100.0 - base_l).max(1.0)).clamp(0.0, 1.0);
    let (rate, floor) = if target_l > LIGHT_TINT_THRESHOLD {
        (0.6, LIGHT_TINT_FLOOR)
    } else {
        (0.3, TINT_FLOOR)
    };
    (base_s * (1.0 - progress * rate)).max(floor.min(base_s))
}

/// Deep shades gain saturation proportionally to how far below the base they sit.
fn darker_saturation(base_s: f64, base_l: f64, target_l: f64) -> f64 {
    let depth = ((base_l - target_l) / base_l.max(1.0)).clamp(0.0, 1.0);
    (base_s * (1.0 + depth * 0.25)).min(100.0)
}
