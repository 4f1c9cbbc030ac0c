// Color math for the pre-paint path. Mirrors the theme crate's converter and
// shade generator; parity is checked by the theme crate's test suite.

pub type Channels = (u8, u8, u8);

pub const SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

pub fn parse_hex(input: &str) -> Option<Channels> {
    let digits = input.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    let nibbles: Vec<u8> = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;

    match nibbles.as_slice() {
        [r, g, b] => Some((r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Some((r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
        _ => None,
    }
}

pub fn format_hex((r, g, b): Channels) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Returns `(h, s, l)` with `h` in degrees and `s`, `l` in percent.
pub fn to_hsl((r, g, b): Channels) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let hi = r.max(g).max(b);
    let lo = r.min(g).min(b);
    let l = (hi + lo) / 2.0;
    if hi == lo {
        return (0.0, 0.0, l * 100.0);
    }

    let d = hi - lo;
    let s = if l > 0.5 { d / (2.0 - hi - lo) } else { d / (hi + lo) };
    let sector = if hi == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if hi == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    ((sector * 60.0) % 360.0, s * 100.0, l * 100.0)
}

pub fn from_hsl(h: f64, s: f64, l: f64) -> Channels {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;
    let byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        let v = byte(l);
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    (byte(hue(h + 1.0 / 3.0)), byte(hue(h)), byte(hue(h - 1.0 / 3.0)))
}

/// `(shade, hex)` pairs lightest first, empty when `base` does not parse.
pub fn shades(base: &str) -> Vec<(u16, String)> {
    let Some(rgb) = parse_hex(base) else {
        return Vec::new();
    };
    let (h, s, l) = to_hsl(rgb);

    let light_table = [98.0, 93.0, 86.0, 76.0, 66.0];
    let dark_table = [46.0, 36.0, 26.0, 16.0, 9.0];
    let light: Vec<f64> = if light_table[4] - l >= 2.0 {
        light_table.to_vec()
    } else {
        [0.95, 0.85, 0.7, 0.5, 0.3].iter().map(|f| l + (100.0 - l) * f).collect()
    };
    let dark: Vec<f64> = if l - dark_table[0] >= 2.0 {
        dark_table.to_vec()
    } else {
        [0.84, 0.62, 0.45, 0.28, 0.16].iter().map(|f| l * f).collect()
    };

    let mut out = Vec::with_capacity(SHADES.len());
    for (i, target) in light.iter().enumerate() {
        let progress = ((target - l) / (100.0 - l).max(1.0)).clamp(0.0, 1.0);
        let sat = if *target > 90.0 {
            (s * (1.0 - progress * 0.6)).max(30f64.min(s))
        } else {
            (s * (1.0 - progress * 0.3)).max(25f64.min(s))
        };
        out.push((SHADES[i], format_hex(from_hsl(h, sat, *target))));
    }
    out.push((500, format_hex(rgb)));
    for (i, target) in dark.iter().enumerate() {
        let depth = ((l - target) / l.max(1.0)).clamp(0.0, 1.0);
        let sat = (s * (1.0 + depth * 0.25)).min(100.0);
        out.push((SHADES[6 + i], format_hex(from_hsl(h, sat, *target))));
    }
    out
}
