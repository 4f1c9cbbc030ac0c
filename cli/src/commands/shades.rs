use color_eyre::eyre::{eyre, Result};
use serde_json::{json, Value};

use modele_theme::{generate_color_shades, hex_to_rgb, ShadeRamp};

pub fn run(color: &str, json: bool) -> Result<()> {
    let ramp = generate_color_shades(color);
    if ramp.is_empty() {
        return Err(eyre!("'{}' is not a valid #rgb or #rrggbb color", color));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ramp_to_json(&ramp))?);
        return Ok(());
    }

    println!("{:>5}  {:<8}  {:<15}  {:>5}  {:>5}", "shade", "hex", "rgb", "s%", "l%");
    for (shade, hex) in ramp.iter() {
        let Some(rgb) = hex_to_rgb(hex) else {
            continue;
        };
        let hsl = rgb.to_hsl();
        println!(
            "{:>5}  {:<8}  {:<15}  {:>5.1}  {:>5.1}",
            shade,
            hex,
            rgb.to_channel_list(),
            hsl.s,
            hsl.l
        );
    }

    Ok(())
}

/// Ramp as `[{"shade": 50, "hex": "#..."}, ...]`, lightest first.
pub fn ramp_to_json(ramp: &ShadeRamp) -> Value {
    ramp.iter()
        .map(|(shade, hex)| json!({ "shade": shade, "hex": hex }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_to_json() {
        let json = ramp_to_json(&generate_color_shades("#3b82f6"));
        let entries = json.as_array().map(Vec::as_slice).unwrap_or_default();
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[5], json!({ "shade": 500, "hex": "#3b82f6" }));

        let order: Vec<u64> = entries.iter().filter_map(|e| e["shade"].as_u64()).collect();
        assert_eq!(order, vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]);
    }

    #[test]
    fn test_invalid_color_errors() {
        assert!(run("nope", false).is_err());
    }
}
