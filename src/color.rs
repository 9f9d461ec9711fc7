/// Lightens or darkens a `#rrggbb` colour by scaling each channel by
/// `(100 + percent) / 100`, clamped to `0..=255`.
///
/// Anything that is not a six-digit hex colour (named colours, `rgba(..)`,
/// CSS variables, `transparent`) is returned unchanged.
pub fn adjust_color(color: &str, percent: i32) -> String {
    let Some([r, g, b]) = parse_hex(color) else {
        return color.to_string();
    };
    let scale = |channel: u8| -> u8 {
        let scaled = i64::from(channel) * (100 + i64::from(percent)) / 100;
        scaled.clamp(0, 255) as u8
    };
    format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b))
}

/// `#rrggbb` plus an opacity in `0.0..=1.0` as an `rgba(..)` value. Non-hex
/// colours are returned as-is, without the opacity.
pub fn hex_to_rgba(color: &str, opacity: f64) -> String {
    match parse_hex(color) {
        Some([r, g, b]) => {
            let alpha = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 1.0 };
            format!("rgba({r}, {g}, {b}, {alpha})")
        }
        None => color.to_string(),
    }
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_stays_black_when_darkened() {
        assert_eq!(adjust_color("#000000", -20), "#000000");
    }

    #[test]
    fn darkens_each_channel() {
        assert_eq!(adjust_color("#646464", -20), "#505050");
        assert_eq!(adjust_color("#B91C1C", -20), "#941616");
    }

    #[test]
    fn lightening_clamps_at_white() {
        assert_eq!(adjust_color("#c8c8c8", 40), "#ffffff");
    }

    #[test]
    fn extreme_darkening_clamps_at_zero() {
        assert_eq!(adjust_color("#ff8000", -150), "#000000");
    }

    #[test]
    fn non_hex_input_passes_through() {
        assert_eq!(adjust_color("rgba(0,0,0,0.5)", -20), "rgba(0,0,0,0.5)");
        assert_eq!(adjust_color("var(--brand)", -20), "var(--brand)");
        assert_eq!(adjust_color("transparent", 10), "transparent");
        assert_eq!(adjust_color("#fff", -20), "#fff");
        assert_eq!(adjust_color("#zzzzzz", -20), "#zzzzzz");
    }

    #[test]
    fn rgba_from_hex() {
        assert_eq!(hex_to_rgba("#000000", 0.5), "rgba(0, 0, 0, 0.5)");
        assert_eq!(hex_to_rgba("#ff0000", 2.0), "rgba(255, 0, 0, 1)");
        assert_eq!(hex_to_rgba("black", 0.5), "black");
    }
}
