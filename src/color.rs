//! Hex color parsing and alpha variants

use regex::Regex;
use std::sync::LazyLock;

static HEX_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{6}$").expect("valid hex regex"));

/// An RGB triple decoded from a `#rrggbb` or `#rgb` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Decode a hex color. Returns `None` for anything that is not `#` followed
/// by 3 or 6 hex digits (surrounding whitespace is ignored).
pub fn hex_to_rgb(input: &str) -> Option<Rgb> {
    let hex = input.trim().strip_prefix('#')?;

    let expanded: String = if hex.chars().count() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };

    if !HEX_DIGITS.is_match(&expanded) {
        return None;
    }

    let num = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Rgb {
        r: ((num >> 16) & 0xFF) as u8,
        g: ((num >> 8) & 0xFF) as u8,
        b: (num & 0xFF) as u8,
    })
}

/// Check whether a string is a usable hex color
pub fn is_valid_hex(input: &str) -> bool {
    hex_to_rgb(input).is_some()
}

/// Render `hex` as `rgba(r, g, b, alpha)`.
///
/// Malformed input is returned unchanged, so callers always get something
/// the editor can at least attempt to use.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
    match hex_to_rgb(hex) {
        Some(rgb) => format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, alpha),
        None => hex.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_six_digits() {
        assert_eq!(
            hex_to_rgb("#1E88E5"),
            Some(Rgb { r: 0x1E, g: 0x88, b: 0xE5 })
        );
        assert_eq!(hex_to_rgb("  #ffffff "), Some(Rgb { r: 255, g: 255, b: 255 }));
    }

    #[test]
    fn test_hex_to_rgb_shorthand() {
        assert_eq!(hex_to_rgb("#abc"), Some(Rgb { r: 0xAA, g: 0xBB, b: 0xCC }));
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed() {
        assert_eq!(hex_to_rgb("1E88E5"), None);
        assert_eq!(hex_to_rgb("#1E88E"), None);
        assert_eq!(hex_to_rgb("#12345z"), None);
        assert_eq!(hex_to_rgb("#"), None);
        assert_eq!(hex_to_rgb("#1E88E5AA"), None);
        assert_eq!(hex_to_rgb("#ééé"), None);
    }

    #[test]
    fn test_with_alpha_full_opacity_matches_decoded_triple() {
        for hex in ["#000000", "#E53935", "#fdd835", "#FFFFFF"] {
            let rgb = hex_to_rgb(hex).unwrap();
            assert_eq!(
                with_alpha(hex, 1.0),
                format!("rgba({}, {}, {}, 1)", rgb.r, rgb.g, rgb.b)
            );
        }
    }

    #[test]
    fn test_with_alpha_fractions() {
        assert_eq!(with_alpha("#E53935", 0.12), "rgba(229, 57, 53, 0.12)");
        assert_eq!(with_alpha("#E53935", 0.7), "rgba(229, 57, 53, 0.7)");
    }

    #[test]
    fn test_with_alpha_passes_malformed_through() {
        assert_eq!(with_alpha("red", 0.5), "red");
        assert_eq!(with_alpha("#12", 0.5), "#12");
    }
}
