// ── Chat Widget: Color Utilities ───────────────────────────────────────────
// Hex color parsing and percentage-based brightness adjustment.
//
// The customization UI stores colors as `#RRGGBB` or `#RGB` strings; the
// style generator needs hover/accent variants of the primary color, so we
// scale each channel by a signed percentage:
//   adjust("#808080",  50) → "#c0c0c0"   (lighten)
//   adjust("#ffffff", -20) → "#cccccc"   (darken)
//
// Semantics:
//   • per channel: round(c + c * percent / 100), round half away from zero
//   • clamp to [0, 255] strictly after rounding
//   • output is always lowercase "#rrggbb", even for "#RGB" input
//   • malformed input is rejected with InvalidColorFormat — callers on the
//     render path catch it once at config-load time and fall back to the
//     field default (see config.rs), so a bad stored color can never take
//     down rendering.

use crate::error::{WidgetError, WidgetResult};

/// An RGB color with 8-bit channels. Transient — parsed, adjusted, and
/// re-encoded on every render; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB`, or `RGB` (case-insensitive).
    /// Shorthand digits expand as `d` → `dd`.
    pub fn parse(hex: &str) -> WidgetResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix tolerates a leading '+'; reject it up front.
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WidgetError::InvalidColorFormat(hex.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(WidgetError::InvalidColorFormat(hex.to_string())),
        };

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map_err(|_| WidgetError::InvalidColorFormat(hex.to_string()))
        };

        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Scale every channel by `percent` (positive lightens, negative
    /// darkens). Channels saturate at 0 and 255.
    pub fn adjust(self, percent: f64) -> Rgb {
        let scale = |c: u8| {
            let c = c as f64;
            // Round first, then clamp — extreme percents rely on the clamp.
            (c + c * percent / 100.0).round().clamp(0.0, 255.0) as u8
        };
        Rgb { r: scale(self.r), g: scale(self.g), b: scale(self.b) }
    }

    /// Encode as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Rgb {
    type Err = WidgetError;

    fn from_str(s: &str) -> WidgetResult<Self> {
        Rgb::parse(s)
    }
}

/// Parse `hex`, scale each channel by `percent`, and re-encode.
///
/// Pure and deterministic; the only failure mode is a malformed input
/// string. `adjust("#3B82F6", 0.0)` normalizes to `"#3b82f6"`.
pub fn adjust(hex: &str, percent: f64) -> WidgetResult<String> {
    Ok(Rgb::parse(hex)?.adjust(percent).to_hex())
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_adjust_normalizes() {
        assert_eq!(adjust("#3B82F6", 0.0).unwrap(), "#3b82f6");
        assert_eq!(adjust("3B82F6", 0.0).unwrap(), "#3b82f6");
        assert_eq!(adjust("#ffffff", 0.0).unwrap(), "#ffffff");
    }

    #[test]
    fn test_darken() {
        // 255 * 0.8 = 204 = 0xcc
        assert_eq!(adjust("#ffffff", -20.0).unwrap(), "#cccccc");
    }

    #[test]
    fn test_lighten() {
        // 128 * 1.5 = 192 = 0xc0
        assert_eq!(adjust("#808080", 50.0).unwrap(), "#c0c0c0");
    }

    #[test]
    fn test_shorthand_expansion() {
        assert_eq!(adjust("#abc", 0.0).unwrap(), "#aabbcc");
        for p in [-75.0, -20.0, 0.0, 35.0, 200.0] {
            assert_eq!(adjust("#abc", p).unwrap(), adjust("#aabbcc", p).unwrap());
        }
    }

    #[test]
    fn test_upper_clamp_saturation() {
        // Every non-zero channel pins to 255; zero channels stay zero.
        assert_eq!(adjust("#ffffff", 1000.0).unwrap(), "#ffffff");
        assert_eq!(adjust("#010101", 100000.0).unwrap(), "#ffffff");
        assert_eq!(adjust("#000000", 100000.0).unwrap(), "#000000");
        assert_eq!(adjust("#ff0080", 100000.0).unwrap(), "#ff00ff");
    }

    #[test]
    fn test_lower_clamp_saturation() {
        assert_eq!(adjust("#ffffff", -100000.0).unwrap(), "#000000");
        assert_eq!(adjust("#3b82f6", -100.0).unwrap(), "#000000");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        // channel 1 at -50% → 0.5 → rounds up to 1, not banker's 0
        assert_eq!(adjust("#010101", -50.0).unwrap(), "#010101");
        // channel 2 at -25% → 1.5 → 2
        assert_eq!(adjust("#020202", -25.0).unwrap(), "#020202");
    }

    #[test]
    fn test_output_zero_padded() {
        assert_eq!(adjust("#0a0a0a", 0.0).unwrap(), "#0a0a0a");
        assert_eq!(adjust("#100f0e", -95.0).unwrap(), "#010101");
    }

    #[test]
    fn test_malformed_input_rejected() {
        for bad in ["#12", "#zzzzzz", "", "#", "#12345", "#1234567", "not-a-color"] {
            match adjust(bad, 10.0) {
                Err(WidgetError::InvalidColorFormat(s)) => assert_eq!(s, bad),
                other => panic!("Expected InvalidColorFormat for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_channels() {
        let c = Rgb::parse("#3B82F6").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x3b, 0x82, 0xf6));
    }
}
