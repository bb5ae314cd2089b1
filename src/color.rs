//! RGB colors as used by markup directives and the bar theme.

use serde::Deserialize;

/// An opaque RGB color.
///
/// Markup writes colors in `RRGGBB` order; the platform packing produced by
/// [`Rgb::to_colorref`] stores red in the low byte (`0x00BBGGRR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses exactly six hex digits in `RRGGBB` order.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }

    pub fn from_colorref(value: u32) -> Self {
        Rgb::new(
            (value & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            ((value >> 16) & 0xFF) as u8,
        )
    }

    /// Scales every channel down by `factor`, clamped to `0.0..=1.0`.
    pub fn darker(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f32::from(c) * f) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Scales every channel up by `factor` (at least 1.0), saturating at 255.
    pub fn lighter(self, factor: f32) -> Self {
        let f = factor.max(1.0);
        let scale = |c: u8| ((f32::from(c) * f) as i32).min(255) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn to_lipgloss(self) -> lipgloss::Color {
        lipgloss::Color::from_rgb(self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.strip_prefix('#').unwrap_or(&value);
        Rgb::from_hex(hex).ok_or_else(|| format!("invalid color `{value}`, expected RRGGBB"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_keeps_channel_identity() {
        let c = Rgb::from_hex("FF8000").unwrap();
        assert_eq!(c, Rgb::new(0xFF, 0x80, 0x00));
        assert_eq!(c.to_colorref(), 0x0000_80FF);
        assert_eq!(Rgb::from_colorref(0x0000_80FF), c);
        assert_eq!(Rgb::from_hex("a0b1c2"), Some(Rgb::new(0xA0, 0xB1, 0xC2)));
    }

    #[test]
    fn hex_rejects_short_or_non_hex() {
        assert_eq!(Rgb::from_hex("FF80"), None);
        assert_eq!(Rgb::from_hex("GG0000"), None);
        assert_eq!(Rgb::from_hex("FF00001"), None);
    }

    #[test]
    fn deserializes_from_hex_string() {
        let c: Rgb = serde_json::from_str("\"#5f5f5f\"").unwrap();
        assert_eq!(c, Rgb::new(0x5F, 0x5F, 0x5F));
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }

    #[test]
    fn darker_and_lighter_scale_channels() {
        let c = Rgb::new(100, 200, 50);
        assert_eq!(c.darker(0.5), Rgb::new(50, 100, 25));
        assert_eq!(c.lighter(1.5), Rgb::new(150, 255, 75));
        // out of range factors are clamped
        assert_eq!(c.darker(2.0), c);
        assert_eq!(c.lighter(0.2), c);
    }
}
