//! Color values and contrast math.

/// An sRGB color with channels normalized to 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create from hex string (`#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`, `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);

        match hex.len() {
            3 | 4 => {
                let mut color = Self::from_rgb8(short(0)?, short(1)?, short(2)?);
                if hex.len() == 4 {
                    color.a = short(3)? as f32 / 255.0;
                }
                Some(color)
            }
            6 | 8 => {
                let mut color =
                    Self::from_rgb8(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?);
                if hex.len() == 8 {
                    color.a = channel(&hex[6..8])? as f32 / 255.0;
                }
                Some(color)
            }
            _ => None,
        }
    }

    /// Convert to 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to8(self.r), to8(self.g), to8(self.b), to8(self.a))
    }

    /// Convert to hex string (e.g., "#FF5733").
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    /// Luminance with Rec. 709 weights over the normalized channels.
    ///
    /// No gamma linearization is applied; the contrast threshold is tuned to this.
    pub fn relative_luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Near-black on light colors, near-white on dark ones.
    pub fn contrasting_foreground(&self) -> Color {
        if self.relative_luminance() > 0.5 {
            Self::NEAR_BLACK
        } else {
            Self::NEAR_WHITE
        }
    }

    // Common colors
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const NEAR_WHITE: Self = Self::rgb(250.0 / 255.0, 250.0 / 255.0, 250.0 / 255.0);
    pub const NEAR_BLACK: Self = Self::rgb(17.0 / 255.0, 17.0 / 255.0, 17.0 / 255.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
