//! Design tokens.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY: &str = "#6366F1";
pub const DEFAULT_SECONDARY: &str = "#8B5CF6";
pub const DEFAULT_ACCENT: &str = "#EC4899";
pub const DEFAULT_TEXT: &str = "#1F2937";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
pub const DEFAULT_FONT: &str = "Inter";

/// Token families; each renders as one custom-property block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Color,
    Typography,
    Spacing,
    Radius,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 4] = [Self::Color, Self::Typography, Self::Spacing, Self::Radius];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Color => "Colors",
            Self::Typography => "Typography",
            Self::Spacing => "Spacing",
            Self::Radius => "Border Radius",
        }
    }
}

/// A fully populated token record. There is no partially-absent state:
/// anything the input gave no signal for holds its fallback default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DesignTokens {
    pub color_primary: String,
    pub color_secondary: String,
    pub color_accent: String,
    pub color_text: String,
    pub color_background: String,
    pub font_heading: String,
    pub font_body: String,
    pub space_xs: String,
    pub space_sm: String,
    pub space_md: String,
    pub space_lg: String,
    pub space_xl: String,
    pub radius_sm: String,
    pub radius_md: String,
    pub radius_lg: String,
}

impl Default for DesignTokens {
    fn default() -> Self {
        Self {
            color_primary: DEFAULT_PRIMARY.to_string(),
            color_secondary: DEFAULT_SECONDARY.to_string(),
            color_accent: DEFAULT_ACCENT.to_string(),
            color_text: DEFAULT_TEXT.to_string(),
            color_background: DEFAULT_BACKGROUND.to_string(),
            font_heading: DEFAULT_FONT.to_string(),
            font_body: DEFAULT_FONT.to_string(),
            space_xs: "clamp(0.5rem, 1vw, 0.75rem)".to_string(),
            space_sm: "clamp(0.75rem, 2vw, 1rem)".to_string(),
            space_md: "clamp(1rem, 3vw, 1.5rem)".to_string(),
            space_lg: "clamp(1.5rem, 4vw, 2.5rem)".to_string(),
            space_xl: "clamp(2rem, 6vw, 4rem)".to_string(),
            radius_sm: "0.25rem".to_string(),
            radius_md: "0.5rem".to_string(),
            radius_lg: "1rem".to_string(),
        }
    }
}

impl DesignTokens {
    /// Custom-property name/value pairs of one category, in a fixed order.
    pub fn variables(&self, category: TokenCategory) -> Vec<(&'static str, &str)> {
        match category {
            TokenCategory::Color => vec![
                ("--color-primary", self.color_primary.as_str()),
                ("--color-secondary", self.color_secondary.as_str()),
                ("--color-accent", self.color_accent.as_str()),
                ("--color-text", self.color_text.as_str()),
                ("--color-background", self.color_background.as_str()),
            ],
            TokenCategory::Typography => vec![
                ("--font-heading", self.font_heading.as_str()),
                ("--font-body", self.font_body.as_str()),
            ],
            TokenCategory::Spacing => vec![
                ("--space-xs", self.space_xs.as_str()),
                ("--space-sm", self.space_sm.as_str()),
                ("--space-md", self.space_md.as_str()),
                ("--space-lg", self.space_lg.as_str()),
                ("--space-xl", self.space_xl.as_str()),
            ],
            TokenCategory::Radius => vec![
                ("--radius-sm", self.radius_sm.as_str()),
                ("--radius-md", self.radius_md.as_str()),
                ("--radius-lg", self.radius_lg.as_str()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let tokens = DesignTokens::default();
        assert_eq!(tokens.color_primary, DEFAULT_PRIMARY);
        assert_eq!(tokens.font_heading, "Inter");
        assert_eq!(tokens.radius_lg, "1rem");
    }

    #[test]
    fn test_serialized_keys_are_kebab_case() {
        let json = serde_json::to_value(DesignTokens::default()).unwrap();
        assert_eq!(json["color-primary"], DEFAULT_PRIMARY);
        assert_eq!(json["space-xl"], "clamp(2rem, 6vw, 4rem)");
    }

    #[test]
    fn test_variables_cover_every_field() {
        let tokens = DesignTokens::default();
        let count: usize = TokenCategory::ALL
            .iter()
            .map(|c| tokens.variables(*c).len())
            .sum();
        assert_eq!(count, 15);
    }
}
