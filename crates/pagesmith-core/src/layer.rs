//! Design export input types.
//!
//! These mirror the JSON a design tool hands us. They are read-only inputs:
//! nothing in pagesmith mutates a layer after decoding it.

use crate::de::{lenient, lenient_list, number, optional_number};
use crate::errors::DesignError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// An axis-aligned rectangle in design-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default, deserialize_with = "number")]
    pub x: f64,
    #[serde(default, deserialize_with = "number")]
    pub y: f64,
    #[serde(default, deserialize_with = "number")]
    pub width: f64,
    #[serde(default, deserialize_with = "number")]
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// Font weight as exported: a keyword or a numeric CSS weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Bold,
    Numeric(u16),
}

impl FontWeight {
    /// Bold keyword or a numeric weight of 600 and above.
    pub fn is_bold(&self) -> bool {
        match self {
            Self::Bold => true,
            Self::Numeric(w) => *w >= 600,
            _ => false,
        }
    }

    /// The value to emit for the CSS `font-weight` property.
    pub fn css_value(&self) -> String {
        match self {
            Self::Light => "300".to_string(),
            Self::Normal => "normal".to_string(),
            Self::Bold => "bold".to_string(),
            Self::Numeric(w) => w.to_string(),
        }
    }
}

impl Serialize for FontWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Light => serializer.serialize_str("light"),
            Self::Normal => serializer.serialize_str("normal"),
            Self::Bold => serializer.serialize_str("bold"),
            Self::Numeric(w) => serializer.serialize_u16(*w),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match &value {
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "bold" | "bolder" => Self::Bold,
                "light" | "lighter" => Self::Light,
                other => other
                    .parse::<u16>()
                    .map(Self::Numeric)
                    .unwrap_or(Self::Normal),
            },
            Value::Number(n) => n
                .as_f64()
                .filter(|w| w.is_finite() && *w > 0.0)
                .map(|w| Self::Numeric(w.round().min(1000.0) as u16))
                .unwrap_or(Self::Normal),
            _ => Self::Normal,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Font settings of a text layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default, deserialize_with = "lenient")]
    pub family: String,
    #[serde(default, deserialize_with = "number")]
    pub size: f64,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default, deserialize_with = "lenient")]
    pub style: FontStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextLayer {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient")]
    pub font: FontSpec,
    /// Hex color.
    #[serde(default, deserialize_with = "lenient")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient")]
    pub position: Rect,
    #[serde(default, deserialize_with = "lenient")]
    pub alignment: TextAlign,
}

/// Optional photo adjustments; 1.0 is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageFilters {
    #[serde(default, deserialize_with = "optional_number", skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(default, deserialize_with = "optional_number", skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(default, deserialize_with = "optional_number", skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
}

impl ImageFilters {
    /// CSS `filter` value, or `None` when no adjustment is set.
    pub fn css_value(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturate", self.saturation),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}({})", name, v)))
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageLayer {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub position: Rect,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub filters: Option<ImageFilters>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Ellipse,
    Polygon,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stroke {
    #[serde(default, deserialize_with = "lenient")]
    pub color: String,
    #[serde(default, deserialize_with = "number")]
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeLayer {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub shape_type: ShapeKind,
    /// Hex color.
    #[serde(default, deserialize_with = "lenient")]
    pub fill: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(default, deserialize_with = "lenient")]
    pub position: Rect,
    #[serde(default, deserialize_with = "optional_number", skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
}

/// An atomic element of a design export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Text(TextLayer),
    Image(ImageLayer),
    Shape(ShapeLayer),
    /// A layer kind pagesmith does not understand; skipped during parsing.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Layer {
    pub fn position(&self) -> Rect {
        match self {
            Self::Text(t) => t.position,
            Self::Image(i) => i.position,
            Self::Shape(s) => s.position,
            Self::Unknown => Rect::default(),
        }
    }

    pub fn as_text(&self) -> Option<&TextLayer> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeLayer> {
        match self {
            Self::Shape(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, deserialize_with = "number")]
    pub width: f64,
    #[serde(default, deserialize_with = "number")]
    pub height: f64,
}

/// One page of a design export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageExport {
    #[serde(default, deserialize_with = "lenient")]
    pub index: usize,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub dimensions: Dimensions,
    #[serde(default, alias = "structure", deserialize_with = "lenient_list")]
    pub layers: Vec<Layer>,
}

/// A full design export: the unit handed to the design parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignExport {
    #[serde(default, deserialize_with = "lenient")]
    pub design_id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub design_title: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub pages: Vec<PageExport>,
}

impl DesignExport {
    /// Decode an export from JSON text.
    ///
    /// Only structurally invalid JSON is an error; wrong field types are defaulted.
    pub fn from_json(source: &str) -> Result<Self, DesignError> {
        Ok(serde_json::from_str(source)?)
    }
}
