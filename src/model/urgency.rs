use serde::{Deserialize, Serialize};

/// An RGB color carried by display items, independent of any terminal type.
/// Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for String {
    fn from(color: Rgb) -> String {
        color.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(hex: String) -> Result<Rgb, String> {
        Rgb::from_hex(&hex).ok_or_else(|| format!("invalid color '{}'", hex))
    }
}

impl Rgb {
    /// Parse `#RRGGBB` or `#RRGGBBAA` (alpha is ignored)
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let hex = hex.trim().strip_prefix('#')?;
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        if !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb(r, g, b))
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Colors close enough to white that a bar needs an outline to be seen
    pub fn is_near_white(self) -> bool {
        matches!(
            self,
            Rgb(0xFF, 0xFF, 0xFF) | Rgb(0xFE, 0xFE, 0xFE) | Rgb(0xFE, 0xFD, 0xFD)
        )
    }
}

/// Neutral color for records without a known urgency tag
pub const DEFAULT_COLOR: Rgb = Rgb(0xBF, 0xBF, 0xBF);

/// Urgency/status tag attached to project and subproject records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Red,
    Navy,
    Green,
    Orange,
    Yellow,
    Purple,
    White,
    Gray,
}

impl Urgency {
    pub const ALL: [Urgency; 8] = [
        Urgency::Red,
        Urgency::Navy,
        Urgency::Green,
        Urgency::Orange,
        Urgency::Yellow,
        Urgency::Purple,
        Urgency::White,
        Urgency::Gray,
    ];

    /// Parse a backend tag. Case and surrounding whitespace are ignored.
    pub fn from_tag(tag: &str) -> Option<Urgency> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Urgency::Red),
            "navy" => Some(Urgency::Navy),
            "green" => Some(Urgency::Green),
            "orange" => Some(Urgency::Orange),
            "yellow" => Some(Urgency::Yellow),
            "purple" => Some(Urgency::Purple),
            "white" => Some(Urgency::White),
            "gray" | "grey" => Some(Urgency::Gray),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Urgency::Red => "red",
            Urgency::Navy => "navy",
            Urgency::Green => "green",
            Urgency::Orange => "orange",
            Urgency::Yellow => "yellow",
            Urgency::Purple => "purple",
            Urgency::White => "white",
            Urgency::Gray => "gray",
        }
    }

    /// Human-readable status string
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Red => "Very Urgent",
            Urgency::Navy => "Completed",
            Urgency::Green => "In Progress",
            Urgency::Orange => "Urgent",
            Urgency::Yellow => "On Hold",
            Urgency::Purple => "Closed",
            Urgency::White => "Waiting",
            Urgency::Gray => "Not started",
        }
    }

    /// Chart color for this tag
    pub fn color(self) -> Rgb {
        match self {
            Urgency::Red => Rgb(0xFF, 0x00, 0x00),
            Urgency::Navy => Rgb(0x1A, 0x1A, 0x55),
            Urgency::Green => Rgb(0x18, 0x89, 0x18),
            Urgency::Orange => Rgb(0xFF, 0xA5, 0x00),
            Urgency::Yellow => Rgb(0xFF, 0xFF, 0x00),
            Urgency::Purple => Rgb(0x8B, 0x00, 0x8B),
            Urgency::White => Rgb(0xFE, 0xFD, 0xFD),
            Urgency::Gray => DEFAULT_COLOR,
        }
    }
}

/// Resolve an optional backend tag to a color; unknown or absent tags get the default
pub fn resolve_color(tag: Option<&str>) -> Rgb {
    tag.and_then(Urgency::from_tag)
        .map_or(DEFAULT_COLOR, Urgency::color)
}

/// Resolve an optional backend tag to its status label
pub fn resolve_label(tag: Option<&str>) -> Option<&'static str> {
    tag.and_then(Urgency::from_tag).map(Urgency::label)
}
