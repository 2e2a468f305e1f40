//! Watermark styling: position tags, colors, and the per-run style bundle.

use image::Rgba;

use crate::error::{Error, Result};

/// Fixed inset from image edges, in pixels.
const EDGE_INSET: i64 = 10;

/// Where the date text is placed on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// 10px inset from the top and left edges.
    TopLeft,
    /// Horizontally and vertically centered.
    Center,
    /// 10px inset from the bottom and right edges.
    #[default]
    BottomRight,
    /// 10px inset from the bottom and left edges.
    BottomLeft,
}

impl Position {
    /// Parse a position tag.
    ///
    /// Tags are matched case-insensitively with `-` and `_` separators
    /// ignored, and corner tags are accepted in either word order
    /// (`topleft` and `left_top` name the same corner).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] for any unrecognized tag.
    pub fn parse(tag: &str) -> Result<Self> {
        let normalized: String = tag
            .to_lowercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        match normalized.as_str() {
            "topleft" | "lefttop" => Ok(Self::TopLeft),
            "center" => Ok(Self::Center),
            "bottomright" | "rightbottom" => Ok(Self::BottomRight),
            "bottomleft" | "leftbottom" => Ok(Self::BottomLeft),
            _ => Err(Error::InvalidPosition(tag.to_string())),
        }
    }

    /// Compute the top-left draw origin for text of the given measured size.
    ///
    /// For images at least as large as the text plus the 10px inset the
    /// returned origin keeps the text fully inside the image.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn origin(self, img_w: u32, img_h: u32, text_w: u32, text_h: u32) -> (i32, i32) {
        let (w, h) = (i64::from(img_w), i64::from(img_h));
        let (tw, th) = (i64::from(text_w), i64::from(text_h));
        let (x, y) = match self {
            Self::TopLeft => (EDGE_INSET, EDGE_INSET),
            Self::Center => ((w - tw) / 2, (h - th) / 2),
            Self::BottomRight => (w - tw - EDGE_INSET, h - th - EDGE_INSET),
            Self::BottomLeft => (EDGE_INSET, h - th - EDGE_INSET),
        };
        (x as i32, y as i32)
    }
}

impl std::str::FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a color string into an RGBA fill color.
///
/// Accepts a small set of named colors plus `#RRGGBB` and `#RRGGBBAA` hex
/// codes. Named colors and `#RRGGBB` are fully opaque.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for unknown names and malformed hex.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| Error::InvalidColor(value.to_string()));
    }

    let rgb = match value.to_lowercase().as_str() {
        "white" => [255, 255, 255],
        "black" => [0, 0, 0],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" => [0, 255, 255],
        "magenta" => [255, 0, 255],
        "orange" => [255, 165, 0],
        "gray" | "grey" => [128, 128, 128],
        _ => return Err(Error::InvalidColor(value.to_string())),
    };
    Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let mut channels = [0u8; 4];
    channels[3] = 255;
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(chunk).ok()?;
        channels[i] = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(Rgba(channels))
}

/// Style configuration for a watermark run.
///
/// Constructed once from the CLI arguments and threaded through every file;
/// never read from ambient state.
#[derive(Debug, Clone)]
pub struct WatermarkStyle {
    /// Font size in pixels. Must be positive.
    pub font_size: u32,
    /// Text fill color.
    pub color: Rgba<u8>,
    /// Placement of the date text.
    pub position: Position,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            font_size: 32,
            color: Rgba([255, 255, 255, 255]),
            position: Position::BottomRight,
        }
    }
}
