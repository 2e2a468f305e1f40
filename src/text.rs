//! Font loading and text measurement.
//!
//! One [`TextRenderer`] is built at engine startup and reused for every
//! image. Loading prefers a host font; if none of the well-known locations
//! yields a usable face the DejaVu Sans bytes embedded in the binary are
//! used instead, so rendering never fails for lack of a font.

use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::error::{Error, Result};

/// DejaVu Sans, embedded so the tool works on hosts with no fonts installed.
static BUILTIN_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

/// Well-known host font locations, tried in order.
const PREFERRED_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Which font ended up loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A host font read from the given path.
    Preferred(PathBuf),
    /// The embedded DejaVu Sans fallback.
    BuiltIn,
}

/// A loaded font plus pixel scale, able to measure and draw text.
pub struct TextRenderer {
    font: FontArc,
    scale: PxScale,
    source: FontSource,
}

impl TextRenderer {
    /// Load a font at the given pixel size.
    ///
    /// Host fonts are preferred; a missing or unreadable host font silently
    /// selects the embedded fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FontDecode`] only if the embedded font bytes fail to
    /// parse, which indicates a corrupted binary.
    pub fn new(font_size: u32) -> Result<Self> {
        #[allow(clippy::cast_precision_loss)]
        let scale = PxScale::from(font_size as f32);

        for candidate in PREFERRED_FONTS {
            if let Some(font) = load_host_font(Path::new(candidate)) {
                return Ok(Self {
                    font,
                    scale,
                    source: FontSource::Preferred(PathBuf::from(candidate)),
                });
            }
        }

        let font = FontArc::try_from_slice(BUILTIN_FONT)
            .map_err(|e| Error::FontDecode(e.to_string()))?;
        Ok(Self {
            font,
            scale,
            source: FontSource::BuiltIn,
        })
    }

    /// Which font this renderer draws with.
    #[must_use]
    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Measure the rendered bounding box of `text` in pixels.
    #[must_use]
    pub fn measure(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }

    /// Draw `text` onto `canvas` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

fn load_host_font(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}
