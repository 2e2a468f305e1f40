//! Watermark compositing.
//!
//! The date text is drawn onto a transparent overlay of the source image's
//! dimensions, the overlay is alpha-composited over the source, and the
//! result is flattened to an opaque RGB image. No disk I/O happens here;
//! saving is the engine's job.

use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};

use crate::style::WatermarkStyle;
use crate::text::TextRenderer;

/// Stamp `text` onto `image` according to `style`.
///
/// The output always has the source image's dimensions.
#[must_use]
pub fn apply_watermark(
    image: &DynamicImage,
    text: &str,
    style: &WatermarkStyle,
    renderer: &TextRenderer,
) -> RgbImage {
    let mut base = image.to_rgba8();
    let (width, height) = (base.width(), base.height());

    let mut overlay = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));

    let (text_w, text_h) = renderer.measure(text);
    let (x, y) = style.position.origin(width, height, text_w, text_h);
    renderer.draw(&mut overlay, x, y, style.color, text);

    imageops::overlay(&mut base, &overlay, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}
