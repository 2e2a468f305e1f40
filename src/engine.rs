//! Per-file and per-directory watermark orchestration.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::compositor;
use crate::date::{self, DateSource};
use crate::error::{Error, Result};
use crate::style::WatermarkStyle;
use crate::text::TextRenderer;

/// Directory-name suffix for derived output locations.
const OUTPUT_SUFFIX: &str = "_watermark";

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Where the stamped date came from, when resolution got that far.
    pub date_source: Option<DateSource>,
    /// Human-readable status message.
    pub message: String,
}

/// The watermark engine holding the font loaded at startup.
///
/// Create once with [`WatermarkEngine::new()`] and reuse for every image in
/// the run. Files are processed strictly one at a time.
pub struct WatermarkEngine {
    renderer: TextRenderer,
}

impl WatermarkEngine {
    /// Create an engine with a font loaded at the style's size.
    ///
    /// A missing host font silently falls back to the embedded face.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FontDecode`] if the embedded font bytes cannot be
    /// parsed (corrupted binary).
    pub fn new(font_size: u32) -> Result<Self> {
        Ok(Self {
            renderer: TextRenderer::new(font_size)?,
        })
    }

    /// Process a single image file: decode, resolve date, composite, save.
    ///
    /// Failures are captured in the returned [`ProcessResult`] rather than
    /// propagated, so a batch keeps going after a bad file.
    #[must_use]
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
        style: &WatermarkStyle,
    ) -> ProcessResult {
        let mut result = ProcessResult {
            path: input.to_path_buf(),
            success: false,
            date_source: None,
            message: String::new(),
        };

        let image = match image::open(input) {
            Ok(img) => img,
            Err(e) => {
                result.message = format!("Failed to load: {e}");
                return result;
            }
        };

        let resolved = match date::resolve_date(input) {
            Ok(r) => r,
            Err(e) => {
                result.message = format!("Failed to resolve date: {e}");
                return result;
            }
        };
        result.date_source = Some(resolved.source);

        let stamped = self.watermark(&image, &resolved.text, style);

        if let Some(parent) = output.parent() {
            if !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match save_image(&stamped, output) {
            Ok(()) => {
                result.success = true;
                result.message = match resolved.source {
                    DateSource::CaptureMetadata => format!("Stamped EXIF date {}", resolved.text),
                    DateSource::FileModified => {
                        format!("No EXIF date, stamped file mtime {}", resolved.text)
                    }
                };
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }

    /// Process all supported images directly inside a directory.
    ///
    /// Entries with unsupported extensions are skipped silently and do not
    /// appear in the results. Files are processed sequentially, each one
    /// fully decoded, stamped and saved before the next begins.
    #[must_use]
    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        style: &WatermarkStyle,
    ) -> Vec<ProcessResult> {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(input_dir) {
            Ok(rd) => rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|e| e.path())
                .filter(|p| is_supported_image(p))
                .collect(),
            Err(e) => {
                return vec![ProcessResult {
                    path: input_dir.to_path_buf(),
                    success: false,
                    date_source: None,
                    message: format!("Failed to read directory: {e}"),
                }];
            }
        };
        entries.sort();

        if !output_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(output_dir) {
                return vec![ProcessResult {
                    path: output_dir.to_path_buf(),
                    success: false,
                    date_source: None,
                    message: format!("Failed to create output directory: {e}"),
                }];
            }
        }

        entries
            .iter()
            .map(|input_path| {
                // Supported image paths always carry a filename.
                let filename = input_path.file_name().unwrap();
                let output_path = output_dir.join(filename);
                self.process_file(input_path, &output_path, style)
            })
            .collect()
    }

    /// Stamp a date string onto an already decoded image.
    #[must_use]
    pub fn watermark(&self, image: &DynamicImage, text: &str, style: &WatermarkStyle) -> RgbImage {
        compositor::apply_watermark(image, text, style, &self.renderer)
    }
}

/// Derive the output directory for an input file or directory.
///
/// The output directory is always a sibling of the input's containing
/// directory (for a file) or of the input directory itself, named by
/// appending `_watermark` — never nested inside the input directory.
#[must_use]
pub fn output_dir_for(input: &Path) -> PathBuf {
    let subject = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or(Path::new("."))
    };

    let name = subject
        .file_name()
        .map_or_else(|| "output".to_string(), |n| n.to_string_lossy().to_string());
    let grandparent = subject.parent().unwrap_or(Path::new("."));
    grandparent.join(format!("{name}{OUTPUT_SUFFIX}"))
}

/// Check if a file has a supported photo extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg" | "png"),
        None => false,
    }
}

/// Save an RGB image with format-specific quality settings.
///
/// Existing files are overwritten without warning.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    let dyn_img = DynamicImage::ImageRgb8(img.clone());

    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, 100);
            encoder.encode_image(&dyn_img)?;
        }
        ImageFormat::Png => {
            dyn_img.save(path)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}
