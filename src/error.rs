//! Error types for the date-watermark crate.

use std::path::PathBuf;

/// Errors that can occur while stamping date watermarks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path given on the command line does not exist.
    #[error("input path does not exist: {}", path.display())]
    InputNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// An unrecognized watermark position tag.
    #[error("invalid position '{0}' (expected topleft, center, bottomright or bottomleft)")]
    InvalidPosition(String),

    /// A color string that is neither a known name nor a hex code.
    #[error("invalid color '{0}' (expected a named color or #RRGGBB / #RRGGBBAA)")]
    InvalidColor(String),

    /// Failed to decode the embedded fallback font.
    #[error("failed to decode built-in font: {0}")]
    FontDecode(String),

    /// The image format is not supported for saving.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
