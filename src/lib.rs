//! Stamp a visible capture-date watermark onto photos.
//!
//! The date comes from the EXIF `DateTimeOriginal` tag when the photo
//! carries one, and from the file's modification time otherwise. The text
//! is rendered onto a transparent overlay, alpha-composited over the photo
//! and saved into a sibling `<dir>_watermark` directory under the original
//! filename.
//!
//! # Quick Start
//!
//! ```no_run
//! use date_watermark::{output_dir_for, WatermarkEngine, WatermarkStyle};
//! use std::path::Path;
//!
//! let style = WatermarkStyle::default();
//! let engine = WatermarkEngine::new(style.font_size).expect("failed to load font");
//!
//! let input = Path::new("photos/img_0001.jpg");
//! let output = output_dir_for(input).join("img_0001.jpg");
//! let result = engine.process_file(input, &output, &style);
//! println!("{}", result.message);
//! ```
//!
//! # Date resolution
//!
//! Resolution never fails for metadata reasons: a missing EXIF container, a
//! missing tag or a malformed value all fall through to the modification
//! time, and the chosen branch is reported in
//! [`ProcessResult::date_source`].
//!
//! ```no_run
//! use date_watermark::resolve_date;
//! use std::path::Path;
//!
//! let resolved = resolve_date(Path::new("photo.jpg")).unwrap();
//! println!("{} (from {:?})", resolved.text, resolved.source);
//! ```

#![deny(missing_docs)]

pub mod compositor;
mod date;
mod engine;
pub mod error;
pub mod style;
pub mod text;

pub use date::{exif_date, resolve_date, DateSource, ResolvedDate};
pub use engine::{
    is_supported_image, output_dir_for, save_image, ProcessResult, WatermarkEngine,
};
pub use error::{Error, Result};
pub use style::{parse_color, Position, WatermarkStyle};
