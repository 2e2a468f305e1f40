//! Capture-date resolution.
//!
//! The watermark text is the photo's capture date. It comes from the EXIF
//! `DateTimeOriginal` tag when present, otherwise from the file's
//! modification time. Metadata problems (missing container, missing tag,
//! malformed value) never fail resolution; they select the fallback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use exif::{In, Tag};

use crate::error::Result;

/// Where a resolved date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// EXIF capture metadata (`DateTimeOriginal` or `DateTime`).
    CaptureMetadata,
    /// Filesystem modification time (metadata absent or unusable).
    FileModified,
}

/// A capture date formatted `YYYY-MM-DD`, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    /// The date text to stamp, always `YYYY-MM-DD`.
    pub text: String,
    /// Which resolution branch produced the date.
    pub source: DateSource,
}

/// Resolve the date to stamp on an image.
///
/// Tries EXIF capture metadata first and falls back to the file's
/// modification time.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] only if the fallback modification time
/// cannot be read; metadata failures never surface.
pub fn resolve_date(path: &Path) -> Result<ResolvedDate> {
    if let Some(text) = exif_date(path) {
        return Ok(ResolvedDate {
            text,
            source: DateSource::CaptureMetadata,
        });
    }

    let modified = std::fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(ResolvedDate {
        text: local.format("%Y-%m-%d").to_string(),
        source: DateSource::FileModified,
    })
}

/// Extract the EXIF capture date from an image file, if present and valid.
///
/// Checks `DateTimeOriginal` first, then the plain `DateTime` tag. Returns
/// `None` for files without EXIF, without either tag, or with a value that
/// does not parse as a calendar date.
#[must_use]
pub fn exif_date(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(&file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    [Tag::DateTimeOriginal, Tag::DateTime]
        .iter()
        .filter_map(|&tag| exif.get_field(tag, In::PRIMARY))
        .find_map(|field| normalize_exif_datetime(&field.display_value().to_string()))
}

/// Normalize an EXIF datetime string to `YYYY-MM-DD`.
///
/// EXIF writes `YYYY:MM:DD HH:MM:SS`; some writers (and kamadak-exif's
/// display form) already use `-` separators in the date part. Both are
/// accepted. Returns `None` when the date part is not a real calendar date.
fn normalize_exif_datetime(raw: &str) -> Option<String> {
    let date_part = raw
        .trim_matches('"')
        .split_whitespace()
        .next()?
        .replace(':', "-");
    let date = NaiveDate::parse_from_str(&date_part, "%Y-%m-%d").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}
