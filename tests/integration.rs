use std::fs;
use std::path::PathBuf;

use image::{DynamicImage, Rgb, RgbImage};

use date_watermark::{
    output_dir_for, resolve_date, DateSource, Position, WatermarkEngine, WatermarkStyle,
};

/// A unique scratch directory per test, removed on drop.
struct Scratch {
    root: PathBuf,
}

impl Scratch {
    fn new(tag: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "date_watermark_it_{tag}_{}",
            std::process::id()
        ));
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.root).ok();
    }
}

fn write_test_photo(path: &PathBuf, w: u32, h: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_pixel(w, h, Rgb([30, 30, 30])).save(path).unwrap();
}

/// Write a JPEG carrying an EXIF `DateTimeOriginal` in its APP1 segment.
fn write_jpeg_with_exif_date(path: &PathBuf, datetime: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut jpeg = Vec::new();
    let img = RgbImage::from_pixel(80, 60, Rgb([90, 90, 90]));
    image::codecs::jpeg::JpegEncoder::new(&mut jpeg)
        .encode_image(&DynamicImage::ImageRgb8(img))
        .unwrap();

    let field = exif::Field {
        tag: exif::Tag::DateTimeOriginal,
        ifd_num: exif::In::PRIMARY,
        value: exif::Value::Ascii(vec![datetime.as_bytes().to_vec()]),
    };
    let mut writer = exif::experimental::Writer::new();
    writer.push_field(&field);
    let mut tiff = std::io::Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();

    let mut app1 = Vec::new();
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(tiff.get_ref());
    let segment_len = u16::try_from(app1.len() + 2).unwrap();

    // Splice the APP1 segment right after the SOI marker.
    let mut out = Vec::new();
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    fs::write(path, out).unwrap();
}

#[test]
fn engine_initializes_successfully() {
    let engine = WatermarkEngine::new(32);
    assert!(engine.is_ok());
}

#[test]
fn watermark_preserves_dimensions_for_all_positions() {
    let style = WatermarkStyle::default();
    let engine = WatermarkEngine::new(style.font_size).unwrap();
    let img = DynamicImage::ImageRgb8(RgbImage::new(800, 600));

    for position in [
        Position::TopLeft,
        Position::Center,
        Position::BottomRight,
        Position::BottomLeft,
    ] {
        let style = WatermarkStyle { position, ..style.clone() };
        let out = engine.watermark(&img, "2024-03-15", &style);
        assert_eq!((out.width(), out.height()), (800, 600), "{position:?}");
    }
}

#[test]
fn single_file_is_stamped_into_sibling_directory() {
    let scratch = Scratch::new("single");
    let input = scratch.path("trip/img_0001.png");
    write_test_photo(&input, 320, 240);

    let out_dir = output_dir_for(&input);
    assert_eq!(out_dir, scratch.path("trip_watermark"));

    let style = WatermarkStyle::default();
    let engine = WatermarkEngine::new(style.font_size).unwrap();
    let output = out_dir.join("img_0001.png");
    let result = engine.process_file(&input, &output, &style);

    assert!(result.success, "{}", result.message);
    // No EXIF in a plain PNG, so the mtime fallback must have been used.
    assert_eq!(result.date_source, Some(DateSource::FileModified));
    assert!(output.exists());

    let saved = image::open(&output).unwrap();
    assert_eq!((saved.width(), saved.height()), (320, 240));

    // The stamp changed some pixels relative to the flat source.
    let stamped = saved.to_rgb8();
    assert!(stamped.pixels().any(|p| *p != Rgb([30, 30, 30])));
}

#[test]
fn exif_date_wins_over_modification_time() {
    let scratch = Scratch::new("exif");
    let input = scratch.path("photos/shot.jpg");
    write_jpeg_with_exif_date(&input, "2024:03:15 10:22:00");

    // The file was written moments ago, so its mtime is today; the EXIF
    // capture date must win regardless.
    let resolved = resolve_date(&input).unwrap();
    assert_eq!(resolved.source, DateSource::CaptureMetadata);
    assert_eq!(resolved.text, "2024-03-15");

    // And the end-to-end run reports the same branch.
    let style = WatermarkStyle::default();
    let engine = WatermarkEngine::new(style.font_size).unwrap();
    let output = output_dir_for(&input).join("shot.jpg");
    let result = engine.process_file(&input, &output, &style);
    assert!(result.success, "{}", result.message);
    assert_eq!(result.date_source, Some(DateSource::CaptureMetadata));
    assert!(result.message.contains("2024-03-15"));
}

#[test]
fn stamped_date_matches_file_modification_date() {
    let scratch = Scratch::new("mtime");
    let input = scratch.path("photos/shot.png");
    write_test_photo(&input, 64, 64);

    let resolved = resolve_date(&input).unwrap();
    assert_eq!(resolved.source, DateSource::FileModified);

    let modified = fs::metadata(&input).unwrap().modified().unwrap();
    let local: chrono::DateTime<chrono::Local> = modified.into();
    assert_eq!(resolved.text, local.format("%Y-%m-%d").to_string());
}

#[test]
fn directory_run_skips_unsupported_files() {
    let scratch = Scratch::new("batch");
    let input_dir = scratch.path("images");
    write_test_photo(&input_dir.join("a.png"), 100, 80);
    write_test_photo(&input_dir.join("b.jpg"), 100, 80);
    fs::write(input_dir.join("notes.txt"), b"not a photo").unwrap();

    let out_dir = output_dir_for(&input_dir);
    assert_eq!(out_dir, scratch.path("images_watermark"));

    let style = WatermarkStyle::default();
    let engine = WatermarkEngine::new(style.font_size).unwrap();
    let results = engine.process_directory(&input_dir, &out_dir, &style);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.success));

    let mut saved: Vec<String> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    saved.sort();
    assert_eq!(saved, vec!["a.png", "b.jpg"]);
}

#[test]
fn directory_run_is_idempotent_on_existing_output_dir() {
    let scratch = Scratch::new("rerun");
    let input_dir = scratch.path("images");
    write_test_photo(&input_dir.join("a.png"), 60, 40);

    let out_dir = output_dir_for(&input_dir);
    let style = WatermarkStyle::default();
    let engine = WatermarkEngine::new(style.font_size).unwrap();

    let first = engine.process_directory(&input_dir, &out_dir, &style);
    assert!(first.iter().all(|r| r.success));

    // Second run overwrites the existing output without error.
    let second = engine.process_directory(&input_dir, &out_dir, &style);
    assert!(second.iter().all(|r| r.success));
}

#[test]
fn per_file_failure_does_not_abort_the_batch() {
    let scratch = Scratch::new("badfile");
    let input_dir = scratch.path("images");
    write_test_photo(&input_dir.join("good.png"), 60, 40);
    // A .jpg extension over garbage bytes fails to decode.
    fs::write(input_dir.join("broken.jpg"), b"definitely not jpeg data").unwrap();

    let style = WatermarkStyle::default();
    let engine = WatermarkEngine::new(style.font_size).unwrap();
    let results = engine.process_directory(&input_dir, &output_dir_for(&input_dir), &style);

    assert_eq!(results.len(), 2);
    assert_eq!(results.iter().filter(|r| r.success).count(), 1);
    assert_eq!(results.iter().filter(|r| !r.success).count(), 1);
}

#[test]
fn invalid_position_tag_is_rejected_before_processing() {
    assert!(Position::parse("upper-middle").is_err());
}
