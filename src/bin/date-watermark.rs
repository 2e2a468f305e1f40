use std::path::Path;
use std::process;

use clap::Parser;

use date_watermark::{
    is_supported_image, output_dir_for, parse_color, DateSource, Error, Position, ProcessResult,
    WatermarkEngine, WatermarkStyle,
};

#[derive(Parser)]
#[command(
    name = "date-watermark",
    about = "Stamp the EXIF capture date onto photos",
    version,
    after_help = "Simple usage: date-watermark <photo-or-folder>\n\n\
                  Output goes to a sibling directory named <dir>_watermark,\n\
                  keeping the original filenames. Photos without an EXIF date\n\
                  are stamped with their file modification date instead.\n\n\
                  Eligible files are .jpg, .jpeg and .png. In a folder run\n\
                  other files are skipped; a single-file run rejects them."
)]
struct Cli {
    /// Input image file or directory
    input: String,

    /// Font size of the watermark text in pixels
    #[arg(long = "font_size", default_value_t = 32)]
    font_size: u32,

    /// Text color: a name (white, black, red, ...) or #RRGGBB / #RRGGBBAA
    #[arg(long, default_value = "white")]
    color: String,

    /// Text position: topleft, center, bottomright or bottomleft
    #[arg(long, default_value = "bottomright")]
    position: String,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.font_size == 0 {
        eprintln!("Error: Font size must be positive");
        process::exit(1);
    }

    let color = match parse_color(&cli.color) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let position = match Position::parse(&cli.position) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let style = WatermarkStyle {
        font_size: cli.font_size,
        color,
        position,
    };

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        let e = Error::InputNotFound {
            path: input_path.to_path_buf(),
        };
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let engine = match WatermarkEngine::new(style.font_size) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Fatal: Failed to initialize engine: {e}");
            process::exit(1);
        }
    };

    let output_dir = output_dir_for(input_path);

    let results = if input_path.is_dir() {
        engine.process_directory(input_path, &output_dir, &style)
    } else {
        // Directory runs skip ineligible files silently; an explicitly named
        // file gets a hard error instead.
        if !is_supported_image(input_path) {
            let e = Error::UnsupportedFormat(format!(
                "{} (expected .jpg, .jpeg or .png)",
                input_path.display()
            ));
            eprintln!("Error: {e}");
            process::exit(1);
        }
        let filename = input_path.file_name().unwrap_or_default();
        let output_path = output_dir.join(filename);
        vec![engine.process_file(input_path, &output_path, &style)]
    };

    let mut success_count = 0u32;
    let mut fallback_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, cli.quiet);
        if r.success {
            success_count += 1;
            if r.date_source == Some(DateSource::FileModified) {
                fallback_count += 1;
            }
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !cli.quiet {
        eprintln!();
        eprint!("[Summary] Stamped: {success_count}");
        if fallback_count > 0 {
            eprint!(" ({fallback_count} from mtime)");
        }
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, quiet: bool) {
    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        if !quiet {
            if result.date_source == Some(DateSource::FileModified) {
                eprintln!("[WARN] {filename}: {}", result.message);
            } else {
                eprintln!("[OK] {filename}: {}", result.message);
            }
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }
}
