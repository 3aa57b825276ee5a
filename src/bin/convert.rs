//! `convert`: turns a pre-extracted glyph-stream JSON document into
//! Markdown.
//!
//! The engine itself never parses a PDF (see
//! [`pagedown::adapters::GlyphSource`]); this binary's input format is a
//! simple JSON array of per-page glyph streams, the shape a host
//! application's PDF parser would produce.

use clap::Parser;
use pagedown::adapters::{GlyphSource, PageGlyphs};
use pagedown::config::EngineConfig;
use pagedown::error::{Error, Result};
use pagedown::merger::convert_document;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert a glyph-stream document into layout-aware Markdown.
#[derive(Parser, Debug)]
#[command(name = "convert", version, about)]
struct Cli {
    /// Path to a JSON file containing an array of per-page glyph streams.
    input: PathBuf,

    /// Write Markdown to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Invoke OCR for pages whose glyph extraction is near-empty (requires
    /// a host-supplied OCR adapter; this reference binary has none, so
    /// passing this flag without one surfaces as an OCR-unavailable error
    /// only if such a page is actually encountered).
    #[arg(long)]
    ocr: bool,

    /// ISO language code passed to the OCR adapter.
    #[arg(long, default_value = "eng")]
    language: String,

    /// Disable the Table Detector.
    #[arg(long = "no-tables")]
    no_tables: bool,

    /// Disable the Math Tokenizer.
    #[arg(long = "no-math")]
    no_math: bool,

    /// Disable cross-page header/footer removal.
    #[arg(long = "no-header-footer-removal")]
    no_header_footer_removal: bool,

    /// Disable hyphenation repair.
    #[arg(long = "no-hyphenation-fix")]
    no_hyphenation_fix: bool,

    /// Preserve blank-line runs verbatim instead of collapsing them.
    #[arg(long = "preserve-layout")]
    preserve_layout: bool,

    /// Password to unlock an encrypted source document.
    #[arg(long)]
    password: Option<String>,
}

/// A [`GlyphSource`] backed by a JSON array of [`PageGlyphs`] read from
/// disk.
struct JsonGlyphSource {
    pages: Vec<PageGlyphs>,
}

impl JsonGlyphSource {
    fn load(path: &PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::InvalidInput(format!("could not read {}: {e}", path.display())))?;
        let pages: Vec<PageGlyphs> = serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidInput(format!("malformed glyph-stream JSON: {e}")))?;
        Ok(Self { pages })
    }
}

impl GlyphSource for JsonGlyphSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_glyphs(&mut self, page_index: usize) -> Result<PageGlyphs> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("page index {page_index} out of range")))
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut source = JsonGlyphSource::load(&cli.input)?;

    let config = EngineConfig {
        enable_tables: !cli.no_tables,
        enable_math: !cli.no_math,
        remove_headers_footers: !cli.no_header_footer_removal,
        fix_hyphenation: !cli.no_hyphenation_fix,
        preserve_layout: cli.preserve_layout,
        fence_code: true,
        ocr: cli.ocr,
        language: cli.language,
        password: cli.password,
    };

    // This reference binary has no OCR adapter of its own; passing `--ocr`
    // without one surfaces as a per-page OcrUnavailable failure only if a
    // near-empty page is actually encountered.
    let result = convert_document(&mut source, &config, None, None)?;

    for failure in &result.page_failures {
        log::warn!("page {} did not convert cleanly: {}", failure.page_index, failure.error);
    }
    for (index, report) in result.garbled_reports.iter().enumerate() {
        if report.recommend {
            log::warn!("page {index} looks garbled: {} ({}%)", report.reason, report.garbled_percentage);
        }
    }

    match cli.output {
        Some(path) => fs::write(&path, result.markdown)
            .map_err(|e| Error::Internal(format!("could not write {}: {e}", path.display())))?,
        None => println!("{}", result.markdown),
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        },
    }
}
