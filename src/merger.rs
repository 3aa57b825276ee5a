//! Reading-Order Merger (component 10 of the pipeline).
//!
//! Top-level orchestration: for each page, builds Lines → Columns → Blocks →
//! ClassifiedBlocks → Tables → Markdown, then runs the document-level
//! Cross-Page Normalizer and Garbled-Font Heuristic. No retries; a per-page
//! failure is recorded and processing continues onto the next page.

use crate::adapters::GarbledFontReport;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::normalize::DocumentStats;
use crate::{adapters, emitter, garbled, layout, line, normalize, tables};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A per-page condition that didn't abort the document but is worth
/// surfacing to the caller.
#[derive(Debug, Clone)]
pub struct PageFailure {
    /// Which page (0-indexed) the condition occurred on.
    pub page_index: usize,
    /// What happened.
    pub error: Error,
}

/// Cooperative cancellation handle. Checked between pages; never
/// interrupts mid-page work.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a fresh, unset token.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The outcome of converting a whole document.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The final, normalized Markdown.
    pub markdown: String,
    /// Document-wide statistics computed after normalization.
    pub stats: DocumentStats,
    /// Recorded non-fatal page failures, in page order.
    pub page_failures: Vec<PageFailure>,
    /// Per-page garbled-font advisory reports.
    pub garbled_reports: Vec<GarbledFontReport>,
}

/// Convert an entire document to Markdown.
///
/// Fatal errors ([`Error::PasswordRequired`], [`Error::PasswordIncorrect`],
/// [`Error::Cancelled`]) abort immediately. Any other per-page error is
/// recorded in [`ConversionResult::page_failures`] and that page is emitted
/// as empty Markdown.
///
/// `ocr_adapter` is consulted only when `config.ocr` is set and a page's
/// extracted text is under one character (§6): the source is asked to
/// rasterize the page and the adapter to recognize it. Failure at either
/// step, or a missing adapter when the trigger fires, is recorded as a
/// non-fatal [`Error::OcrUnavailable`] page failure.
pub fn convert_document<S: adapters::GlyphSource>(
    source: &mut S,
    config: &EngineConfig,
    cancellation: Option<&CancellationToken>,
    ocr_adapter: Option<&dyn adapters::OcrAdapter>,
) -> Result<ConversionResult> {
    let page_count = source.page_count();
    if page_count == 0 {
        return Err(Error::InvalidInput("document has zero pages".to_string()));
    }

    let mut page_markdowns = Vec::with_capacity(page_count);
    let mut page_failures = Vec::new();
    let mut garbled_reports = Vec::with_capacity(page_count);

    for page_index in 0..page_count {
        if cancellation.is_some_and(|c| c.is_cancelled()) {
            return Err(Error::Cancelled);
        }

        let page_glyphs = match source.page_glyphs(page_index) {
            Ok(p) => p,
            Err(err @ (Error::PasswordRequired | Error::PasswordIncorrect)) => return Err(err),
            Err(err) => {
                page_failures.push(PageFailure { page_index, error: err });
                page_markdowns.push(String::new());
                garbled_reports.push(garbled::analyze(""));
                continue;
            },
        };

        let lines = line::build_lines(&page_glyphs.events);
        let page_text: String = lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>().join("\n");

        if config.ocr && page_text.trim().chars().count() < 1 {
            let recognized = match ocr_adapter {
                Some(adapter) => source
                    .page_raster(page_index)
                    .and_then(|raster| adapter.recognize(&raster, &config.language)),
                None => Err(Error::OcrUnavailable("OCR requested but no adapter configured".to_string())),
            };
            match recognized {
                Ok(text) => {
                    garbled_reports.push(garbled::analyze(&text));
                    page_markdowns.push(text);
                    continue;
                },
                Err(err) => {
                    page_failures.push(PageFailure { page_index, error: err });
                    garbled_reports.push(garbled::analyze(&page_text));
                    page_markdowns.push(String::new());
                    continue;
                },
            }
        }

        garbled_reports.push(garbled::analyze(&page_text));

        let page_layout = match layout::analyze_page(lines, page_glyphs.width, page_glyphs.height, page_index) {
            Ok(layout) => layout,
            Err(err) => {
                page_failures.push(PageFailure { page_index, error: err });
                page_markdowns.push(String::new());
                continue;
            },
        };

        let mut detected_tables = std::collections::HashMap::new();
        if config.enable_tables {
            for (index, block) in page_layout.blocks.iter().enumerate() {
                if matches!(block.block_type, layout::classifier::BlockType::PotentialTable) {
                    let positioned_rows = tables::positioned_rows_from_lines(&block.block.lines);
                    if let Some(table) = tables::detect_table(&block.block.text, Some(&positioned_rows)) {
                        detected_tables.insert(index, table);
                    }
                }
            }
        }

        let page_markdown = emitter::emit_page(&page_layout.blocks, config, &detected_tables);
        page_markdowns.push(page_markdown);
    }

    let (markdown, stats) = normalize::normalize(page_markdowns, page_count, config);

    Ok(ConversionResult {
        markdown,
        stats,
        page_failures,
        garbled_reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{GlyphEvent, PageGlyphs, WritingMode};
    use crate::geometry::Point;
    use crate::glyph::{FontStyle, FontWeight, Glyph};

    struct FixedSource {
        pages: Vec<PageGlyphs>,
    }

    impl adapters::GlyphSource for FixedSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_glyphs(&mut self, page_index: usize) -> Result<PageGlyphs> {
            Ok(self.pages[page_index].clone())
        }
    }

    fn simple_page(text: &str) -> PageGlyphs {
        let mut events = vec![GlyphEvent::BeginLine { writing_mode: WritingMode::Horizontal }];
        for (i, c) in text.chars().enumerate() {
            events.push(GlyphEvent::Char(Glyph::new(
                c,
                Point::new(i as f32 * 6.0, 700.0),
                12.0,
                "Times",
                FontWeight::Normal,
                FontStyle::Normal,
            )));
        }
        events.push(GlyphEvent::EndLine);
        PageGlyphs { width: 600.0, height: 800.0, events }
    }

    #[test]
    fn test_empty_document_is_invalid_input() {
        let mut source = FixedSource { pages: vec![] };
        let config = EngineConfig::default();
        let result = convert_document(&mut source, &config, None, None);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_single_page_document_converts() {
        let mut source = FixedSource { pages: vec![simple_page("Hello world")] };
        let config = EngineConfig::default();
        let result = convert_document(&mut source, &config, None, None).unwrap();
        assert!(result.markdown.contains("Hello world"));
        assert!(result.page_failures.is_empty());
    }

    #[test]
    fn test_cancellation_aborts() {
        let mut source = FixedSource { pages: vec![simple_page("Hello world")] };
        let config = EngineConfig::default();
        let token = CancellationToken::new();
        token.cancel();
        let result = convert_document(&mut source, &config, Some(&token), None);
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn test_ocr_disabled_leaves_blank_page_as_degenerate_failure() {
        let mut source = FixedSource { pages: vec![PageGlyphs { width: 600.0, height: 800.0, events: vec![] }] };
        let config = EngineConfig::default();
        let result = convert_document(&mut source, &config, None, None).unwrap();
        assert_eq!(result.page_failures.len(), 1);
        assert!(matches!(result.page_failures[0].error, Error::DegenerateLayout(_)));
    }

    struct BlankRasterSource {
        pages: Vec<PageGlyphs>,
    }

    impl adapters::GlyphSource for BlankRasterSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_glyphs(&mut self, page_index: usize) -> Result<PageGlyphs> {
            Ok(self.pages[page_index].clone())
        }

        fn page_raster(&mut self, _page_index: usize) -> Result<adapters::RasterImage> {
            Ok(adapters::RasterImage { pixels: vec![0; 4], width: 2, height: 2 })
        }
    }

    struct StubOcrAdapter {
        text: String,
    }

    impl adapters::OcrAdapter for StubOcrAdapter {
        fn recognize(&self, _image: &adapters::RasterImage, _language: &str) -> Result<String> {
            Ok(self.text.clone())
        }
    }

    #[test]
    fn test_ocr_triggers_on_near_empty_page_and_fills_markdown() {
        let mut source = BlankRasterSource {
            pages: vec![PageGlyphs { width: 600.0, height: 800.0, events: vec![] }],
        };
        let mut config = EngineConfig::default();
        config.ocr = true;
        let adapter = StubOcrAdapter { text: "Recognized text".to_string() };
        let result = convert_document(&mut source, &config, None, Some(&adapter)).unwrap();
        assert!(result.page_failures.is_empty());
        assert!(result.markdown.contains("Recognized text"));
    }

    #[test]
    fn test_ocr_requested_without_adapter_surfaces_unavailable() {
        let mut source = FixedSource { pages: vec![PageGlyphs { width: 600.0, height: 800.0, events: vec![] }] };
        let mut config = EngineConfig::default();
        config.ocr = true;
        let result = convert_document(&mut source, &config, None, None).unwrap();
        assert_eq!(result.page_failures.len(), 1);
        assert!(matches!(result.page_failures[0].error, Error::OcrUnavailable(_)));
    }
}
