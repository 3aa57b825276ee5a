//! External collaborators.
//!
//! The engine is a pure transformation from glyphs to Markdown. It never
//! parses a PDF, rasterizes a page, or calls a vision model itself — those
//! are external collaborators reached through the thin traits in this
//! module. Only the input/output contract is specified here; an
//! implementation lives in the host application.

use crate::error::{Error, Result};
use crate::glyph::Glyph;

/// Text layout direction for a line, as reported by the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WritingMode {
    /// Left-to-right horizontal text (the only mode the engine reconstructs
    /// structure for; other modes are passed through as opaque lines).
    Horizontal,
    /// Top-to-bottom vertical text.
    Vertical,
}

/// One event in a page's glyph stream.
///
/// Ordering is the shaper's visual reading order; the engine never reorders
/// glyphs within a line.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum GlyphEvent {
    /// Marks the start of a new line.
    BeginLine {
        /// The line's writing mode.
        writing_mode: WritingMode,
    },
    /// One positioned character within the current line.
    Char(Glyph),
    /// Marks the end of the current line. An empty line (no `Char` events
    /// since the matching `BeginLine`) is dropped, not committed.
    EndLine,
}

/// The glyph stream and page geometry for a single page.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PageGlyphs {
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// The ordered glyph events for this page.
    pub events: Vec<GlyphEvent>,
}

/// Required external collaborator: delivers glyphs page by page.
///
/// Implementations wrap a PDF parser / text shaper. The engine consumes
/// pages in order; nothing about the trait requires random access.
pub trait GlyphSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fetch the glyph stream for one page.
    ///
    /// Returns [`crate::error::Error::PasswordRequired`] or
    /// [`crate::error::Error::PasswordIncorrect`] if the underlying document
    /// is encrypted; these are fatal and propagate immediately.
    fn page_glyphs(&mut self, page_index: usize) -> Result<PageGlyphs>;

    /// Rasterize a page for the OCR fallback.
    ///
    /// The default implementation reports OCR as unavailable; override it
    /// when the underlying PDF parser can render pixels. Called only when
    /// the core's OCR trigger fires (§6: near-empty glyph extraction, or OCR
    /// explicitly enabled).
    fn page_raster(&mut self, _page_index: usize) -> Result<RasterImage> {
        Err(Error::OcrUnavailable("glyph source cannot rasterize pages".to_string()))
    }
}

/// A rasterized region of a page, handed to the OCR adapter.
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// Raw pixel bytes, row-major, 8-bit grayscale.
    pub pixels: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Optional external collaborator: OCR for scanned or near-empty pages.
///
/// Called only when glyph extraction yields fewer than one character of text
/// for a page, or when OCR is explicitly requested. Failures surface as
/// [`crate::error::Error::OcrUnavailable`] and leave the page text empty;
/// they are not fatal to the document.
pub trait OcrAdapter {
    /// Recognize plain text from a rasterized page region.
    fn recognize(&self, image: &RasterImage, language: &str) -> Result<String>;
}

/// Advisory report from the Garbled-Font Heuristic (see [`crate::garbled`]).
///
/// The engine only *computes* this value; it never calls a vision model
/// itself. A host application may inspect `recommend` on a page's warnings
/// and substitute that page's Markdown with a vision-model transcription.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GarbledFontReport {
    /// Whether the host should consider reprocessing this page via a vision
    /// model.
    pub recommend: bool,
    /// Human-readable reason for the recommendation.
    pub reason: String,
    /// Percentage (0.0-100.0) of scanned characters that looked garbled.
    pub garbled_percentage: f32,
}
