//! Glyph Line Builder (component 1 of the pipeline).
//!
//! Groups the incoming per-character records into lines with bounding boxes
//! and average font size. No reordering is performed: reading order within
//! a line is the shaper's order.

use crate::adapters::{GlyphEvent, WritingMode};
use crate::glyph::{FontStyle, FontWeight, Glyph};

/// One line of text: an ordered run of glyphs from a single `BeginLine` /
/// `EndLine` framing pair.
#[derive(Debug, Clone)]
pub struct Line {
    /// Glyphs in reading order (left-to-right within the line).
    pub glyphs: Vec<Glyph>,
    /// Baseline y-coordinate (the first glyph's origin y).
    pub y: f32,
    /// Leftmost x-coordinate of any glyph's origin.
    pub min_x: f32,
    /// Rightmost x-coordinate of any glyph's origin.
    pub max_x: f32,
    /// Character-count-weighted mean font size.
    pub avg_font_size: f32,
    /// Majority font weight by character count.
    pub weight: FontWeight,
    /// Majority font style by character count.
    pub style: FontStyle,
    /// The writing mode reported for this line.
    pub writing_mode: WritingMode,
    /// The glyph characters concatenated in input order.
    pub text: String,
}

impl Line {
    fn from_glyphs(glyphs: Vec<Glyph>, writing_mode: WritingMode) -> Self {
        debug_assert!(!glyphs.is_empty());

        let y = glyphs[0].origin.y;
        let min_x = glyphs
            .iter()
            .map(|g| g.origin.x)
            .fold(f32::INFINITY, f32::min);
        let max_x = glyphs
            .iter()
            .map(|g| g.origin.x)
            .fold(f32::NEG_INFINITY, f32::max);

        let total_chars = glyphs.len() as f32;
        let avg_font_size = glyphs.iter().map(|g| g.font_size).sum::<f32>() / total_chars;

        let bold_count = glyphs
            .iter()
            .filter(|g| g.weight == FontWeight::Bold)
            .count();
        let weight = if bold_count * 2 > glyphs.len() {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        };

        let italic_count = glyphs
            .iter()
            .filter(|g| g.style == FontStyle::Italic)
            .count();
        let style = if italic_count * 2 > glyphs.len() {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        };

        let text: String = glyphs.iter().map(|g| g.char).collect();

        Self {
            glyphs,
            y,
            min_x,
            max_x,
            avg_font_size,
            weight,
            style,
            writing_mode,
            text,
        }
    }

    /// Whether the line begins with a bullet glyph.
    ///
    /// Recognizes the bullet set from §4.4 test 1 plus the U+2022–U+2043
    /// general punctuation dingbat range.
    pub fn starts_with_bullet(&self) -> bool {
        crate::layout::classifier::starts_with_bullet(self.text.trim_start())
    }
}

/// Builds [`Line`]s from a flat stream of [`GlyphEvent`]s.
///
/// On `BeginLine`, starts buffering. On `Char`, appends to the buffer. On
/// `EndLine`, commits the buffered line if non-empty (an empty line, i.e. a
/// `BeginLine` immediately followed by `EndLine`, is dropped rather than
/// committed — there is nothing to build a bounding box or average font
/// size from).
pub fn build_lines(events: &[GlyphEvent]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();
    let mut current_mode = WritingMode::Horizontal;

    for event in events {
        match event {
            GlyphEvent::BeginLine { writing_mode } => {
                current.clear();
                current_mode = *writing_mode;
            },
            GlyphEvent::Char(glyph) => {
                current.push(glyph.clone());
            },
            GlyphEvent::EndLine => {
                if !current.is_empty() {
                    lines.push(Line::from_glyphs(std::mem::take(&mut current), current_mode));
                }
            },
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::glyph::{FontStyle, FontWeight, Glyph};

    fn glyph(c: char, x: f32, size: f32, weight: FontWeight) -> Glyph {
        Glyph::new(c, Point::new(x, 700.0), size, "Times", weight, FontStyle::Normal)
    }

    #[test]
    fn test_build_lines_basic() {
        let events = vec![
            GlyphEvent::BeginLine {
                writing_mode: WritingMode::Horizontal,
            },
            GlyphEvent::Char(glyph('H', 0.0, 12.0, FontWeight::Normal)),
            GlyphEvent::Char(glyph('i', 10.0, 12.0, FontWeight::Normal)),
            GlyphEvent::EndLine,
        ];

        let lines = build_lines(&events);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hi");
        assert_eq!(lines[0].min_x, 0.0);
        assert_eq!(lines[0].max_x, 10.0);
        assert_eq!(lines[0].avg_font_size, 12.0);
    }

    #[test]
    fn test_empty_line_dropped() {
        let events = vec![
            GlyphEvent::BeginLine {
                writing_mode: WritingMode::Horizontal,
            },
            GlyphEvent::EndLine,
        ];
        assert!(build_lines(&events).is_empty());
    }

    #[test]
    fn test_majority_bold() {
        let events = vec![
            GlyphEvent::BeginLine {
                writing_mode: WritingMode::Horizontal,
            },
            GlyphEvent::Char(glyph('A', 0.0, 12.0, FontWeight::Bold)),
            GlyphEvent::Char(glyph('B', 10.0, 12.0, FontWeight::Bold)),
            GlyphEvent::Char(glyph('C', 20.0, 12.0, FontWeight::Normal)),
            GlyphEvent::EndLine,
        ];
        let lines = build_lines(&events);
        assert_eq!(lines[0].weight, FontWeight::Bold);
    }

    #[test]
    fn test_no_reordering() {
        // Glyphs are appended in input order even if x is not monotonic;
        // the builder trusts the shaper's order.
        let events = vec![
            GlyphEvent::BeginLine {
                writing_mode: WritingMode::Horizontal,
            },
            GlyphEvent::Char(glyph('b', 10.0, 12.0, FontWeight::Normal)),
            GlyphEvent::Char(glyph('a', 0.0, 12.0, FontWeight::Normal)),
            GlyphEvent::EndLine,
        ];
        let lines = build_lines(&events);
        assert_eq!(lines[0].text, "ba");
    }
}
