//! Block Grouper (component 3 of the pipeline).
//!
//! Within a column, groups lines separated by a small vertical gap into
//! blocks — the unit the Block Classifier and Table Detector operate on.

use crate::geometry::Rect;
use crate::line::Line;

/// The vertical gap between two lines may not exceed this multiple of their
/// mean font size for the lines to belong to the same block.
const MAX_GAP_FONT_SIZE_RATIO: f32 = 2.5;

/// A group of vertically adjacent lines within one column.
#[derive(Debug, Clone)]
pub struct Block {
    /// Lines in top-to-bottom order.
    pub lines: Vec<Line>,
    /// Bounding box of the block, extended vertically by one average font
    /// size so the last baseline is contained.
    pub bbox: Rect,
    /// Mean of the constituent lines' average font sizes.
    pub avg_font_size: f32,
    /// Lines joined by `\n`.
    pub text: String,
}

impl Block {
    fn from_lines(mut lines: Vec<Line>) -> Self {
        debug_assert!(!lines.is_empty());
        lines.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap());

        let min_x = lines
            .iter()
            .map(|l| l.min_x)
            .fold(f32::INFINITY, f32::min);
        let max_x = lines
            .iter()
            .map(|l| l.max_x)
            .fold(f32::NEG_INFINITY, f32::max);
        let min_y = lines.iter().map(|l| l.y).fold(f32::INFINITY, f32::min);
        let max_y = lines.iter().map(|l| l.y).fold(f32::NEG_INFINITY, f32::max);

        let avg_font_size =
            lines.iter().map(|l| l.avg_font_size).sum::<f32>() / lines.len() as f32;

        let bbox = Rect::from_points(min_x, min_y, max_x, max_y + avg_font_size);
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            lines,
            bbox,
            avg_font_size,
            text,
        }
    }

    /// Fraction of lines in the block carrying the bold weight majority.
    pub fn is_bold(&self) -> bool {
        let bold = self
            .lines
            .iter()
            .filter(|l| l.weight == crate::glyph::FontWeight::Bold)
            .count();
        bold * 2 > self.lines.len()
    }

    /// Fraction of lines in the block carrying the italic style majority.
    pub fn is_italic(&self) -> bool {
        let italic = self
            .lines
            .iter()
            .filter(|l| l.style == crate::glyph::FontStyle::Italic)
            .count();
        italic * 2 > self.lines.len()
    }
}

/// Group a column's lines into blocks.
///
/// Lines are sorted by y ascending first; a new block starts whenever the
/// vertical gap to the previous line exceeds `2.5 * mean(font sizes)`.
pub fn group_blocks(mut lines: Vec<Line>) -> Vec<Block> {
    if lines.is_empty() {
        return Vec::new();
    }

    lines.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap());

    let mut blocks = Vec::new();
    let mut current: Vec<Line> = vec![lines[0].clone()];

    for window in lines.windows(2) {
        let (prev, curr) = (&window[0], &window[1]);
        let gap = (curr.y - prev.y).abs();
        let mean_size = (prev.avg_font_size + curr.avg_font_size) / 2.0;
        if gap > MAX_GAP_FONT_SIZE_RATIO * mean_size {
            blocks.push(Block::from_lines(std::mem::take(&mut current)));
        }
        current.push(curr.clone());
    }
    if !current.is_empty() {
        blocks.push(Block::from_lines(current));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{GlyphEvent, WritingMode};
    use crate::geometry::Point;
    use crate::glyph::{FontStyle, FontWeight, Glyph};

    fn line_at(y: f32, size: f32) -> Line {
        let g = Glyph::new('x', Point::new(10.0, y), size, "Times", FontWeight::Normal, FontStyle::Normal);
        let mut lines = crate::line::build_lines(&[
            GlyphEvent::BeginLine { writing_mode: WritingMode::Horizontal },
            GlyphEvent::Char(g),
            GlyphEvent::EndLine,
        ]);
        lines.pop().unwrap()
    }

    #[test]
    fn test_adjacent_lines_merge() {
        let lines = vec![line_at(100.0, 12.0), line_at(114.0, 12.0), line_at(128.0, 12.0)];
        let blocks = group_blocks(lines);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines.len(), 3);
    }

    #[test]
    fn test_large_gap_splits_block() {
        let lines = vec![line_at(100.0, 12.0), line_at(114.0, 12.0), line_at(300.0, 12.0)];
        let blocks = group_blocks(lines);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_blocks(vec![]).is_empty());
    }

    #[test]
    fn test_text_joined_by_newline() {
        let lines = vec![line_at(100.0, 12.0), line_at(114.0, 12.0)];
        let blocks = group_blocks(lines);
        assert_eq!(blocks[0].text, "x\nx");
    }
}
