//! Body-size computation shared by the Block Classifier's heading test and
//! the Structured-Text Emitter's heading-level assignment (§4.7).

use crate::line::Line;
use std::collections::HashMap;

/// Heading level thresholds, expressed as a multiple of the body font size.
pub const LEVEL_1_RATIO: f32 = 1.5;
/// See [`LEVEL_1_RATIO`].
pub const LEVEL_2_RATIO: f32 = 1.25;
/// See [`LEVEL_1_RATIO`].
pub const LEVEL_3_RATIO: f32 = 1.1;

/// Compute the page's body font size: the font size (rounded to the
/// nearest 0.5pt) owning the greatest total character count across the
/// page's lines.
///
/// Returns `12.0` (a conservative default) if `lines` is empty.
pub fn compute_body_size(lines: &[Line]) -> f32 {
    if lines.is_empty() {
        return 12.0;
    }

    let mut totals: HashMap<i32, usize> = HashMap::new();
    for line in lines {
        let bucket = (line.avg_font_size * 2.0).round() as i32;
        *totals.entry(bucket).or_insert(0) += line.text.chars().count();
    }

    totals
        .into_iter()
        .max_by_key(|&(_, count)| count)
        .map(|(bucket, _)| bucket as f32 / 2.0)
        .unwrap_or(12.0)
}

/// Map a font size to a heading level (1, 2, or 3) relative to the body
/// size, or `None` if it doesn't clear the level-3 threshold.
pub fn heading_level_for_size(font_size: f32, body_size: f32) -> Option<u8> {
    if body_size <= 0.0 {
        return None;
    }
    let ratio = font_size / body_size;
    if ratio >= LEVEL_1_RATIO {
        Some(1)
    } else if ratio >= LEVEL_2_RATIO {
        Some(2)
    } else if ratio >= LEVEL_3_RATIO {
        Some(3)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{GlyphEvent, WritingMode};
    use crate::geometry::Point;
    use crate::glyph::{FontStyle, FontWeight, Glyph};

    fn line_with_size(text: &str, size: f32, y: f32) -> Line {
        let mut events = vec![GlyphEvent::BeginLine { writing_mode: WritingMode::Horizontal }];
        for (i, c) in text.chars().enumerate() {
            events.push(GlyphEvent::Char(Glyph::new(
                c,
                Point::new(i as f32 * 8.0, y),
                size,
                "Times",
                FontWeight::Normal,
                FontStyle::Normal,
            )));
        }
        events.push(GlyphEvent::EndLine);
        crate::line::build_lines(&events).pop().unwrap()
    }

    #[test]
    fn test_body_size_picks_majority() {
        let lines = vec![
            line_with_size("A title here", 24.0, 700.0),
            line_with_size("Body text one that is long", 12.0, 680.0),
            line_with_size("Body text two that is long", 12.0, 660.0),
            line_with_size("Body text three that is long", 12.0, 640.0),
        ];
        assert_eq!(compute_body_size(&lines), 12.0);
    }

    #[test]
    fn test_heading_level_thresholds() {
        assert_eq!(heading_level_for_size(18.0, 12.0), Some(1));
        assert_eq!(heading_level_for_size(15.0, 12.0), Some(2));
        assert_eq!(heading_level_for_size(13.2, 12.0), Some(3));
        assert_eq!(heading_level_for_size(12.0, 12.0), None);
    }
}
