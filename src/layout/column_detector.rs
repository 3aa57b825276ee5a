//! Column Detector (component 2 of the pipeline).
//!
//! Builds an x-axis density histogram of line spans, finds the widest
//! whitespace gaps in it, and partitions the page's lines into 1..N
//! left-to-right columns.

use crate::error::{Error, Result};
use crate::line::Line;

/// Number of bins in the x-axis density histogram.
const HISTOGRAM_BINS: usize = 50;
/// A bin is a gap when its count falls below this fraction of the average.
const GAP_DENSITY_RATIO: f32 = 0.2;
/// A contiguous run of gap bins becomes a column boundary only once its
/// pixel width exceeds this fraction of the page width.
const MIN_GAP_WIDTH_RATIO: f32 = 0.03;
/// A column survives only if its width is at least this fraction of the
/// page width.
const MIN_COLUMN_WIDTH_RATIO: f32 = 0.20;

/// One column of the page, holding the lines assigned to it.
#[derive(Debug, Clone)]
pub struct Column {
    /// Left x-coordinate of the column.
    pub x: f32,
    /// Width of the column.
    pub width: f32,
    /// Lines assigned to this column, in their original order.
    pub lines: Vec<Line>,
}

/// Detect columns in a page's lines.
///
/// Fails with [`Error::DegenerateLayout`] only when `lines` is empty — every
/// other outcome (including "no gaps found") degrades gracefully to a
/// single full-width column.
pub fn detect_columns(lines: Vec<Line>, page_width: f32, page_index: usize) -> Result<Vec<Column>> {
    if lines.is_empty() {
        return Err(Error::DegenerateLayout(page_index));
    }
    if page_width <= 0.0 {
        return Ok(vec![Column {
            x: 0.0,
            width: 0.0,
            lines,
        }]);
    }

    let histogram = build_histogram(&lines, page_width);
    let avg_density: f32 = histogram.iter().sum::<f32>() / histogram.len() as f32;
    let gap_threshold = avg_density * GAP_DENSITY_RATIO;

    let bin_width = page_width / HISTOGRAM_BINS as f32;
    let min_gap_width = page_width * MIN_GAP_WIDTH_RATIO;

    let mut boundaries: Vec<f32> = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, &density) in histogram.iter().enumerate() {
        let is_gap = density < gap_threshold;
        match (is_gap, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                let run_width = (i - start) as f32 * bin_width;
                if run_width > min_gap_width {
                    boundaries.push((start as f32 + (i - start) as f32 / 2.0) * bin_width);
                }
                run_start = None;
            },
            _ => {},
        }
    }
    if let Some(start) = run_start {
        let run_width = (HISTOGRAM_BINS - start) as f32 * bin_width;
        if run_width > min_gap_width {
            boundaries.push((start as f32 + (HISTOGRAM_BINS - start) as f32 / 2.0) * bin_width);
        }
    }

    if boundaries.is_empty() {
        return Ok(vec![Column {
            x: 0.0,
            width: page_width,
            lines,
        }]);
    }

    let mut edges = vec![0.0];
    edges.extend(boundaries);
    edges.push(page_width);

    let min_column_width = page_width * MIN_COLUMN_WIDTH_RATIO;
    let mut columns = Vec::new();
    for window in edges.windows(2) {
        let (x0, x1) = (window[0], window[1]);
        let width = x1 - x0;
        if width < min_column_width {
            continue;
        }
        let column_lines: Vec<Line> = lines
            .iter()
            .filter(|l| {
                let center = (l.min_x + l.max_x) / 2.0;
                center >= x0 && center < x1
            })
            .cloned()
            .collect();
        if column_lines.is_empty() {
            continue;
        }
        log::debug!(
            "column_detector: page {}: column x=[{:.1},{:.1}) with {} lines",
            page_index,
            x0,
            x1,
            column_lines.len()
        );
        columns.push(Column {
            x: x0,
            width,
            lines: column_lines,
        });
    }

    if columns.is_empty() {
        return Ok(vec![Column {
            x: 0.0,
            width: page_width,
            lines,
        }]);
    }

    columns.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
    Ok(columns)
}

/// Build the x-axis density histogram: each line contributes +1 to every
/// bin its `[min_x, max_x]` span overlaps.
fn build_histogram(lines: &[Line], page_width: f32) -> [f32; HISTOGRAM_BINS] {
    let mut histogram = [0.0f32; HISTOGRAM_BINS];
    let bin_width = page_width / HISTOGRAM_BINS as f32;

    for line in lines {
        let start_bin = ((line.min_x / bin_width).floor().max(0.0) as usize).min(HISTOGRAM_BINS - 1);
        let end_bin = ((line.max_x / bin_width).floor().max(0.0) as usize).min(HISTOGRAM_BINS - 1);
        for bin in histogram.iter_mut().take(end_bin + 1).skip(start_bin) {
            *bin += 1.0;
        }
    }

    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::WritingMode;
    use crate::geometry::Point;
    use crate::glyph::{FontStyle, FontWeight, Glyph};

    fn line_at(min_x: f32, max_x: f32, y: f32) -> Line {
        let glyphs = vec![
            Glyph::new('x', Point::new(min_x, y), 12.0, "Times", FontWeight::Normal, FontStyle::Normal),
            Glyph::new('x', Point::new(max_x, y), 12.0, "Times", FontWeight::Normal, FontStyle::Normal),
        ];
        let mut l = crate::line::build_lines(&[
            crate::adapters::GlyphEvent::BeginLine { writing_mode: WritingMode::Horizontal },
            crate::adapters::GlyphEvent::Char(glyphs[0].clone()),
            crate::adapters::GlyphEvent::Char(glyphs[1].clone()),
            crate::adapters::GlyphEvent::EndLine,
        ]);
        l.pop().unwrap()
    }

    #[test]
    fn test_empty_lines_is_degenerate() {
        let result = detect_columns(vec![], 600.0, 0);
        assert!(matches!(result, Err(Error::DegenerateLayout(0))));
    }

    #[test]
    fn test_single_column_no_gap() {
        let lines = vec![line_at(50.0, 550.0, 700.0), line_at(50.0, 550.0, 680.0)];
        let columns = detect_columns(lines, 600.0, 0).unwrap();
        assert_eq!(columns.len(), 1);
    }

    #[test]
    fn test_two_column_layout() {
        // Left column occupies roughly the first half, right column the
        // second half, with a wide central gap.
        let mut lines = Vec::new();
        for i in 0..20 {
            let y = 750.0 - i as f32 * 10.0;
            lines.push(line_at(50.0, 280.0, y));
            lines.push(line_at(330.0, 560.0, y));
        }
        let columns = detect_columns(lines, 600.0, 0).unwrap();
        assert_eq!(columns.len(), 2);
        assert!(columns[0].x < columns[1].x);
    }
}
