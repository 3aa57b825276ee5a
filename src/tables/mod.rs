//! Table Detector (component 5 of the pipeline).
//!
//! Runs three independent strategies over a block's source lines — bordered
//! pipe tables, whitespace-aligned ASCII tables, and (when per-character
//! positions are available) column-clustered positioned rows — scores each
//! candidate [`Grid`] with a [`GridProfile`], and accepts the first strategy
//! whose score clears the gate.

mod ascii;
mod bordered;
mod positioned;
pub(crate) mod profile;

pub use profile::GridProfile;

/// A rectangular grid of cell strings. Every row has exactly `cols` cells.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Row-major cell text.
    pub rows: Vec<Vec<String>>,
    /// Column count (all rows share it).
    pub cols: usize,
    /// Fixed score bonus the producing strategy grants before profiling
    /// (e.g. the bordered strategy's `+2.0`).
    pub score_bonus: f32,
}

impl Grid {
    fn new(rows: Vec<Vec<String>>) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut r| {
                while r.len() < cols {
                    r.push(String::new());
                }
                r
            })
            .collect();
        Self { rows, cols, score_bonus: 0.0 }
    }
}

/// Column alignment, inferred per column from the fraction of numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Left-aligned (the default).
    Left,
    /// Right-aligned (numeric-dominant columns).
    Right,
}

/// Which strategy produced an accepted [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionType {
    /// Pipe-delimited rows (`|` or `¦`).
    Bordered,
    /// Whitespace-run-delimited rows.
    Ascii,
    /// Column-clustered positioned rows.
    Positioned,
}

/// A detected table, ready for Markdown emission.
#[derive(Debug, Clone)]
pub struct Table {
    /// Data rows (the first is flagged as a header by the caller's
    /// convention: row 0).
    pub rows: Vec<Vec<String>>,
    /// Per-column alignment.
    pub alignments: Vec<Alignment>,
    /// `min(1, score / 10)`.
    pub confidence: f32,
    /// Which strategy produced this table.
    pub detection_type: DetectionType,
    /// Source line range (inclusive) within the owning block's text.
    pub start_line: usize,
    /// Source line range (inclusive) within the owning block's text.
    pub end_line: usize,
}

/// One positioned glyph's x-coordinate and the row index it belongs to, fed
/// to the column-clustered strategy. `None` positions mean that per-glyph
/// coordinates are unavailable for that row and the positioned strategy is
/// skipped.
#[derive(Debug, Clone)]
pub struct PositionedRow {
    /// Cell text in reading order.
    pub cells: Vec<String>,
    /// X-coordinate of each cell's leftmost glyph.
    pub x_positions: Vec<f32>,
}

/// The horizontal gap between two consecutive glyphs must exceed this
/// multiple of font size to start a new cell (roughly the visual width of
/// two or three ordinary spaces).
const CELL_GAP_FONT_SIZE_RATIO: f32 = 1.2;

/// Derive per-cell x-positions straight from a block's lines, splitting each
/// line into cells wherever the horizontal gap between consecutive glyphs
/// exceeds [`CELL_GAP_FONT_SIZE_RATIO`]. Feeds the positioned strategy the
/// coordinates it needs without requiring a separate whitespace-delimited
/// text representation.
pub fn positioned_rows_from_lines(lines: &[crate::line::Line]) -> Vec<PositionedRow> {
    lines.iter().map(positioned_row_from_line).collect()
}

fn positioned_row_from_line(line: &crate::line::Line) -> PositionedRow {
    let mut cells = Vec::new();
    let mut x_positions = Vec::new();
    let mut current = String::new();
    let mut current_start_x: Option<f32> = None;
    let mut prev_x: Option<f32> = None;

    for glyph in &line.glyphs {
        let threshold = CELL_GAP_FONT_SIZE_RATIO * glyph.font_size.max(1.0);
        if let Some(prev) = prev_x {
            if glyph.origin.x - prev > threshold && !current.trim().is_empty() {
                cells.push(std::mem::take(&mut current).trim().to_string());
                x_positions.push(current_start_x.take().unwrap_or(glyph.origin.x));
            }
        }
        if current_start_x.is_none() {
            current_start_x = Some(glyph.origin.x);
        }
        current.push(glyph.char);
        prev_x = Some(glyph.origin.x);
    }
    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
        x_positions.push(current_start_x.unwrap_or(0.0));
    }

    PositionedRow { cells, x_positions }
}

/// Attempt to detect a table within `text` (a block's joined lines).
/// `positioned_rows`, if supplied, enables the third strategy.
///
/// Tries bordered, then ASCII, then positioned; the first to produce a
/// [`Grid`] whose [`GridProfile`] clears [`profile::accept`] wins.
pub fn detect_table(text: &str, positioned_rows: Option<&[PositionedRow]>) -> Option<Table> {
    let lines: Vec<&str> = text.lines().collect();

    if let Some(grid) = bordered::try_build(&lines) {
        if let Some(table) = accept(grid, DetectionType::Bordered, 0, lines.len().saturating_sub(1)) {
            return Some(table);
        }
    }

    if let Some(grid) = ascii::try_build(&lines) {
        if let Some(table) = accept(grid, DetectionType::Ascii, 0, lines.len().saturating_sub(1)) {
            return Some(table);
        }
    }

    if let Some(rows) = positioned_rows {
        if let Some(grid) = positioned::try_build(rows) {
            if let Some(table) = accept(grid, DetectionType::Positioned, 0, lines.len().saturating_sub(1)) {
                return Some(table);
            }
        }
    }

    None
}

fn accept(grid: Grid, detection_type: DetectionType, start_line: usize, end_line: usize) -> Option<Table> {
    let bonus = grid.score_bonus;
    let profile = GridProfile::compute(&grid);
    let score = profile.score(bonus);
    if !profile::accept(&profile, score) {
        return None;
    }

    let threshold = match detection_type {
        DetectionType::Positioned => 0.5,
        _ => 0.7,
    };
    let alignments = (0..grid.cols)
        .map(|col| {
            let non_header: Vec<&str> = grid
                .rows
                .iter()
                .skip(1)
                .filter_map(|r| r.get(col))
                .map(|s| s.as_str())
                .collect();
            if non_header.is_empty() {
                return Alignment::Left;
            }
            let numeric = non_header
                .iter()
                .filter(|c| crate::textstats::is_numeric_cell(c))
                .count();
            if numeric as f32 / non_header.len() as f32 >= threshold {
                Alignment::Right
            } else {
                Alignment::Left
            }
        })
        .collect();

    Some(Table {
        rows: grid.rows,
        alignments,
        confidence: (score / 10.0).min(1.0).max(0.0),
        detection_type,
        start_line,
        end_line,
    })
}

/// Cluster x-coordinates with a tolerance that grows with the number of
/// clusters already formed (`15 * clusterSize` pixels), used by the
/// positioned strategy.
pub(crate) fn cluster_x_positions(positions: &[f32]) -> Vec<f32> {
    let mut sorted: Vec<f32> = positions.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut centroids: Vec<(f32, usize)> = Vec::new();
    for x in sorted {
        let tolerance = 15.0 * (centroids.len().max(1) as f32);
        if let Some(last) = centroids.last_mut() {
            if (x - last.0 / last.1 as f32).abs() <= tolerance {
                last.0 += x;
                last.1 += 1;
                continue;
            }
        }
        centroids.push((x, 1));
    }
    centroids.into_iter().map(|(sum, n)| sum / n as f32).collect()
}

pub(crate) fn nearest_centroid(x: f32, centroids: &[f32]) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (x - **a).abs().partial_cmp(&(x - **b).abs()).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{GlyphEvent, WritingMode};
    use crate::geometry::Point;
    use crate::glyph::{FontStyle, FontWeight, Glyph};

    fn row_line(cells: &[(&str, f32)]) -> crate::line::Line {
        let mut events = vec![GlyphEvent::BeginLine { writing_mode: WritingMode::Horizontal }];
        for &(word, start_x) in cells {
            for (i, c) in word.chars().enumerate() {
                events.push(GlyphEvent::Char(Glyph::new(
                    c,
                    Point::new(start_x + i as f32 * 6.0, 700.0),
                    12.0,
                    "Times",
                    FontWeight::Normal,
                    FontStyle::Normal,
                )));
            }
        }
        events.push(GlyphEvent::EndLine);
        crate::line::build_lines(&events).pop().unwrap()
    }

    #[test]
    fn test_positioned_rows_from_lines_splits_on_wide_gaps() {
        let lines = vec![
            row_line(&[("Name", 10.0), ("Age", 200.0)]),
            row_line(&[("Alice", 10.0), ("30", 200.0)]),
        ];
        let rows = positioned_rows_from_lines(&lines);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec!["Name".to_string(), "Age".to_string()]);
        assert_eq!(rows[1].cells, vec!["Alice".to_string(), "30".to_string()]);
    }

    #[test]
    fn test_positioned_rows_from_lines_single_cell() {
        let lines = vec![row_line(&[("Hello", 10.0)])];
        let rows = positioned_rows_from_lines(&lines);
        assert_eq!(rows[0].cells, vec!["Hello".to_string()]);
        assert_eq!(rows[0].x_positions, vec![10.0]);
    }
}
