//! Layout analysis: turns a page's lines into a classified, column-aware
//! structure ready for table detection, math segmentation, and emission.

pub mod block_grouper;
pub mod body_size;
pub mod classifier;
pub mod column_detector;

use crate::error::Result;
use crate::line::Line;
use classifier::{merge_adjacent, ClassifiedBlock};

/// The fully analyzed layout of one page: its columns, the classified
/// blocks within them, and whether the page reads as multi-column.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Classified blocks in reading order (column-major: column 0 top to
    /// bottom, then column 1, etc).
    pub blocks: Vec<ClassifiedBlock>,
    /// Whether the Column Detector found more than one column.
    pub is_multi_column: bool,
    /// Page width as supplied by the glyph source.
    pub page_width: f32,
    /// Page height as supplied by the glyph source.
    pub page_height: f32,
}

/// Run components 2–4 (Column Detector, Block Grouper, Block Classifier)
/// over one page's lines.
pub fn analyze_page(
    lines: Vec<Line>,
    page_width: f32,
    page_height: f32,
    page_index: usize,
) -> Result<PageLayout> {
    let columns = column_detector::detect_columns(lines, page_width, page_index)?;
    let is_multi_column = columns.len() > 1;

    let body_size = {
        let all_lines: Vec<Line> = columns.iter().flat_map(|c| c.lines.iter().cloned()).collect();
        body_size::compute_body_size(&all_lines)
    };

    let mut blocks = Vec::new();
    for (column_index, column) in columns.into_iter().enumerate() {
        let column_blocks = block_grouper::group_blocks(column.lines);
        let classified: Vec<ClassifiedBlock> = column_blocks
            .into_iter()
            .map(|b| classifier::classify(b, body_size, is_multi_column, column_index))
            .collect();
        blocks.extend(merge_adjacent(classified));
    }

    Ok(PageLayout {
        blocks,
        is_multi_column,
        page_width,
        page_height,
    })
}
