//! Block Classifier (component 4 of the pipeline).
//!
//! Labels each [`Block`] as `prose | prose-column | potential-table |
//! heading | list | code | unknown` using content heuristics. The tests are
//! evaluated in order; the first accepting test wins. Classification is a
//! total function: it never fails, it only ever returns a label.

use crate::layout::block_grouper::Block;
use crate::layout::body_size::heading_level_for_size;
use crate::textstats::{
    contains_sentence_punct, ends_with_sentence_punct, function_word_ratio, mean_word_length,
    whitespace_tokens,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_NUMBERED_LIST: Regex = Regex::new(r"^\d+[.)]\s").unwrap();
    static ref RE_FN_CALL: Regex = Regex::new(r"[A-Za-z_]\w*\s*\(").unwrap();
    static ref RE_ASSIGNMENT: Regex = Regex::new(r"^[A-Za-z_]\w*\s*=[^=]").unwrap();
    static ref RE_NUMERIC_CELL_TOKEN: Regex =
        Regex::new(r"^[+-]?[$€£¥]?\(?\d[\d,]*(\.\d+)?%?\)?$").unwrap();
}

/// The fixed bullet glyph set recognized by the List test (§4.4).
const BULLET_CHARS: &[char] = &[
    '-', '\u{2022}', '\u{25cf}', '\u{25cb}', '\u{25e6}', '\u{25aa}', '\u{25b8}', '\u{25ba}',
    '\u{25c6}', '\u{2713}', '\u{2717}', '\u{2605}', '\u{2606}',
];

const CODE_KEYWORDS: &[&str] = &["if", "else", "for", "while", "return", "function", "def", "class", "import", "from"];

/// The classification label assigned to a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// Single-column (or not-yet-determined) prose paragraph.
    Prose,
    /// Prose relabeled because the page is multi-column (§4.4 final rule).
    ProseColumn,
    /// A block that warrants the Table Detector's attention.
    PotentialTable,
    /// A heading, with its level (1, 2, or 3).
    Heading(u8),
    /// A list (bulleted or numbered).
    List,
    /// Source code or a code-like fragment.
    Code,
    /// None of the above tests accepted the block confidently.
    Unknown,
}

/// A [`Block`] plus its classification.
#[derive(Debug, Clone)]
pub struct ClassifiedBlock {
    /// The underlying block.
    pub block: Block,
    /// The assigned type.
    pub block_type: BlockType,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Index of the column this block belongs to.
    pub column_index: usize,
}

/// Whether `text` (already left-trimmed by the caller) begins with one of
/// the recognized bullet glyphs, or the Unicode dingbat/bullet range
/// U+2022–U+2043.
pub fn starts_with_bullet(trimmed: &str) -> bool {
    match trimmed.chars().next() {
        Some(c) if BULLET_CHARS.contains(&c) => true,
        Some(c) => ('\u{2022}'..='\u{2043}').contains(&c),
        None => false,
    }
}

fn is_list_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    starts_with_bullet(trimmed) || RE_NUMBERED_LIST.is_match(trimmed)
}

fn is_code_line(line: &str) -> bool {
    let trimmed = line.trim();
    if matches!(trimmed, "{" | "}" | "(" | ")" | "[" | "]") {
        return true;
    }
    let first_word = trimmed.split_whitespace().next().unwrap_or("");
    if CODE_KEYWORDS.contains(&first_word) {
        return true;
    }
    if trimmed.ends_with(';') || trimmed.ends_with('{') {
        return true;
    }
    if line.starts_with("    ") {
        return true;
    }
    if RE_FN_CALL.is_match(trimmed) {
        return true;
    }
    if RE_ASSIGNMENT.is_match(trimmed) {
        return true;
    }
    false
}

fn is_heading(block: &Block, body_size: f32) -> bool {
    let text = block.text.trim();
    if block.lines.len() > 3 || text.chars().count() > 200 {
        return false;
    }
    if text.chars().count() > 50 && ends_with_sentence_punct(text) {
        return false;
    }
    let short_and_plain = text.chars().count() < 100 && !contains_sentence_punct(text);
    let larger_font = block.avg_font_size > body_size;
    short_and_plain || larger_font
}

/// Prose-score accumulation (§4.4).
fn prose_score(text: &str) -> f32 {
    let mut score: f32 = 0.0;

    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !sentences.is_empty() {
        let total_words: usize = sentences.iter().map(|s| whitespace_tokens(s).len()).sum();
        let mean_words_per_sentence = total_words as f32 / sentences.len() as f32;
        if (5.0..=30.0).contains(&mean_words_per_sentence) {
            score += 0.25;
        }
    }

    let fw_ratio = function_word_ratio(text);
    if fw_ratio >= 0.15 {
        score += 0.25;
    }
    if fw_ratio > 0.25 {
        score += 0.15;
    }

    let lines: Vec<&str> = text.lines().collect();
    if !lines.is_empty() {
        let ending_count = lines.iter().filter(|l| ends_with_sentence_punct(l)).count();
        if ending_count as f32 / lines.len() as f32 > 0.3 {
            score += 0.20;
        }
    }

    let mwl = mean_word_length(text);
    if (4.0..=8.0).contains(&mwl) {
        score += 0.15;
    }

    score
}

/// Table-score accumulation (§4.4).
fn table_score(text: &str) -> f32 {
    let mut score: f32 = 0.0;
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return 0.0;
    }

    if text.contains('|') {
        score += 0.4;
    }

    let short_cell_lines = lines
        .iter()
        .filter(|line| {
            let cells = whitespace_split_cells(line);
            if cells.is_empty() {
                return false;
            }
            let short = cells
                .iter()
                .filter(|c| c.chars().count() <= 20 && !c.contains(char::is_whitespace))
                .count();
            short as f32 >= cells.len() as f32 / 2.0
        })
        .count();
    if short_cell_lines as f32 / lines.len() as f32 >= 0.4 {
        score += 0.25;
    }

    let numeric_cell_lines = lines
        .iter()
        .filter(|line| whitespace_split_cells(line).iter().any(|c| RE_NUMERIC_CELL_TOKEN.is_match(c)))
        .count();
    if numeric_cell_lines as f32 / lines.len() as f32 >= 0.3 {
        score += 0.2;
    }

    if lines.len() > 1 {
        let cell_counts: Vec<usize> = lines.iter().map(|l| whitespace_split_cells(l).len()).collect();
        let matching = cell_counts
            .windows(2)
            .filter(|w| w[0] == w[1] && w[0] >= 2)
            .count();
        if matching as f32 / (lines.len() - 1) as f32 >= 0.6 {
            score += 0.15;
        }
    }

    let mean_len = lines.iter().map(|l| l.chars().count()).sum::<usize>() as f32 / lines.len() as f32;
    if mean_len > 100.0 {
        score -= 0.2;
    }

    score.max(0.0)
}

fn whitespace_split_cells(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Classify one block. `body_size` comes from
/// [`crate::layout::body_size::compute_body_size`]; `is_multi_column`
/// indicates whether the page as a whole was determined to have multiple
/// columns (§4.2).
pub fn classify(block: Block, body_size: f32, is_multi_column: bool, column_index: usize) -> ClassifiedBlock {
    let list_lines = block.lines.iter().filter(|l| is_list_line(&l.text)).count();
    if list_lines as f32 / block.lines.len() as f32 >= 0.6 {
        return ClassifiedBlock {
            confidence: list_lines as f32 / block.lines.len() as f32,
            block,
            block_type: BlockType::List,
            column_index,
        };
    }

    let code_lines = block.lines.iter().filter(|l| is_code_line(&l.text)).count();
    if code_lines as f32 / block.lines.len() as f32 >= 0.5 {
        return ClassifiedBlock {
            confidence: code_lines as f32 / block.lines.len() as f32,
            block,
            block_type: BlockType::Code,
            column_index,
        };
    }

    if is_heading(&block, body_size) {
        let level = heading_level_for_size(block.avg_font_size, body_size).unwrap_or(3);
        return ClassifiedBlock {
            confidence: 1.0,
            block,
            block_type: BlockType::Heading(level),
            column_index,
        };
    }

    let prose = prose_score(&block.text);
    let table = table_score(&block.text);

    let is_clear_prose = prose >= 0.7 && table < 0.3;
    let is_clear_table = table >= 0.6 && prose < 0.4;

    let (block_type, confidence) = if is_clear_table && !is_clear_prose {
        (BlockType::PotentialTable, table)
    } else if is_clear_prose || prose >= table {
        (BlockType::Prose, prose)
    } else {
        (BlockType::PotentialTable, table)
    };

    let block_type = match block_type {
        BlockType::Prose if is_multi_column => BlockType::ProseColumn,
        other => other,
    };

    ClassifiedBlock {
        block,
        block_type,
        confidence,
        column_index,
    }
}

/// Merge adjacent regions of identical type within the same column:
/// expands the bbox, joins the text, and averages confidence.
pub fn merge_adjacent(blocks: Vec<ClassifiedBlock>) -> Vec<ClassifiedBlock> {
    let mut merged: Vec<ClassifiedBlock> = Vec::new();
    for cb in blocks {
        if let Some(last) = merged.last_mut() {
            if last.column_index == cb.column_index
                && std::mem::discriminant(&last.block_type) == std::mem::discriminant(&cb.block_type)
            {
                last.block.bbox = last.block.bbox.union(&cb.block.bbox);
                last.block.text = format!("{}\n{}", last.block.text, cb.block.text);
                last.block.lines.extend(cb.block.lines);
                last.confidence = (last.confidence + cb.confidence) / 2.0;
                continue;
            }
        }
        merged.push(cb);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block_grouper::group_blocks;

    fn block_from(text: &str, font_size: f32) -> Block {
        let mut lines = Vec::new();
        let mut y = 700.0;
        for line_text in text.lines() {
            let mut events = vec![crate::adapters::GlyphEvent::BeginLine {
                writing_mode: crate::adapters::WritingMode::Horizontal,
            }];
            for (i, c) in line_text.chars().enumerate() {
                events.push(crate::adapters::GlyphEvent::Char(crate::glyph::Glyph::new(
                    c,
                    crate::geometry::Point::new(i as f32 * 6.0, y),
                    font_size,
                    "Times",
                    crate::glyph::FontWeight::Normal,
                    crate::glyph::FontStyle::Normal,
                )));
            }
            events.push(crate::adapters::GlyphEvent::EndLine);
            lines.extend(crate::line::build_lines(&events));
            y -= 14.0;
        }
        group_blocks(lines).remove(0)
    }

    #[test]
    fn test_list_classification() {
        let block = block_from("- first item\n- second item\n- third item", 12.0);
        let classified = classify(block, 12.0, false, 0);
        assert_eq!(classified.block_type, BlockType::List);
    }

    #[test]
    fn test_code_classification() {
        let block = block_from("if x == 1:\nfor i in range(10):\nreturn foo(x)", 12.0);
        let classified = classify(block, 12.0, false, 0);
        assert_eq!(classified.block_type, BlockType::Code);
    }

    #[test]
    fn test_heading_classification() {
        let block = block_from("Conclusion", 18.0);
        let classified = classify(block, 12.0, false, 0);
        assert!(matches!(classified.block_type, BlockType::Heading(_)));
    }

    #[test]
    fn test_prose_classification() {
        let block = block_from(
            "The committee reviewed the proposal and agreed that the plan was sound. They will report back to the board next month with a final recommendation.",
            12.0,
        );
        let classified = classify(block, 12.0, false, 0);
        assert_eq!(classified.block_type, BlockType::Prose);
    }

    #[test]
    fn test_prose_upgraded_to_prose_column_when_multi_column() {
        let block = block_from(
            "The committee reviewed the proposal and agreed that the plan was sound for everyone involved in the process.",
            12.0,
        );
        let classified = classify(block, 12.0, true, 0);
        assert_eq!(classified.block_type, BlockType::ProseColumn);
    }

    #[test]
    fn test_table_like_classification() {
        let block = block_from("Name | Age | City\nJohn | 30 | NYC\nJane | 25 | LA", 12.0);
        let classified = classify(block, 12.0, false, 0);
        assert_eq!(classified.block_type, BlockType::PotentialTable);
    }
}
