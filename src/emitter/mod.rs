//! Structured-Text Emitter (component 7 of the pipeline).
//!
//! Walks a page's classified blocks in reading order and emits Markdown,
//! merging consecutive prose blocks into paragraphs per the continuation
//! rules and normalizing list/heading/code syntax.

mod paragraph;

use crate::config::EngineConfig;
use crate::layout::classifier::BlockType;
use crate::layout::classifier::ClassifiedBlock;
use crate::tables::Table;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_NUMBERED_ITEM: Regex = Regex::new(r"^\s*(\d+)[.)]\s+(.*)$").unwrap();
}

/// Emission state, mirroring the pipeline's own small state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InParagraph,
    InList,
    InCode,
}

/// Emit one page's blocks as Markdown.
///
/// `tables`, if supplied, maps a block's index (within `blocks`) to a
/// detected [`Table`] that should be rendered instead of the block's raw
/// text (used when the block was classified `potential-table` and the
/// Table Detector accepted it).
pub fn emit_page(
    blocks: &[ClassifiedBlock],
    config: &EngineConfig,
    tables: &std::collections::HashMap<usize, Table>,
) -> String {
    let mut out = String::new();
    let mut state = State::Idle;
    let mut paragraph_buf: Vec<&ClassifiedBlock> = Vec::new();

    let flush_paragraph = |buf: &mut Vec<&ClassifiedBlock>, out: &mut String| {
        if buf.is_empty() {
            return;
        }
        if !out.is_empty() {
            out.push('\n');
            out.push('\n');
        }
        out.push_str(&paragraph::render_merged(buf, config));
        buf.clear();
    };

    for (index, cb) in blocks.iter().enumerate() {
        match &cb.block_type {
            BlockType::List => {
                flush_paragraph(&mut paragraph_buf, &mut out);
                if state != State::InList && !out.is_empty() {
                    out.push('\n');
                    out.push('\n');
                }
                render_list(cb, &mut out);
                state = State::InList;
            },
            BlockType::Code => {
                flush_paragraph(&mut paragraph_buf, &mut out);
                if !out.is_empty() {
                    out.push('\n');
                    out.push('\n');
                }
                render_code(cb, config, &mut out);
                state = State::InCode;
            },
            BlockType::Heading(level) => {
                flush_paragraph(&mut paragraph_buf, &mut out);
                if !out.is_empty() {
                    out.push('\n');
                    out.push('\n');
                }
                render_heading(cb, *level, &mut out);
                state = State::Idle;
            },
            BlockType::PotentialTable => {
                flush_paragraph(&mut paragraph_buf, &mut out);
                if !out.is_empty() {
                    out.push('\n');
                    out.push('\n');
                }
                if let Some(table) = tables.get(&index) {
                    render_table(table, &mut out);
                } else {
                    out.push_str(&paragraph::render_text(&cb.block.text, cb.block.is_bold(), cb.block.is_italic(), config));
                }
                state = State::Idle;
            },
            BlockType::Prose | BlockType::ProseColumn | BlockType::Unknown => {
                paragraph_buf.push(cb);
                state = State::InParagraph;
            },
        }
    }
    flush_paragraph(&mut paragraph_buf, &mut out);

    if !config.preserve_layout {
        collapse_blank_runs(&out)
    } else {
        out
    }
}

fn render_list(cb: &ClassifiedBlock, out: &mut String) {
    let lines: Vec<String> = cb
        .block
        .lines
        .iter()
        .map(|l| normalize_list_line(&l.text))
        .collect();
    out.push_str(&lines.join("\n"));
}

fn normalize_list_line(text: &str) -> String {
    let trimmed = text.trim_start();
    if let Some(caps) = RE_NUMBERED_ITEM.captures(trimmed) {
        return format!("{}. {}", &caps[1], caps[2].trim());
    }
    if crate::layout::classifier::starts_with_bullet(trimmed) {
        let rest: String = trimmed.chars().skip(1).collect();
        return format!("- {}", rest.trim_start());
    }
    format!("- {}", trimmed)
}

fn render_code(cb: &ClassifiedBlock, config: &EngineConfig, out: &mut String) {
    if config.fence_code {
        out.push_str("```\n");
        out.push_str(&cb.block.text);
        out.push_str("\n```");
    } else {
        out.push_str(&cb.block.text);
    }
}

fn render_heading(cb: &ClassifiedBlock, level: u8, out: &mut String) {
    let hashes = "#".repeat(level as usize);
    out.push_str(&hashes);
    out.push(' ');
    out.push_str(cb.block.text.trim());
}

fn render_table(table: &Table, out: &mut String) {
    if table.rows.is_empty() {
        return;
    }
    let header = &table.rows[0];
    out.push_str("| ");
    out.push_str(&header.join(" | "));
    out.push_str(" |\n|");
    for alignment in &table.alignments {
        match alignment {
            crate::tables::Alignment::Right => out.push_str(" ---: |"),
            crate::tables::Alignment::Left => out.push_str(" --- |"),
        }
    }
    for row in &table.rows[1..] {
        out.push('\n');
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |");
    }
}

fn collapse_blank_runs(text: &str) -> String {
    lazy_static! {
        static ref RE_BLANK_RUN: Regex = Regex::new(r"\n{3,}").unwrap();
    }
    RE_BLANK_RUN.replace_all(text, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block_grouper::group_blocks;

    fn block_from(text: &str, font_size: f32, block_type: BlockType) -> ClassifiedBlock {
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
        let block = group_blocks(lines).remove(0);
        ClassifiedBlock {
            block,
            block_type,
            confidence: 1.0,
            column_index: 0,
        }
    }

    #[test]
    fn test_emit_heading_and_prose() {
        let blocks = vec![
            block_from("Introduction", 18.0, BlockType::Heading(1)),
            block_from("This is the opening paragraph of the document.", 12.0, BlockType::Prose),
        ];
        let config = EngineConfig::default();
        let md = emit_page(&blocks, &config, &std::collections::HashMap::new());
        assert!(md.starts_with("# Introduction"));
        assert!(md.contains("This is the opening paragraph"));
    }

    #[test]
    fn test_emit_list_normalizes_bullets() {
        let blocks = vec![block_from("\u{2022} one\n\u{2022} two", 12.0, BlockType::List)];
        let config = EngineConfig::default();
        let md = emit_page(&blocks, &config, &std::collections::HashMap::new());
        assert_eq!(md, "- one\n- two");
    }

    #[test]
    fn test_emit_code_fenced() {
        let blocks = vec![block_from("if x:\n    return 1", 12.0, BlockType::Code)];
        let config = EngineConfig::default();
        let md = emit_page(&blocks, &config, &std::collections::HashMap::new());
        assert!(md.starts_with("```\n"));
        assert!(md.ends_with("```"));
    }
}
