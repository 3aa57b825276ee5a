//! Paragraph merging: the five ordered continuation rules from §4.7, and
//! bold/italic propagation.

use crate::config::EngineConfig;
use crate::layout::classifier::ClassifiedBlock;
use crate::mathtext;
use crate::textstats::{ends_with_sentence_punct, FUNCTION_WORDS};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_LABEL: Regex = Regex::new(r"^[A-Z][A-Za-z]*(\s+[A-Z][A-Za-z]*)*:\s").unwrap();
}

fn is_content_word(word: &str) -> bool {
    !FUNCTION_WORDS.contains(word.to_lowercase().as_str())
}

fn starts_with_capital(text: &str) -> bool {
    text.trim_start().chars().next().is_some_and(|c| c.is_uppercase())
}

/// Whether `current` should be merged into the same paragraph as `previous`,
/// applying the five rules in order.
fn should_merge(previous: &ClassifiedBlock, current: &ClassifiedBlock) -> bool {
    let current_text = current.block.text.trim_start();

    // Rule 1: never merge a label-prefixed line.
    if RE_LABEL.is_match(current_text) {
        return false;
    }

    let prev_text = previous.block.text.trim_end();
    let prev_ends_sentence = ends_with_sentence_punct(prev_text);
    let current_starts_capital = starts_with_capital(current_text);

    // Rule 2.
    if prev_ends_sentence && current_starts_capital {
        return false;
    }

    // Rule 3.
    if let Some(last_word) = prev_text.split_whitespace().last() {
        let trimmed_word: String = last_word.chars().filter(|c| c.is_alphanumeric()).collect();
        if !trimmed_word.is_empty() && is_content_word(&trimmed_word) && current_starts_capital {
            return false;
        }
    }

    // Rule 4: always merge.
    if let Some(first_char) = current_text.chars().next() {
        if first_char.is_lowercase()
            || matches!(first_char, ',' | ';' | ':' | '-' | '\u{2019}' | '\u{201d}' | ')')
        {
            return true;
        }
    }

    // Rule 5: merge when the vertical gap is small relative to line height.
    let gap = (current.block.bbox.y - previous.block.bbox.bottom()).abs();
    let line_height = previous.block.avg_font_size.max(1.0);
    gap < 1.5 * line_height
}

/// Apply bold/italic propagation to a single block's text: wrap the whole
/// block in `**...**`, `*...*`, or `***...***` when the majority of its
/// lines carry that attribute.
fn format_emphasis(text: &str, bold: bool, italic: bool) -> String {
    match (bold, italic) {
        (true, true) => format!("***{text}***"),
        (true, false) => format!("**{text}**"),
        (false, true) => format!("*{text}*"),
        (false, false) => text.to_string(),
    }
}

/// Render a single block's text: emphasis-wrapped, with math segments
/// rendered as LaTeX when math is enabled.
pub fn render_text(text: &str, bold: bool, italic: bool, config: &EngineConfig) -> String {
    let body = if config.enable_math {
        mathtext::segment(text)
            .into_iter()
            .map(|seg| seg.text)
            .collect::<Vec<_>>()
            .join("")
    } else {
        text.to_string()
    };
    format_emphasis(&body, bold, italic)
}

/// Render a run of consecutive prose blocks as one paragraph, merging
/// adjacent blocks per the continuation rules and joining non-merged runs
/// with a blank line.
pub fn render_merged(blocks: &[&ClassifiedBlock], config: &EngineConfig) -> String {
    let mut paragraphs: Vec<Vec<&ClassifiedBlock>> = Vec::new();

    for &block in blocks {
        if let Some(last_para) = paragraphs.last_mut() {
            let previous = *last_para.last().unwrap();
            if should_merge(previous, block) {
                last_para.push(block);
                continue;
            }
        }
        paragraphs.push(vec![block]);
    }

    paragraphs
        .into_iter()
        .map(|para| {
            para.iter()
                .map(|cb| {
                    render_text(
                        cb.block.text.trim(),
                        cb.block.is_bold(),
                        cb.block.is_italic(),
                        config,
                    )
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block_grouper::{group_blocks, Block};
    use crate::layout::classifier::BlockType;

    fn block(text: &str, y: f32) -> Block {
        let mut events = vec![crate::adapters::GlyphEvent::BeginLine {
            writing_mode: crate::adapters::WritingMode::Horizontal,
        }];
        for (i, c) in text.chars().enumerate() {
            events.push(crate::adapters::GlyphEvent::Char(crate::glyph::Glyph::new(
                c,
                crate::geometry::Point::new(i as f32 * 6.0, y),
                12.0,
                "Times",
                crate::glyph::FontWeight::Normal,
                crate::glyph::FontStyle::Normal,
            )));
        }
        events.push(crate::adapters::GlyphEvent::EndLine);
        let lines = crate::line::build_lines(&events);
        group_blocks(lines).remove(0)
    }

    fn classified(b: Block) -> ClassifiedBlock {
        ClassifiedBlock {
            block: b,
            block_type: BlockType::Prose,
            confidence: 1.0,
            column_index: 0,
        }
    }

    #[test]
    fn test_rule4_always_merges_lowercase_continuation() {
        let previous = classified(block("The report found that", 700.0));
        let current = classified(block("the results were positive.", 686.0));
        assert!(should_merge(&previous, &current));
    }

    #[test]
    fn test_rule2_never_merges_after_sentence_end_with_capital() {
        let previous = classified(block("The report concluded.", 700.0));
        let current = classified(block("Another study found otherwise.", 686.0));
        assert!(!should_merge(&previous, &current));
    }

    #[test]
    fn test_rule1_never_merges_label() {
        let previous = classified(block("The summary follows below", 700.0));
        let current = classified(block("Gaza: ongoing conflict reported widely", 686.0));
        assert!(!should_merge(&previous, &current));
    }
}
