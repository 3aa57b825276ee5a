//! Final document statistics (§4.8), computed on the normalized Markdown.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref RE_HEADING: Regex = Regex::new(r"(?m)^#+\s+.+$").unwrap();
    static ref RE_IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();
    static ref RE_LIST_ITEM: Regex = Regex::new(r"(?m)^\s*(-|\d+[.)])\s+.+$").unwrap();
    static ref RE_MARKDOWN_SYNTAX: Regex =
        Regex::new(r"[#*`_|]|!\[[^\]]*\]\([^)]*\)|\[[^\]]*\]\([^)]*\)").unwrap();
}

/// Document-wide statistics attached to the final output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Word count after stripping Markdown syntax.
    pub word_count: usize,
    /// Count of heading lines (`^#+\s+.+$`).
    pub heading_count: usize,
    /// Count of tables, counted as consecutive pipe-row runs.
    pub table_count: usize,
    /// Count of list items (leading bullet or numbered marker).
    pub list_item_count: usize,
    /// Count of Markdown images.
    pub image_count: usize,
    /// Number of source pages.
    pub page_count: usize,
}

fn count_tables(text: &str) -> usize {
    let mut count = 0;
    let mut in_run = false;
    for line in text.lines() {
        let has_pipe = line.contains('|');
        if has_pipe && !in_run {
            count += 1;
            in_run = true;
        } else if !has_pipe {
            in_run = false;
        }
    }
    count
}

/// Compute statistics over the final Markdown.
pub fn compute(text: &str, page_count: usize) -> DocumentStats {
    let heading_count = RE_HEADING.find_iter(text).count();
    let table_count = count_tables(text);
    let list_item_count = RE_LIST_ITEM.find_iter(text).count();
    let image_count = RE_IMAGE.find_iter(text).count();
    let stripped = RE_MARKDOWN_SYNTAX.replace_all(text, " ");
    let word_count = stripped.split_whitespace().count();

    DocumentStats {
        word_count,
        heading_count,
        table_count,
        list_item_count,
        image_count,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_headings_and_words() {
        let md = "# Title\n\nThis is a paragraph with five words.";
        let stats = compute(md, 1);
        assert_eq!(stats.heading_count, 1);
        assert!(stats.word_count >= 8);
    }

    #[test]
    fn test_counts_list_items() {
        let md = "- one\n- two\n1. three";
        let stats = compute(md, 1);
        assert_eq!(stats.list_item_count, 3);
    }

    #[test]
    fn test_counts_table_run() {
        let md = "| a | b |\n| - | - |\n| 1 | 2 |\n\nProse after.";
        let stats = compute(md, 1);
        assert_eq!(stats.table_count, 1);
    }
}
