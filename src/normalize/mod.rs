//! Cross-Page Normalizer (component 8 of the pipeline).
//!
//! Runs once over the whole document's concatenated Markdown: removes
//! repeating headers/footers, repairs hyphenation, defragments short lines,
//! merges orphaned bullet markers, and computes final [`DocumentStats`].

mod headers;
mod hyphenation;
mod stats;

pub use stats::DocumentStats;

use crate::config::EngineConfig;

/// Run the full normalization pass over per-page Markdown.
///
/// `page_count` is the number of pages the document had *before*
/// concatenation, used to gate header/footer detection (only runs when
/// `page_count >= 3`) and to populate [`DocumentStats::page_count`].
pub fn normalize(pages: Vec<String>, page_count: usize, config: &EngineConfig) -> (String, DocumentStats) {
    let pages = if config.remove_headers_footers && page_count >= 3 {
        headers::remove_headers_and_footers(pages)
    } else {
        pages
    };

    let mut combined = pages.join("\n\n");

    if config.fix_hyphenation {
        combined = hyphenation::repair(&combined);
    }

    combined = defragment_lines(&combined);
    combined = merge_orphaned_bullets(&combined);

    let doc_stats = stats::compute(&combined, page_count);
    (combined, doc_stats)
}

/// A line `<=45` characters that does not begin a heading or list is
/// merged with the previous non-empty line iff the previous line doesn't
/// end with `.!?;:` or the current line begins lowercase.
fn defragment_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::new();

    for &line in &lines {
        let trimmed = line.trim();
        let is_short = trimmed.chars().count() <= 45;
        let is_structural = trimmed.starts_with('#')
            || crate::layout::classifier::starts_with_bullet(trimmed)
            || trimmed.starts_with("```")
            || regex_numbered_list(trimmed)
            || trimmed.is_empty();

        if is_short && !is_structural {
            if let Some(last_non_empty) = out.iter_mut().rev().find(|l: &&mut String| !l.trim().is_empty()) {
                let prev_trimmed = last_non_empty.trim_end();
                let prev_ends_terminal = prev_trimmed
                    .ends_with(['.', '!', '?', ';', ':'])
                    ;
                let current_starts_lower = trimmed.chars().next().is_some_and(|c| c.is_lowercase());
                if !prev_ends_terminal || current_starts_lower {
                    last_non_empty.push(' ');
                    last_non_empty.push_str(trimmed);
                    continue;
                }
            }
        }
        out.push(line.to_string());
    }

    out.join("\n")
}

fn regex_numbered_list(line: &str) -> bool {
    let mut chars = line.chars();
    let mut seen_digit = false;
    for c in chars.by_ref() {
        if c.is_ascii_digit() {
            seen_digit = true;
            continue;
        }
        return seen_digit && matches!(c, '.' | ')');
    }
    false
}

/// A line whose trimmed content is a single bullet glyph, where the next
/// line doesn't itself begin with a bullet or digit-list marker, is merged
/// as `- <next>`.
fn merge_orphaned_bullets(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        let is_lone_bullet = trimmed == "-" || crate::layout::classifier::starts_with_bullet(trimmed) && trimmed.chars().count() == 1;
        if is_lone_bullet && i + 1 < lines.len() {
            let next = lines[i + 1].trim();
            let next_is_list_start = next.starts_with("- ") || regex_numbered_list(next);
            if !next_is_list_start && !next.is_empty() {
                out.push(format!("- {next}"));
                i += 2;
                continue;
            }
        }
        out.push(lines[i].to_string());
        i += 1;
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defragment_short_continuation() {
        let text = "This is a long opening sentence that runs on\nand continues here.";
        let result = defragment_lines(text);
        assert_eq!(result, "This is a long opening sentence that runs on and continues here.");
    }

    #[test]
    fn test_defragment_preserves_headings() {
        let text = "# Title\nShort line that stays.";
        let result = defragment_lines(text);
        assert!(result.contains("# Title"));
    }

    #[test]
    fn test_merge_orphaned_bullet() {
        let text = "-\nfirst point of discussion";
        let result = merge_orphaned_bullets(text);
        assert_eq!(result, "- first point of discussion");
    }
}
