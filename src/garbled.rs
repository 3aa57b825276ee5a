//! Garbled-Font Heuristic (component 9 of the pipeline).
//!
//! Purely advisory: detects telltale signs that a page's glyph extraction
//! produced mojibake (wrong CID-to-Unicode mapping) and recommends the host
//! application re-run that page through a vision model. The engine never
//! calls a vision model itself.

use crate::adapters::GarbledFontReport;
use lazy_static::lazy_static;
use regex::Regex;

const REPLACEMENT_CHAR_THRESHOLD: usize = 3;
const PUA_CHAR_THRESHOLD: usize = 2;
const PATTERN_MATCH_THRESHOLD: usize = 3;

lazy_static! {
    static ref RE_LETTER_REPLACEMENT_LETTER: Regex = Regex::new(r"\p{L}\u{fffd}\p{L}").unwrap();
    static ref RE_REPLACEMENT_RUN: Regex = Regex::new(r"\u{fffd}{2,}").unwrap();
    static ref RE_MATH_BLOCK_RUN: Regex =
        Regex::new(r"[\u{2200}-\u{22ff}\u{2a00}-\u{2aff}]{3,}").unwrap();
    static ref RE_GARBLED_SUBSCRIPT: Regex = Regex::new(r"\p{Ll}>@\u{fffd}").unwrap();
    static ref RE_PARENS_GARBLED: Regex = Regex::new(r"\p{L}\([^)]*\)\+\s*\p{L}\p{Ll}>@").unwrap();
}

fn is_pua(c: char) -> bool {
    ('\u{e000}'..='\u{f8ff}').contains(&c)
}

/// Analyze one page's extracted text for signs of a garbled font mapping.
pub fn analyze(text: &str) -> GarbledFontReport {
    if text.is_empty() {
        return GarbledFontReport {
            recommend: false,
            reason: "page is empty".to_string(),
            garbled_percentage: 0.0,
        };
    }

    let replacement_count = text.chars().filter(|&c| c == '\u{fffd}').count();
    let pua_count = text.chars().filter(|&c| is_pua(c)).count();

    let pattern_matches = RE_LETTER_REPLACEMENT_LETTER.find_iter(text).count()
        + RE_REPLACEMENT_RUN.find_iter(text).count()
        + RE_MATH_BLOCK_RUN.find_iter(text).count()
        + RE_GARBLED_SUBSCRIPT.find_iter(text).count()
        + RE_PARENS_GARBLED.find_iter(text).count();

    let total_chars = text.chars().count().max(1);
    let garbled_chars = replacement_count + pua_count;
    let garbled_percentage = (garbled_chars as f32 / total_chars as f32) * 100.0;

    let (recommend, reason) = if replacement_count >= REPLACEMENT_CHAR_THRESHOLD {
        (true, format!("{replacement_count} replacement characters (U+FFFD) found"))
    } else if pua_count >= PUA_CHAR_THRESHOLD {
        (true, format!("{pua_count} Private Use Area characters found"))
    } else if pattern_matches >= PATTERN_MATCH_THRESHOLD {
        (true, format!("{pattern_matches} garbled-text pattern matches found"))
    } else {
        (false, "no garbling signals detected".to_string())
    };

    GarbledFontReport {
        recommend,
        reason,
        garbled_percentage,
    }
}
