//! Shared text statistics used by the Block Classifier and the Table
//! Detector's `GridProfile`: word tokenization, the closed-class
//! function-word set, and sentence/number/short-token predicates.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Closed-class English function words (§4.4 proseScore).
    pub static ref FUNCTION_WORDS: HashSet<&'static str> = [
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do",
        "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can",
        "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through",
        "during", "before", "after", "and", "but", "or", "nor", "so", "yet", "both", "either",
        "neither", "not", "only", "also", "just", "than", "then", "now", "here", "there", "this",
        "that", "these", "those", "it", "its", "they", "their", "them", "he", "she", "his", "her",
        "we", "our", "you", "your", "who", "which", "what",
    ]
    .into_iter()
    .collect();
}

/// Split text into lowercase word tokens (alphabetic runs only).
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Fraction of word tokens that belong to [`FUNCTION_WORDS`].
pub fn function_word_ratio(text: &str) -> f32 {
    let tokens = words(text);
    if tokens.is_empty() {
        return 0.0;
    }
    let hits = tokens.iter().filter(|w| FUNCTION_WORDS.contains(w.as_str())).count();
    hits as f32 / tokens.len() as f32
}

/// Mean word length in characters over alphabetic tokens.
pub fn mean_word_length(text: &str) -> f32 {
    let tokens = words(text);
    if tokens.is_empty() {
        return 0.0;
    }
    tokens.iter().map(|w| w.chars().count()).sum::<usize>() as f32 / tokens.len() as f32
}

/// Number of word tokens, counted by whitespace splitting (used for
/// words-per-sentence and sentence-detection; unlike [`words`] this keeps
/// punctuation attached so trailing `.`/`!`/`?` remain visible to callers).
pub fn whitespace_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Whether `text` ends with sentence-terminal punctuation, optionally
/// followed by a closing quote or parenthesis.
pub fn ends_with_sentence_punct(text: &str) -> bool {
    let trimmed = text.trim_end();
    let trimmed = trimmed.trim_end_matches(['"', '\'', ')', '\u{2019}', '\u{201d}']);
    trimmed.ends_with(['.', '!', '?', '\u{2026}'])
}

/// Whether `text` contains any sentence-terminal punctuation.
pub fn contains_sentence_punct(text: &str) -> bool {
    text.contains(['.', '!', '?', '\u{2026}'])
}

/// Whether a trimmed cell looks like a "short token": <=24 chars, no inner
/// whitespace, and alphanumeric after stripping wrapper punctuation and a
/// leading/trailing currency symbol.
pub fn is_short_token(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 24 {
        return false;
    }
    if trimmed.contains(char::is_whitespace) {
        return false;
    }
    let stripped = strip_wrapper_punct(trimmed);
    !stripped.is_empty() && stripped.chars().all(|c| c.is_alphanumeric() || c == '.')
}

/// Strip a leading/trailing currency symbol, bracket, or quote.
fn strip_wrapper_punct(s: &str) -> &str {
    s.trim_matches(|c: char| {
        matches!(c, '$' | '\u{20ac}' | '\u{a3}' | '\u{a5}' | '(' | ')' | '"' | '\'' | '%')
    })
}

/// Whether a trimmed cell is numeric: digits/decimals after stripping one
/// leading/trailing currency symbol, optional sign, optional parenthesis
/// wrap, a single decimal point, an optional `%`, and optional thousands
/// separators.
pub fn is_numeric_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    let mut s = trimmed.trim_start_matches(['(']).trim_end_matches([')']);
    s = s.trim_matches(|c: char| matches!(c, '$' | '\u{20ac}' | '\u{a3}' | '\u{a5}'));
    s = s.trim_end_matches('%');
    s = s.strip_prefix(['+', '-']).unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    let no_commas: String = s.chars().filter(|&c| c != ',').collect();
    let mut seen_dot = false;
    if no_commas.is_empty() {
        return false;
    }
    for c in no_commas.chars() {
        if c == '.' {
            if seen_dot {
                return false;
            }
            seen_dot = true;
        } else if !c.is_ascii_digit() {
            return false;
        }
    }
    true
}

/// Whether a trimmed cell is a "sentence": >=5 words, ending with sentence
/// punctuation.
pub fn is_sentence_cell(cell: &str) -> bool {
    let tokens = whitespace_tokens(cell);
    tokens.len() >= 5 && ends_with_sentence_punct(cell)
}

/// Whether a trimmed cell is a "prose fragment": long enough or
/// linguistically dense enough to indicate broken prose.
pub fn is_prose_fragment(cell: &str) -> bool {
    let trimmed = cell.trim();
    let len = trimmed.chars().count();
    if len > 60 {
        return true;
    }
    let tokens = whitespace_tokens(trimmed);
    if tokens.len() >= 4 && len > 40 && function_word_ratio(trimmed) >= 0.15 {
        return true;
    }
    if tokens.len() >= 5 {
        let starts_capital = trimmed.chars().next().is_some_and(|c| c.is_uppercase());
        if starts_capital && mean_word_length(trimmed) >= 3.5 {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_word_ratio() {
        let ratio = function_word_ratio("The cat sat on the mat");
        assert!(ratio > 0.5);
    }

    #[test]
    fn test_short_token() {
        assert!(is_short_token("Revenue"));
        assert!(is_short_token("$1,234.56"));
        assert!(!is_short_token("this has spaces"));
        assert!(!is_short_token(&"a".repeat(30)));
    }

    #[test]
    fn test_numeric_cell() {
        assert!(is_numeric_cell("1,234.56"));
        assert!(is_numeric_cell("-42"));
        assert!(is_numeric_cell("(42)"));
        assert!(is_numeric_cell("42%"));
        assert!(is_numeric_cell("$42.00"));
        assert!(!is_numeric_cell("hello"));
        assert!(!is_numeric_cell("4.2.1"));
    }

    #[test]
    fn test_sentence_cell() {
        assert!(is_sentence_cell("This is a complete sentence right here."));
        assert!(!is_sentence_cell("Short cell"));
    }

    #[test]
    fn test_prose_fragment() {
        assert!(is_prose_fragment(
            "This fragment is long enough to exceed sixty characters for sure"
        ));
        assert!(!is_prose_fragment("Revenue"));
    }
}
