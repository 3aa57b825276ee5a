//! `mathDensity` and the display/inline math predicates (§4.6).

use super::tables::{GREEK, OPERATORS, SUBSCRIPT, SUPERSCRIPT};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_NUMERIC_FRACTION: Regex = Regex::new(r"\b\d+\s*/\s*\d+\b").unwrap();
    static ref RE_LETTER_SUBSUP: Regex = Regex::new(r"[A-Za-z][\u{2070}-\u{209c}\^_]").unwrap();
    static ref RE_X_EQUALS: Regex = Regex::new(r"\b[A-Za-z]\s*=").unwrap();
    static ref RE_EQUATION_RELATION: Regex =
        Regex::new(r"[=\u{2264}\u{2265}\u{2260}\u{2248}\u{2243}\u{21d2}\u{2192}\u{21d4}\u{21a6}\u{221d}]").unwrap();
    static ref RE_BEGIN_ENV: Regex =
        Regex::new(r"\\begin\{(equation|align|gather|multline|eqnarray|displaymath)\}").unwrap();
}

fn is_strong_indicator(c: char) -> bool {
    GREEK.contains_key(&c) || SUPERSCRIPT.contains_key(&c) || SUBSCRIPT.contains_key(&c) || OPERATORS.contains_key(&c) || c == '^' || c == '_'
}

fn is_weak_indicator(c: char) -> bool {
    matches!(c, '=' | '+' | '*')
}

/// Fraction of characters that look like math, with pattern bonuses,
/// capped at 1.0. See §4.6 for the exact weighting.
pub fn math_density(text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let len = text.chars().count() as f32;
    let strong = text.chars().filter(|&c| is_strong_indicator(c)).count() as f32;
    let weak = text.chars().filter(|&c| is_weak_indicator(c)).count() as f32;

    let mut density = strong / len;
    if strong > 0.0 {
        density += (weak / len) * 0.3;
    }

    if strong > 0.0 {
        if RE_NUMERIC_FRACTION.is_match(text) {
            density += 0.05;
        }
        if RE_LETTER_SUBSUP.is_match(text) {
            density += 0.15;
        }
        if RE_X_EQUALS.is_match(text) {
            density += 0.10;
        }
        if text.contains("sqrt") || text.contains("\\sqrt") || text.contains('\u{221a}') {
            density += 0.15;
        }
        if text.contains("sum") || text.contains("\\sum") || text.contains('\u{2211}')
            || text.contains("int") || text.contains("\\int") || text.contains('\u{222b}')
        {
            density += 0.20;
        }
    }

    density.min(1.0)
}

fn has_equation_relation_or_bigop(text: &str) -> bool {
    RE_EQUATION_RELATION.is_match(text)
        || text.contains('\u{222b}')
        || text.contains('\u{2211}')
        || text.contains('\u{220f}')
        || text.contains('\u{221a}')
}

/// Whether a candidate block (already split on blank lines) should be
/// rendered as display math.
pub fn is_display_math(text: &str) -> bool {
    let trimmed = text.trim();
    if (trimmed.starts_with("$$") && trimmed.ends_with("$$"))
        || (trimmed.starts_with("\\[") && trimmed.ends_with("\\]"))
    {
        return true;
    }
    if RE_BEGIN_ENV.is_match(trimmed) {
        return true;
    }

    let is_multiline = trimmed.lines().count() > 1;
    let density = math_density(trimmed);
    if is_multiline {
        return density > 0.35;
    }

    trimmed.chars().count() < 200 && density > 0.4 && has_equation_relation_or_bigop(trimmed)
}

/// Whether a short standalone line should be rendered as inline math.
pub fn is_inline_math(text: &str) -> bool {
    let len = text.chars().count();
    let density = math_density(text);
    if len < 100 && density > 0.25 {
        return true;
    }
    if len < 50 {
        let has_strong = text.chars().any(is_strong_indicator);
        if has_strong {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_plain_prose_is_low() {
        assert!(math_density("The committee reviewed the proposal.") < 0.1);
    }

    #[test]
    fn test_density_equation_is_high() {
        assert!(math_density("\u{03b1} + \u{03b2} = \u{03b3}") > 0.3);
    }

    #[test]
    fn test_display_math_wrapped_passthrough() {
        assert!(is_display_math("$$x = y$$"));
    }

    #[test]
    fn test_inline_math_short_greek() {
        assert!(is_inline_math("\u{03b1}\u{03b2}"));
    }
}
