//! Segmentation: partitions a line of text into math / non-math runs and
//! renders the math runs as LaTeX.

use super::density::{is_display_math, math_density};
use super::tables::lookup;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_DELIMITED: Regex =
        Regex::new(r"(?s)(\$\$.*?\$\$|\\\[.*?\\\]|\$[^$\n]+\$)").unwrap();
    static ref RE_FRACTION: Regex = Regex::new(r"(\d+)\s*/\s*(\d+)").unwrap();
    static ref RE_MULTISPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// A contiguous slice of the original text, classified as math or prose.
/// Concatenating every segment's original (pre-rendering) text reproduces
/// the input exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct MathSegment {
    /// The rendered text: LaTeX-wrapped if `is_math`, verbatim otherwise.
    pub text: String,
    /// Whether this segment is math.
    pub is_math: bool,
    /// Whether a math segment is display (block) math.
    pub is_display: bool,
    /// Start offset (chars) in the original text.
    pub start_index: usize,
    /// End offset (chars, exclusive) in the original text.
    pub end_index: usize,
}

/// Replace Greek letters and operators with LaTeX commands, group
/// consecutive superscript/subscript runs into `^{...}` / `_{...}`, and
/// normalize whitespace and `a/b` fractions.
fn render_latex(text: &str) -> String {
    let mut out = String::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if let Some(rendered) = super::tables::SUPERSCRIPT.get(&c) {
            let mut group = String::from(*rendered);
            let mut j = i + 1;
            while j < chars.len() {
                if let Some(next) = super::tables::SUPERSCRIPT.get(&chars[j]) {
                    group.push_str(next);
                    j += 1;
                } else {
                    break;
                }
            }
            out.push_str(&format!("^{{{group}}}"));
            i = j;
            continue;
        }
        if let Some(rendered) = super::tables::SUBSCRIPT.get(&c) {
            let mut group = String::from(*rendered);
            let mut j = i + 1;
            while j < chars.len() {
                if let Some(next) = super::tables::SUBSCRIPT.get(&chars[j]) {
                    group.push_str(next);
                    j += 1;
                } else {
                    break;
                }
            }
            out.push_str(&format!("_{{{group}}}"));
            i = j;
            continue;
        }
        if let Some(rendered) = lookup(c) {
            out.push_str(rendered);
            out.push(' ');
            i += 1;
            continue;
        }
        out.push(c);
        i += 1;
    }

    let collapsed = RE_MULTISPACE.replace_all(&out, " ");
    let fraction_applied = RE_FRACTION.replace_all(&collapsed, "\\frac{$1}{$2}");
    fraction_applied.trim().to_string()
}

fn wrap(text: &str, display: bool) -> String {
    let rendered = render_latex(text);
    if display {
        format!("$$\n{rendered}\n$$")
    } else {
        format!("${rendered}$")
    }
}

/// Find contiguous runs within prose that look like inline math: strong
/// indicators plus contextual operator/bracket characters with
/// whitespace, excluding matches that look like ordinary sentences.
pub fn find_inline_math_spans(text: &str) -> Vec<(usize, usize)> {
    let chars: Vec<char> = text.chars().collect();
    let is_context = |c: char| {
        matches!(c, '+' | '-' | '=' | '<' | '>' | '^' | '_' | '(' | ')' | '{' | '}')
            || c.is_whitespace()
            || super::tables::GREEK.contains_key(&c)
            || super::tables::OPERATORS.contains_key(&c)
            || super::tables::SUPERSCRIPT.contains_key(&c)
            || super::tables::SUBSCRIPT.contains_key(&c)
            || c.is_ascii_alphanumeric()
    };
    let has_strong = |c: char| {
        super::tables::GREEK.contains_key(&c)
            || super::tables::OPERATORS.contains_key(&c)
            || super::tables::SUPERSCRIPT.contains_key(&c)
            || super::tables::SUBSCRIPT.contains_key(&c)
            || c == '^'
            || c == '_'
    };

    let mut spans = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if has_strong(chars[i]) {
            let mut start = i;
            while start > 0 && is_context(chars[start - 1]) && !chars[start - 1].is_whitespace() {
                start -= 1;
            }
            let mut end = i + 1;
            while end < chars.len() && is_context(chars[end]) {
                end += 1;
            }
            while end < chars.len() && chars[end].is_whitespace() {
                let mut look = end + 1;
                while look < chars.len() && is_context(chars[look]) && !chars[look].is_whitespace() {
                    look += 1;
                }
                if look > end + 1 && chars[end + 1..look].iter().any(|&c| has_strong(c)) {
                    end = look;
                } else {
                    break;
                }
            }

            let span_text: String = chars[start..end].iter().collect();
            let word_count = span_text.split_whitespace().count();
            let ends_with_period = span_text.trim_end().ends_with('.');

            let reject = span_text.chars().count() > 80
                || word_count > 6
                || (ends_with_period && word_count > 2)
                || math_density(&span_text) < 0.2;

            if !reject {
                spans.push((start, end));
            }
            i = end.max(i + 1);
        } else {
            i += 1;
        }
    }

    merge_overlapping(spans)
}

fn merge_overlapping(mut spans: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    spans.sort_by_key(|s| s.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for span in spans {
        if let Some(last) = merged.last_mut() {
            if span.0 <= last.1 {
                last.1 = last.1.max(span.1);
                continue;
            }
        }
        merged.push(span);
    }
    merged
}

/// Segment a line of text into math / non-math runs, reproducing the
/// input exactly when all segments' original slices are concatenated.
///
/// Algorithm (§4.6): first split on existing LaTeX delimiters; within a
/// non-delimited region, if it reads as prose with detectable inline math
/// spans, alternate non-math/inline-math; otherwise, if the whole region's
/// density clears a length-scaled threshold with enough strong indicators,
/// wrap the whole region (display if it independently qualifies); failing
/// that, leave it as prose.
pub fn segment(text: &str) -> Vec<MathSegment> {
    let mut segments = Vec::new();
    let mut last_end = 0;
    let mut char_offset = 0;

    for m in RE_DELIMITED.find_iter(text) {
        let prefix_chars = text[last_end..m.start()].chars().count();
        if m.start() > last_end {
            let prefix = &text[last_end..m.start()];
            segments.extend(segment_region(prefix, char_offset));
            char_offset += prefix_chars;
        }
        let matched = m.as_str();
        let matched_chars = matched.chars().count();
        segments.push(MathSegment {
            text: matched.to_string(),
            is_math: true,
            is_display: matched.starts_with("$$") || matched.starts_with("\\["),
            start_index: char_offset,
            end_index: char_offset + matched_chars,
        });
        char_offset += matched_chars;
        last_end = m.end();
    }

    if last_end < text.len() {
        let tail = &text[last_end..];
        segments.extend(segment_region(tail, char_offset));
    }

    if segments.is_empty() {
        segments.push(MathSegment {
            text: text.to_string(),
            is_math: false,
            is_display: false,
            start_index: 0,
            end_index: text.chars().count(),
        });
    }

    segments
}

fn segment_region(region: &str, base_offset: usize) -> Vec<MathSegment> {
    let len = region.chars().count() as f32;
    let threshold = 0.12 + (len / 50.0).min(1.0) * 0.13;
    let strong_count = region
        .chars()
        .filter(|&c| {
            super::tables::GREEK.contains_key(&c)
                || super::tables::OPERATORS.contains_key(&c)
                || super::tables::SUPERSCRIPT.contains_key(&c)
                || super::tables::SUBSCRIPT.contains_key(&c)
        })
        .count();

    let region_chars = region.chars().count();
    let spans = find_inline_math_spans(region);
    // A single span spanning the whole region isn't "prose with embedded
    // math" — it's a bare equation with no surrounding text, so let the
    // whole-region check below (which also decides display vs inline)
    // handle it instead of alternating into the same one segment.
    let whole_region_is_one_span = spans.len() == 1 && spans[0] == (0, region_chars);

    if !spans.is_empty() && !whole_region_is_one_span {
        return alternate_spans(region, spans, base_offset);
    }

    let density = math_density(region);
    let enough_strong = if len > 100.0 { strong_count >= 3 } else { true };
    if density > threshold && enough_strong {
        let display = is_display_math(region);
        return vec![MathSegment {
            text: wrap(region, display),
            is_math: true,
            is_display: display,
            start_index: base_offset,
            end_index: base_offset + region_chars,
        }];
    }

    if !spans.is_empty() {
        return alternate_spans(region, spans, base_offset);
    }

    vec![MathSegment {
        text: region.to_string(),
        is_math: false,
        is_display: false,
        start_index: base_offset,
        end_index: base_offset + region_chars,
    }]
}

fn alternate_spans(region: &str, spans: Vec<(usize, usize)>, base_offset: usize) -> Vec<MathSegment> {
    let chars: Vec<char> = region.chars().collect();
    let mut out = Vec::new();
    let mut cursor = 0;
    for (start, end) in spans {
        if start > cursor {
            let slice: String = chars[cursor..start].iter().collect();
            out.push(MathSegment {
                text: slice.clone(),
                is_math: false,
                is_display: false,
                start_index: base_offset + cursor,
                end_index: base_offset + start,
            });
        }
        let slice: String = chars[start..end].iter().collect();
        out.push(MathSegment {
            text: wrap(&slice, false),
            is_math: true,
            is_display: false,
            start_index: base_offset + start,
            end_index: base_offset + end,
        });
        cursor = end;
    }
    if cursor < chars.len() {
        let slice: String = chars[cursor..].iter().collect();
        let len = slice.chars().count();
        out.push(MathSegment {
            text: slice,
            is_math: false,
            is_display: false,
            start_index: base_offset + cursor,
            end_index: base_offset + cursor + len,
        });
    }
    out
}
