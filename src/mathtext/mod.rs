//! Math Tokenizer (component 6 of the pipeline).
//!
//! Detects Unicode math embedded in plain text and re-renders it as LaTeX,
//! without ever touching text that doesn't look like math.

mod density;
mod segment;
mod tables;

pub use density::{is_display_math, is_inline_math, math_density};
pub use segment::{find_inline_math_spans, segment, MathSegment};
