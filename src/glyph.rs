//! The glyph: one positioned character record produced by the PDF text
//! shaper, and the immutable unit the rest of the pipeline is built from.

use crate::geometry::Point;

/// Font weight as reported by the text shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Font style as reported by the text shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FontStyle {
    /// Upright/roman style.
    #[default]
    Normal,
    /// Italic/oblique style.
    Italic,
}

/// A positioned character, the unit of the pipeline.
///
/// Glyphs are immutable input: nothing downstream mutates a `Glyph` once it
/// has been read from the glyph source adapter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Glyph {
    /// The character itself.
    pub char: char,
    /// Baseline origin in page space.
    pub origin: Point,
    /// Font size in points.
    pub font_size: f32,
    /// Font family name as reported by the shaper.
    pub font_family: String,
    /// Font weight.
    pub weight: FontWeight,
    /// Font style.
    pub style: FontStyle,
}

impl Glyph {
    /// Construct a glyph at the given baseline origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagedown::glyph::{Glyph, FontWeight, FontStyle};
    /// use pagedown::geometry::Point;
    ///
    /// let g = Glyph::new('A', Point::new(10.0, 700.0), 12.0, "Times", FontWeight::Normal, FontStyle::Normal);
    /// assert_eq!(g.char, 'A');
    /// ```
    pub fn new(
        char: char,
        origin: Point,
        font_size: f32,
        font_family: impl Into<String>,
        weight: FontWeight,
        style: FontStyle,
    ) -> Self {
        Self {
            char,
            origin,
            font_size,
            font_family: font_family.into(),
            weight,
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_defaults() {
        assert_eq!(FontWeight::default(), FontWeight::Normal);
        assert_eq!(FontStyle::default(), FontStyle::Normal);
    }
}
