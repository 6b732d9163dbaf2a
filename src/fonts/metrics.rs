//! Vertical metrics and advance widths, for choosing an SVG viewBox.

use std::collections::BTreeSet;
use std::fmt;

use ttf_parser::{Face, GlyphId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub typo_ascender: Option<i16>,
    pub typo_descender: Option<i16>,
    pub glyph_count: u16,
    pub advance_widths: BTreeSet<u16>,
}

impl FontMetrics {
    pub fn from_face(face: &Face<'_>) -> Self {
        let bbox = face.global_bounding_box();
        let advance_widths = (0..face.number_of_glyphs())
            .filter_map(|gid| face.glyph_hor_advance(GlyphId(gid)))
            .collect();

        FontMetrics {
            units_per_em: face.units_per_em(),
            x_min: bbox.x_min,
            y_min: bbox.y_min,
            x_max: bbox.x_max,
            y_max: bbox.y_max,
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
            typo_ascender: face.typographic_ascender(),
            typo_descender: face.typographic_descender(),
            glyph_count: face.number_of_glyphs(),
            advance_widths,
        }
    }

    /// Height of a cell from descender to ascender.
    pub fn cell_height(&self) -> i32 {
        i32::from(self.ascender) - i32::from(self.descender)
    }
}

impl fmt::Display for FontMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== head ===")?;
        writeln!(f, "  unitsPerEm: {}", self.units_per_em)?;
        writeln!(f, "  bounds: ({}, {}) - ({}, {})", self.x_min, self.y_min, self.x_max, self.y_max)?;
        writeln!(f, "=== hhea ===")?;
        writeln!(f, "  ascender: {}", self.ascender)?;
        writeln!(f, "  descender: {}", self.descender)?;
        writeln!(f, "  lineGap: {}", self.line_gap)?;
        writeln!(f, "  cell height: {}", self.cell_height())?;
        if let (Some(asc), Some(desc)) = (self.typo_ascender, self.typo_descender) {
            writeln!(f, "=== OS/2 ===")?;
            writeln!(f, "  sTypoAscender: {}", asc)?;
            writeln!(f, "  sTypoDescender: {}", desc)?;
        }
        writeln!(f, "=== glyphs ===")?;
        writeln!(f, "  count: {}", self.glyph_count)?;
        let widths: Vec<String> = self.advance_widths.iter().map(u16::to_string).collect();
        write!(f, "  advance widths: {}", widths.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_sections() {
        let m = FontMetrics {
            units_per_em: 1000,
            x_min: 0,
            y_min: -200,
            x_max: 720,
            y_max: 800,
            ascender: 800,
            descender: -200,
            line_gap: 0,
            typo_ascender: None,
            typo_descender: None,
            glyph_count: 3,
            advance_widths: [0, 720].into_iter().collect(),
        };
        let text = m.to_string();
        assert_eq!(m.cell_height(), 1000);
        assert!(text.contains("unitsPerEm: 1000"));
        assert!(text.contains("advance widths: 0, 720"));
        assert!(!text.contains("OS/2"));
    }
}
