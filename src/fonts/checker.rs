//! Does a font map every codepoint of a block?

use crate::block::Block;
use crate::codepoint::Codepoint;
use crate::diagnostics;

use std::fmt::Write;
use std::ops::RangeInclusive;

/// True if any cmap subtable maps `cp`.
pub fn has_glyph(face: &ttf_parser::Face<'_>, cp: u32) -> bool {
    face.tables()
        .cmap
        .map(|cmap| cmap.subtables.into_iter().any(|sub| sub.glyph_index(cp).is_some()))
        .unwrap_or(false)
}

/// Per-codepoint result of a coverage check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub range: RangeInclusive<u32>,
    pub results: Vec<(Codepoint, bool)>,
}

impl Coverage {
    pub fn supported(&self) -> usize {
        self.results.iter().filter(|(_, ok)| *ok).count()
    }

    pub fn missing(&self) -> usize {
        self.results.len() - self.supported()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing() == 0
    }

    /// `✓ U+1FB00 (🬀)` per codepoint.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (cp, ok) in &self.results {
            let ch = cp.as_char().map(String::from).unwrap_or_default();
            let _ = writeln!(out, "{} {} ({})", diagnostics::mark(*ok), cp, ch);
        }
        out
    }

    pub fn summary(&self, block: Block) -> String {
        let mut out = format!(
            "{} (U+{:04X}-U+{:04X})\nSupported: {}/{} ({:.1}%)\n",
            block.name(),
            self.range.start(),
            self.range.end(),
            self.supported(),
            self.total(),
            crate::view::percent(self.supported(), self.total())
        );
        if self.missing() > 0 {
            let _ = writeln!(out, "Missing:   {}", self.missing());
        }
        out
    }
}

/// Run `has` over every codepoint of `range`.
pub fn check_coverage(range: RangeInclusive<u32>, mut has: impl FnMut(u32) -> bool) -> Coverage {
    let results = range.clone().map(|cp| (Codepoint(cp), has(cp))).collect();
    Coverage { range, results }
}

pub fn check_font(face: &ttf_parser::Face<'_>, block: Block) -> Coverage {
    check_coverage(block.checked_range(), |cp| has_glyph(face, cp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_missing() {
        let coverage = check_coverage(0x1FB00..=0x1FB03, |cp| cp % 2 == 0);
        assert_eq!(coverage.total(), 4);
        assert_eq!(coverage.supported(), 2);
        assert_eq!(coverage.missing(), 2);
        assert!(!coverage.is_complete());
    }

    #[test]
    fn summary_lines() {
        let coverage = check_coverage(0x1FB00..=0x1FB03, |cp| cp != 0x1FB03);
        let summary = coverage.summary(Block::LegacyComputing);
        assert!(summary.starts_with("Symbols for Legacy Computing (U+1FB00-U+1FB03)\n"));
        assert!(summary.contains("Supported: 3/4 (75.0%)"));
        assert!(summary.contains("Missing:   1"));
    }

    #[test]
    fn complete_coverage_has_no_missing_line() {
        let coverage = check_coverage(0x1FB00..=0x1FB01, |_| true);
        assert!(coverage.is_complete());
        assert!(!coverage.summary(Block::LegacyComputing).contains("Missing"));
    }

    #[test]
    fn listing_shows_each_codepoint() {
        let coverage = check_coverage(0x1FB00..=0x1FB01, |cp| cp == 0x1FB00);
        let listing = coverage.listing();
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.contains("U+1FB00 (\u{1FB00})"));
        assert!(listing.contains("U+1FB01 (\u{1FB01})"));
    }
}
