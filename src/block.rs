//! The Unicode blocks tracked by the site.

use std::ops::RangeInclusive;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Block {
    LegacyComputing,
    LegacyComputingSupplement,
}

impl Block {
    pub const ALL: [Block; 2] = [Block::LegacyComputing, Block::LegacyComputingSupplement];

    /// Directory and file stem used throughout the project layout.
    pub fn id(self) -> &'static str {
        match self {
            Block::LegacyComputing => "legacy_computing",
            Block::LegacyComputingSupplement => "legacy_computing_supplement",
        }
    }

    /// Short id used for HTML element ids.
    pub fn html_id(self) -> &'static str {
        match self {
            Block::LegacyComputing => "main",
            Block::LegacyComputingSupplement => "supplement",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Block::LegacyComputing => "Symbols for Legacy Computing",
            Block::LegacyComputingSupplement => "Legacy Computing Supplement",
        }
    }

    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Block::LegacyComputing => 0x1FB00..=0x1FBFF,
            Block::LegacyComputingSupplement => 0x1CC00..=0x1CEBF,
        }
    }

    /// Heading text, e.g. `Symbols for Legacy Computing (U+1FB00-U+1FBFF)`.
    pub fn title(self) -> String {
        let range = self.range();
        format!("{} (U+{:04X}-U+{:04X})", self.name(), range.start(), range.end())
    }

    /// Range inspected by the font checker. The main block stops at the last
    /// assigned codepoint.
    pub fn checked_range(self) -> RangeInclusive<u32> {
        match self {
            Block::LegacyComputing => 0x1FB00..=0x1FBFA,
            Block::LegacyComputingSupplement => self.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_carry_ranges() {
        assert_eq!(
            Block::LegacyComputing.title(),
            "Symbols for Legacy Computing (U+1FB00-U+1FBFF)"
        );
        assert_eq!(
            Block::LegacyComputingSupplement.title(),
            "Legacy Computing Supplement (U+1CC00-U+1CEBF)"
        );
    }

    #[test]
    fn checked_range_is_within_block() {
        for block in Block::ALL {
            let full = block.range();
            let checked = block.checked_range();
            assert!(full.start() <= checked.start() && checked.end() <= full.end());
        }
        assert_eq!(Block::LegacyComputing.checked_range().count(), 251);
    }
}
