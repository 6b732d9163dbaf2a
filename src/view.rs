//! Aggregation model: combine section definitions with emulator verdicts.

use crate::block::Block;
use crate::codepoint::Codepoint;
use crate::input::emulators::{EmulatorIndex, SupportTable};
use crate::input::Section;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Support for one section across every emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRow {
    pub section: String,
    pub num_chars: usize,
    /// Codepoints without a record count as `no`.
    pub terminal_support: BTreeMap<String, usize>,
    pub important: bool,
}

/// Whole-block support for one emulator, used by the overview bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockStats {
    pub important_supported: usize,
    pub important_total: usize,
    pub all_supported: usize,
    pub all_total: usize,
}

impl BlockStats {
    pub fn other_supported(&self) -> usize {
        self.all_supported.saturating_sub(self.important_supported)
    }

    pub fn other_total(&self) -> usize {
        self.all_total.saturating_sub(self.important_total)
    }
}

/// Everything the renderer needs for one block.
#[derive(Debug, Clone)]
pub struct BlockReport {
    pub block: Block,
    pub sections: Vec<Section>,
    pub emulators: EmulatorIndex,
    pub rows: Vec<CompatibilityRow>,
    pub stats: BTreeMap<String, BlockStats>,
    /// Union of the codepoints of important sections.
    pub important: BTreeSet<u32>,
    /// Union of all section codepoints.
    pub covered: BTreeSet<u32>,
}

impl BlockReport {
    pub fn emulator_names(&self) -> impl Iterator<Item = &str> {
        self.emulators.keys().map(String::as_str)
    }

    pub fn important_rows(&self) -> Vec<CompatibilityRow> {
        self.rows.iter().filter(|r| r.important).cloned().collect()
    }
}

/// Client-side data embedded as JSON for the filter and emulator switch.
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub blocks: Vec<PageBlock>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageBlock {
    pub id: &'static str,
    pub block: Block,
    pub title: String,
    pub emulators: Vec<String>,
}

impl PageData {
    pub fn from_reports(reports: &[BlockReport]) -> Self {
        PageData {
            blocks: reports
                .iter()
                .map(|r| PageBlock {
                    id: r.block.html_id(),
                    block: r.block,
                    title: r.block.title(),
                    emulators: r.emulators.keys().cloned().collect(),
                })
                .collect(),
        }
    }
}

/// yes counts 1, maybe ½, anything else 0; the sum is truncated once.
pub fn support_value(table: &SupportTable, cps: impl IntoIterator<Item = Codepoint>) -> usize {
    let halves: u32 = cps.into_iter().map(|cp| table.verdict_or_no(cp).half_weight()).sum();
    (halves / 2) as usize
}

/// `value / total * 100`, or 0 for an empty total.
pub fn percent(value: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 / total as f64 * 100.0
    }
}

/// One row per section, in section order.
pub fn build_rows(sections: &[Section], emulators: &EmulatorIndex) -> Vec<CompatibilityRow> {
    sections
        .iter()
        .map(|section| {
            let terminal_support = emulators
                .iter()
                .map(|(name, table)| (name.clone(), support_value(table, section.iter())))
                .collect();

            CompatibilityRow {
                section: section.name.clone(),
                num_chars: section.len(),
                terminal_support,
                important: section.important,
            }
        })
        .collect()
}

/// Supported and total characters per emulator over a set of rows. An
/// emulator missing from a row counts as zero.
pub fn table_totals<'a>(
    rows: &[CompatibilityRow],
    emulators: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<String, (usize, usize)> {
    let total_chars: usize = rows.iter().map(|r| r.num_chars).sum();

    emulators
        .into_iter()
        .map(|name| {
            let supported = rows
                .iter()
                .map(|r| r.terminal_support.get(name).copied().unwrap_or(0))
                .sum();
            (name.to_string(), (supported, total_chars))
        })
        .collect()
}

/// Codepoint unions of all sections and of important sections.
pub fn section_unions(sections: &[Section]) -> (BTreeSet<u32>, BTreeSet<u32>) {
    let mut covered = BTreeSet::new();
    let mut important = BTreeSet::new();
    for section in sections {
        covered.extend(section.codepoints.iter().copied());
        if section.important {
            important.extend(section.codepoints.iter().copied());
        }
    }
    (covered, important)
}

pub fn block_stats(
    table: &SupportTable,
    covered: &BTreeSet<u32>,
    important: &BTreeSet<u32>,
) -> BlockStats {
    BlockStats {
        important_supported: support_value(table, important.iter().copied().map(Codepoint)),
        important_total: important.len(),
        all_supported: support_value(table, covered.iter().copied().map(Codepoint)),
        all_total: covered.len(),
    }
}

/// Build report data for one block.
pub fn build_block_report(block: Block, sections: Vec<Section>, emulators: EmulatorIndex) -> BlockReport {
    let (covered, important) = section_unions(&sections);

    for section in &sections {
        let range = block.range();
        if let Some(stray) = section.codepoints.iter().find(|cp| !range.contains(cp)) {
            crate::diagnostics::warn(format!(
                "section {:?} of {} contains {}, outside the block",
                section.name,
                block.id(),
                Codepoint(*stray)
            ));
        }
    }

    let rows = build_rows(&sections, &emulators);
    let stats = emulators
        .iter()
        .map(|(name, table)| (name.clone(), block_stats(table, &covered, &important)))
        .collect();

    BlockReport { block, sections, emulators, rows, stats, important, covered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepoint::Verdict;
    use crate::input::parse_ranges;

    fn section(name: &str, important: bool, ranges: &str) -> Section {
        Section { name: name.into(), important, codepoints: parse_ranges(ranges).unwrap() }
    }

    fn table(entries: &[(u32, Verdict)]) -> SupportTable {
        entries.iter().map(|&(cp, v)| (Codepoint(cp), v)).collect()
    }

    #[test]
    fn maybe_counts_half_and_truncates() {
        let t = table(&[
            (0x1FB00, Verdict::Yes),
            (0x1FB01, Verdict::Yes),
            (0x1FB02, Verdict::Maybe),
            (0x1FB03, Verdict::No),
        ]);
        let cps = (0x1FB00..=0x1FB03).map(Codepoint);
        assert_eq!(support_value(&t, cps), 2);
    }

    #[test]
    fn stats_truncate_once_per_union() {
        // Two maybes split across sections: per-section truncation would give 0,
        // the union gives 1.
        let sections = vec![section("A", true, "1FB00"), section("B", false, "1FB01")];
        let t = table(&[(0x1FB00, Verdict::Maybe), (0x1FB01, Verdict::Maybe)]);
        let (covered, important) = section_unions(&sections);
        let stats = block_stats(&t, &covered, &important);
        assert_eq!(
            stats,
            BlockStats { important_supported: 0, important_total: 1, all_supported: 1, all_total: 2 }
        );
        assert_eq!(stats.other_supported(), 1);
        assert_eq!(stats.other_total(), 1);
    }

    #[test]
    fn unsurveyed_sections_count_as_no() {
        let sections = vec![section("A", true, "1FB00-1FB01"), section("B", false, "1FB10")];
        let mut emulators = EmulatorIndex::new();
        emulators.insert("emu".into(), table(&[(0x1FB00, Verdict::Yes)]));

        let rows = build_rows(&sections, &emulators);
        assert_eq!(rows[0].terminal_support["emu"], 1);
        assert_eq!(rows[1].terminal_support["emu"], 0);
    }

    #[test]
    fn totals_sum_rows() {
        let sections = vec![section("A", true, "1FB00-1FB01"), section("B", false, "1FB10-1FB11")];
        let mut emulators = EmulatorIndex::new();
        emulators.insert("emu".into(), table(&[(0x1FB00, Verdict::Yes), (0x1FB01, Verdict::Yes)]));
        let rows = build_rows(&sections, &emulators);

        let totals = table_totals(&rows, ["emu"]);
        assert_eq!(totals["emu"], (2, 4));
    }

    #[test]
    fn percent_guards_zero() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn page_data_lists_emulators_in_order() {
        let mut emulators = EmulatorIndex::new();
        emulators.insert("kitty".into(), SupportTable::default());
        emulators.insert("foot".into(), SupportTable::default());
        let report = build_block_report(Block::LegacyComputing, vec![], emulators);

        let data = PageData::from_reports(&[report]);
        assert_eq!(data.blocks[0].id, "main");
        assert_eq!(data.blocks[0].emulators, ["foot", "kitty"]);
    }
}
