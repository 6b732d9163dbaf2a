//! Per-emulator verdict files (`codepoint,supported`).

use crate::codepoint::{CellStatus, Codepoint, Verdict};
use crate::diagnostics;
use crate::Result;

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Verdicts recorded for one emulator, keyed by codepoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportTable {
    verdicts: BTreeMap<Codepoint, Verdict>,
}

/// Emulator name (file stem) to its verdicts, in name order.
pub type EmulatorIndex = BTreeMap<String, SupportTable>;

#[derive(Debug, Deserialize)]
struct SupportRecord {
    codepoint: String,
    supported: String,
}

impl SupportTable {
    pub fn insert(&mut self, cp: Codepoint, verdict: Verdict) -> Option<Verdict> {
        self.verdicts.insert(cp, verdict)
    }

    pub fn get(&self, cp: Codepoint) -> Option<Verdict> {
        self.verdicts.get(&cp).copied()
    }

    /// Lookup used for table aggregation: missing codepoints count as `no`.
    pub fn verdict_or_no(&self, cp: Codepoint) -> Verdict {
        self.get(cp).unwrap_or(Verdict::No)
    }

    /// Lookup used for glyph grids: missing codepoints are `unknown`.
    pub fn cell_status(&self, cp: Codepoint) -> CellStatus {
        self.get(cp).map_or(CellStatus::Unknown, CellStatus::Known)
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Codepoint, Verdict)> + '_ {
        self.verdicts.iter().map(|(cp, v)| (*cp, *v))
    }
}

impl FromIterator<(Codepoint, Verdict)> for SupportTable {
    fn from_iter<I: IntoIterator<Item = (Codepoint, Verdict)>>(iter: I) -> Self {
        SupportTable { verdicts: iter.into_iter().collect() }
    }
}

/// Read one verdict file. Rows with a blank `supported` cell are treated as
/// not yet surveyed.
pub fn parse_emulator<R: Read>(reader: R, source: &str) -> Result<SupportTable> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut table = SupportTable::default();
    for (idx, record) in csv.deserialize::<SupportRecord>().enumerate() {
        let lno = idx + 2;
        let record = record.with_context(|| {
            diagnostics::error_message(format!("verdict parse error at {}:{}", source, lno))
        })?;

        if record.supported.is_empty() {
            continue;
        }

        let cp: Codepoint = record.codepoint.parse().with_context(|| {
            diagnostics::error_message(format!("bad codepoint at {}:{}", source, lno))
        })?;
        let verdict: Verdict = record.supported.parse().with_context(|| {
            diagnostics::error_message(format!("bad verdict for {} at {}:{}", cp, source, lno))
        })?;

        if let Some(prev) = table.insert(cp, verdict) {
            if prev != verdict {
                diagnostics::warn(format!(
                    "{} listed twice in {} ({} then {}); keeping {}",
                    cp, source, prev, verdict, verdict
                ));
            }
        }
    }

    Ok(table)
}

pub fn load_emulator(path: &Path) -> Result<SupportTable> {
    let file = File::open(path).with_context(|| {
        diagnostics::error_message(format!("read verdict file {}", path.display()))
    })?;
    parse_emulator(file, &path.display().to_string())
}

/// Load every `*.csv` in `dir`, keyed by file stem.
pub fn load_emulators(dir: &Path) -> Result<EmulatorIndex> {
    let entries = fs::read_dir(dir).with_context(|| {
        diagnostics::error_message(format!("list emulator directory {}", dir.display()))
    })?;

    let mut out = EmulatorIndex::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            diagnostics::warn(format!("skipping non UTF-8 file name {}", path.display()));
            continue;
        };

        let table = load_emulator(&path)?;
        log::debug!("{}: {} verdicts", name, table.len());
        out.insert(name.to_string(), table);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "codepoint,supported\nU+1FB00,yes\nU+1FB01,No\nU+1FB02, MAYBE \nU+1FB04,\n";

    #[test]
    fn verdicts_are_lowercased_and_blank_rows_skipped() {
        let table = parse_emulator(SAMPLE.as_bytes(), "emu.csv").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(Codepoint(0x1FB01)), Some(Verdict::No));
        assert_eq!(table.get(Codepoint(0x1FB02)), Some(Verdict::Maybe));
        assert_eq!(table.get(Codepoint(0x1FB04)), None);
    }

    #[test]
    fn defaults_differ_between_tables_and_grids() {
        let table = parse_emulator(SAMPLE.as_bytes(), "emu.csv").unwrap();
        let missing = Codepoint(0x1FB03);
        assert_eq!(table.verdict_or_no(missing), Verdict::No);
        assert_eq!(table.cell_status(missing), CellStatus::Unknown);
        assert_eq!(table.cell_status(Codepoint(0x1FB00)), CellStatus::Known(Verdict::Yes));
    }

    #[test]
    fn unknown_verdict_is_an_error() {
        let data = "codepoint,supported\nU+1FB00,sometimes\n";
        let err = parse_emulator(data.as_bytes(), "emu.csv").unwrap_err();
        assert!(format!("{:#}", err).contains("emu.csv:2"));
    }

    #[test]
    fn directory_listing_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wezterm.csv"), "codepoint,supported\nU+1FB00,yes\n").unwrap();
        fs::write(dir.path().join("alacritty.csv"), "codepoint,supported\nU+1FB00,no\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a csv").unwrap();

        let index = load_emulators(dir.path()).unwrap();
        let names: Vec<_> = index.keys().map(String::as_str).collect();
        assert_eq!(names, ["alacritty", "wezterm"]);
    }
}
