//! Section definitions (`section,ranges`).
//!
//! Each row names a group of codepoints inside a block. A leading `*` on the
//! name flags the section as important; the `ranges` cell lists hex values and
//! inclusive hex ranges separated by whitespace, e.g. `1FB00-1FB3B 1FB70`.

use crate::codepoint::{parse_span, Codepoint, ParseCodepointError};
use crate::diagnostics;
use crate::Result;

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A named group of codepoints, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub important: bool,
    pub codepoints: BTreeSet<u32>,
}

impl Section {
    pub fn len(&self) -> usize {
        self.codepoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Codepoint> + '_ {
        self.codepoints.iter().copied().map(Codepoint)
    }
}

#[derive(Debug, Deserialize)]
struct SectionRecord {
    section: String,
    ranges: String,
}

/// Expand a whitespace-separated list of hex values and ranges into the
/// union of the codepoints they cover. A reversed range covers nothing.
pub fn parse_ranges(ranges: &str) -> Result<BTreeSet<u32>> {
    let mut out = BTreeSet::new();
    for token in ranges.split_whitespace() {
        let (start, end) = match parse_span(token) {
            Ok(span) => span,
            Err(ParseCodepointError::Reversed { .. }) => {
                log::debug!("range {:?} is reversed, skipping", token);
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("bad range {:?}", token)),
        };
        out.extend(start..=end);
    }
    Ok(out)
}

/// Split the importance marker off a section name.
pub fn parse_section_name(raw: &str) -> (String, bool) {
    let raw = raw.trim();
    match raw.strip_prefix('*') {
        Some(name) => (name.to_string(), true),
        None => (raw.to_string(), false),
    }
}

/// Read section definitions from any CSV source. `source` names the input in
/// error messages.
pub fn parse_sections<R: Read>(reader: R, source: &str) -> Result<Vec<Section>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut out = Vec::new();
    for (idx, record) in csv.deserialize::<SectionRecord>().enumerate() {
        // Header occupies line 1.
        let lno = idx + 2;
        let record = record.with_context(|| {
            diagnostics::error_message(format!("section parse error at {}:{}", source, lno))
        })?;

        let (name, important) = parse_section_name(&record.section);
        let codepoints = parse_ranges(&record.ranges).with_context(|| {
            diagnostics::error_message(format!(
                "section {:?} at {}:{} has malformed ranges",
                name, source, lno
            ))
        })?;

        out.push(Section { name, important, codepoints });
    }

    Ok(out)
}

/// Load a sections CSV, preserving row order.
pub fn load_sections(path: &Path) -> Result<Vec<Section>> {
    let file = File::open(path).with_context(|| {
        diagnostics::error_message(format!("read sections file {}", path.display()))
    })?;
    let sections = parse_sections(file, &path.display().to_string())?;
    log::debug!("loaded {} sections from {}", sections.len(), path.display());
    Ok(sections)
}
