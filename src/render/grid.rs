//! Per-emulator glyph grids with inlined SVGs.

use crate::codepoint::Codepoint;
use crate::input::SupportTable;
use crate::render::html::html_escape;
use crate::view::BlockReport;

use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Pre-rendered glyph SVGs for one block, keyed by codepoint.
#[derive(Debug, Clone, Default)]
pub struct Glyphs {
    svgs: BTreeMap<Codepoint, String>,
}

impl Glyphs {
    /// Load `U+XXXXX.svg` for each requested codepoint. Missing files and a
    /// missing directory are not errors; those cells render empty.
    pub fn load(dir: &Path, cps: impl IntoIterator<Item = Codepoint>) -> Self {
        let mut svgs = BTreeMap::new();
        if !dir.is_dir() {
            log::debug!("no glyph directory at {}", dir.display());
            return Glyphs { svgs };
        }

        for cp in cps {
            let path = dir.join(format!("{}.svg", cp.label()));
            match fs::read_to_string(&path) {
                Ok(text) => {
                    svgs.insert(cp, strip_xml_declaration(&text).to_string());
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("cannot read {}: {}", path.display(), e),
            }
        }
        log::debug!("loaded {} glyphs from {}", svgs.len(), dir.display());
        Glyphs { svgs }
    }

    pub fn get(&self, cp: Codepoint) -> Option<&str> {
        self.svgs.get(&cp).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.svgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.svgs.is_empty()
    }
}

impl FromIterator<(Codepoint, String)> for Glyphs {
    fn from_iter<I: IntoIterator<Item = (Codepoint, String)>>(iter: I) -> Self {
        Glyphs { svgs: iter.into_iter().collect() }
    }
}

/// Drop a leading `<?xml ... ?>` so the markup can be inlined.
pub fn strip_xml_declaration(svg: &str) -> &str {
    let trimmed = svg.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return trimmed[end + 2..].trim();
        }
    }
    trimmed.trim_end()
}

fn render_glyph_cell(out: &mut String, cp: Codepoint, report: &BlockReport, table: &SupportTable, glyphs: &Glyphs) {
    if !report.covered.contains(&cp.0) {
        out.push_str(r#"<div class="cell blank"></div>"#);
        return;
    }

    let status = table.cell_status(cp);
    let dim = if report.important.contains(&cp.0) { "" } else { " dim" };
    let _ = write!(
        out,
        r#"<div class="cell {}{}" title="{} {}">"#,
        status.css_class(),
        dim,
        cp.label(),
        status.css_class()
    );
    match glyphs.get(cp) {
        Some(svg) => out.push_str(svg),
        None => out.push_str(r#"<span class="placeholder"></span>"#),
    }
    out.push_str("</div>");
}

/// A 16-column grid covering the block, one row per 16 codepoints.
pub fn render_grid(report: &BlockReport, emulator: &str, table: &SupportTable, glyphs: &Glyphs, active: bool) -> String {
    let range = report.block.range();
    let first_row = range.start() >> 4;
    let last_row = range.end() >> 4;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="glyph-grid{}" data-block="{}" data-emulator="{}">"#,
        if active { " active" } else { "" },
        report.block.html_id(),
        html_escape(emulator)
    );

    out.push_str(r#"<div class="grid-header"></div>"#);
    for col in 0..16 {
        let _ = write!(out, r#"<div class="grid-header">{:X}</div>"#, col);
    }

    for row in first_row..=last_row {
        let _ = write!(out, r#"<div class="row-header">{:X}x</div>"#, row);
        for col in 0..16 {
            let cp = Codepoint((row << 4) | col);
            if range.contains(&cp.0) {
                render_glyph_cell(&mut out, cp, report, table, glyphs);
            } else {
                out.push_str(r#"<div class="cell blank"></div>"#);
            }
        }
    }

    out.push_str("</div>");
    out
}

/// Emulator picker plus one grid per emulator; the first grid is active.
pub fn render_grid_section(report: &BlockReport, glyphs: &Glyphs) -> String {
    let block_id = report.block.html_id();

    let mut picker = String::new();
    let mut grids = String::new();
    for (idx, (name, table)) in report.emulators.iter().enumerate() {
        let active = idx == 0;
        let _ = write!(
            picker,
            r#"<button data-emulator="{}"{}>{}</button>"#,
            html_escape(name),
            if active { r#" class="active""# } else { "" },
            html_escape(name)
        );
        grids.push_str(&render_grid(report, name, table, glyphs, active));
        grids.push('\n');
    }

    format!(
        r#"
    <div class="grid-section" id="{block_id}-grids">
        <h2>{}</h2>
        <div class="emulator-picker" data-block="{block_id}">{picker}</div>
        {grids}
    </div>
"#,
        html_escape(&report.block.title())
    )
}
