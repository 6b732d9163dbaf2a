//! Overview bars and compatibility tables.
//!
//! Plain string building; every interpolated name goes through
//! [`html_escape`].

use crate::block::Block;
use crate::view::{percent, table_totals, BlockReport, BlockStats, CompatibilityRow};

use std::collections::BTreeSet;
use std::fmt::Write;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Classification of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Full,
    None,
    Partial,
    Unknown,
}

impl CellClass {
    pub fn classify(value: Option<usize>, num_chars: usize) -> Self {
        match value {
            None => CellClass::Unknown,
            Some(v) if v == num_chars => CellClass::Full,
            Some(0) => CellClass::None,
            Some(_) => CellClass::Partial,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellClass::Full => "full",
            CellClass::None => "none",
            CellClass::Partial => "partial",
            CellClass::Unknown => "unknown",
        }
    }
}

pub fn render_cell(value: Option<usize>, num_chars: usize) -> String {
    let class = CellClass::classify(value, num_chars);
    let text = match (class, value) {
        (CellClass::Unknown, _) | (_, None) => "?".to_string(),
        (CellClass::Full, _) => "100%".to_string(),
        (CellClass::None, _) => "0%".to_string(),
        (CellClass::Partial, Some(v)) => format!("{:.0}%", percent(v, num_chars)),
    };
    format!(r#"<td class="{}">{}</td>"#, class.as_str(), text)
}

pub fn render_compatibility_table(
    table_id: &str,
    emulators: &[&str],
    rows: &[CompatibilityRow],
    css_class: &str,
) -> String {
    let totals = table_totals(rows, emulators.iter().copied());

    let header_cells: String = emulators
        .iter()
        .map(|e| format!("<th>{}</th>", html_escape(e)))
        .collect();

    let mut data_rows = String::new();
    for row in rows {
        data_rows.push_str("<tr>");
        let _ = write!(data_rows, "<td>{}</td>", html_escape(&row.section));
        for emulator in emulators {
            let value = row.terminal_support.get(*emulator).copied();
            data_rows.push_str(&render_cell(value, row.num_chars));
        }
        data_rows.push_str("</tr>");
    }

    let mut total_cells = String::from("<td><strong>Total</strong></td>");
    for emulator in emulators {
        let (supported, total) = totals.get(*emulator).copied().unwrap_or_default();
        let _ = write!(
            total_cells,
            r#"<td class="total"><strong>{:.0}%</strong></td>"#,
            percent(supported, total)
        );
    }

    let class_attr = if css_class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, css_class)
    };

    format!(
        r#"
        <table id="{table_id}"{class_attr}>
            <thead>
                <tr>
                    <th>Section</th>
                    {header_cells}
                </tr>
            </thead>
            <tbody>
                {data_rows}
                <tr class="totals-row">{total_cells}</tr>
            </tbody>
        </table>
"#
    )
}

/// Both table variants for one block: every section, and important only.
pub fn render_table_section(report: &BlockReport) -> String {
    let id = report.block.html_id();
    let emulators: Vec<&str> = report.emulator_names().collect();

    let all_table =
        render_compatibility_table(&format!("{id}-all"), &emulators, &report.rows, "table-all");
    let important_table = render_compatibility_table(
        &format!("{id}-important"),
        &emulators,
        &report.important_rows(),
        "table-important",
    );

    format!(
        r#"
    <div class="table-section">
        <h2>{}</h2>
        {all_table}
        {important_table}
    </div>
"#,
        html_escape(&report.block.title())
    )
}

pub fn render_tables(reports: &[BlockReport]) -> String {
    reports.iter().map(render_table_section).collect()
}

/// Two-segment bar: the important segment is sized by the share of important
/// codepoints in the block, and each segment fills with its own support.
pub fn render_progress(stats: &BlockStats) -> String {
    let important_width = percent(stats.important_total, stats.all_total);
    let other_width = percent(stats.other_total(), stats.all_total);
    let important_fill = percent(stats.important_supported, stats.important_total);
    let other_fill = percent(stats.other_supported(), stats.other_total());

    format!(
        concat!(
            r#"<div class="progress">"#,
            r#"<div class="segment important" style="width: {:.2}%"><div class="fill" style="width: {:.2}%"></div></div>"#,
            r#"<div class="segment other" style="width: {:.2}%"><div class="fill" style="width: {:.2}%"></div></div>"#,
            r#"</div>"#,
            r#"<span class="progress-label important">{}/{} ({:.0}%)</span>"#,
            r#"<span class="progress-label all">{}/{} ({:.0}%)</span>"#,
        ),
        important_width,
        important_fill,
        other_width,
        other_fill,
        stats.important_supported,
        stats.important_total,
        percent(stats.important_supported, stats.important_total),
        stats.all_supported,
        stats.all_total,
        percent(stats.all_supported, stats.all_total),
    )
}

/// One row per emulator, one column per block.
pub fn render_overview(reports: &[BlockReport]) -> String {
    let emulators: BTreeSet<&str> = reports.iter().flat_map(|r| r.emulator_names()).collect();
    let blocks: Vec<Block> = reports.iter().map(|r| r.block).collect();

    let header_cells: String = blocks
        .iter()
        .map(|b| format!("<th>{}</th>", html_escape(b.name())))
        .collect();

    let mut body = String::new();
    for emulator in &emulators {
        let _ = write!(body, "<tr><td>{}</td>", html_escape(emulator));
        for report in reports {
            match report.stats.get(*emulator) {
                Some(stats) => {
                    let _ = write!(body, r#"<td class="bar">{}</td>"#, render_progress(stats));
                }
                None => body.push_str(r#"<td class="unknown">?</td>"#),
            }
        }
        body.push_str("</tr>");
    }

    format!(
        r#"
        <table id="overview">
            <thead>
                <tr>
                    <th>Emulator</th>
                    {header_cells}
                </tr>
            </thead>
            <tbody>
                {body}
            </tbody>
        </table>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(section: &str, num_chars: usize, support: &[(&str, usize)]) -> CompatibilityRow {
        CompatibilityRow {
            section: section.into(),
            num_chars,
            terminal_support: support.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            important: true,
        }
    }

    #[test]
    fn cell_classification() {
        assert_eq!(CellClass::classify(Some(4), 4), CellClass::Full);
        assert_eq!(CellClass::classify(Some(0), 4), CellClass::None);
        assert_eq!(CellClass::classify(Some(1), 4), CellClass::Partial);
        assert_eq!(CellClass::classify(None, 4), CellClass::Unknown);
    }

    #[test]
    fn cells_render_percentages() {
        assert_eq!(render_cell(Some(1), 4), r#"<td class="partial">25%</td>"#);
        assert_eq!(render_cell(Some(4), 4), r#"<td class="full">100%</td>"#);
        assert_eq!(render_cell(Some(0), 4), r#"<td class="none">0%</td>"#);
        assert_eq!(render_cell(None, 4), r#"<td class="unknown">?</td>"#);
    }

    #[test]
    fn table_has_totals_row() {
        let rows = vec![
            row("Sextants", 4, &[("emu", 4)]),
            row("Wedges", 4, &[("emu", 0)]),
        ];
        let html = render_compatibility_table("main-all", &["emu"], &rows, "table-all");
        assert!(html.contains(r#"<table id="main-all" class="table-all">"#));
        assert!(html.contains("<th>emu</th>"));
        assert!(html.contains(r#"<td class="none">0%</td>"#));
        assert!(html.contains(r#"<td class="total"><strong>50%</strong></td>"#));
    }

    #[test]
    fn empty_table_totals_are_zero() {
        let html = render_compatibility_table("t", &["emu"], &[], "");
        assert!(html.contains(r#"<table id="t">"#));
        assert!(html.contains("<strong>0%</strong>"));
    }

    #[test]
    fn names_are_escaped() {
        let rows = vec![row("<b>", 1, &[("a&b", 1)])];
        let html = render_compatibility_table("t", &["a&b"], &rows, "");
        assert!(html.contains("<th>a&amp;b</th>"));
        assert!(html.contains("<td>&lt;b&gt;</td>"));
    }

    #[test]
    fn progress_segments() {
        let stats = BlockStats {
            important_supported: 1,
            important_total: 2,
            all_supported: 3,
            all_total: 8,
        };
        let html = render_progress(&stats);
        assert!(html.contains(r#"class="segment important" style="width: 25.00%"><div class="fill" style="width: 50.00%""#));
        assert!(html.contains(r#"class="segment other" style="width: 75.00%"><div class="fill" style="width: 33.33%""#));
        assert!(html.contains("1/2 (50%)"));
    }

    #[test]
    fn overview_has_row_per_emulator_and_column_per_block() {
        use crate::codepoint::{Codepoint, Verdict};
        use crate::input::emulators::{EmulatorIndex, SupportTable};
        use crate::input::{parse_ranges, Section};
        use crate::view::build_block_report;

        let table: SupportTable = [(Codepoint(0x1FB00), Verdict::Yes)].into_iter().collect();
        let mut main_emulators = EmulatorIndex::new();
        main_emulators.insert("foot".into(), table.clone());
        main_emulators.insert("kitty".into(), table);
        let mut supplement_emulators = EmulatorIndex::new();
        supplement_emulators.insert("kitty".into(), SupportTable::default());

        let main = build_block_report(
            Block::LegacyComputing,
            vec![Section { name: "A".into(), important: true, codepoints: parse_ranges("1FB00-1FB01").unwrap() }],
            main_emulators,
        );
        let supplement = build_block_report(
            Block::LegacyComputingSupplement,
            vec![Section { name: "B".into(), important: false, codepoints: parse_ranges("1CC00").unwrap() }],
            supplement_emulators,
        );

        let html = render_overview(&[main, supplement]);
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains(&format!("<th>{}</th>", Block::LegacyComputing.name())));
        assert!(html.contains(&format!("<th>{}</th>", Block::LegacyComputingSupplement.name())));

        let foot = html.find("<tr><td>foot</td>").unwrap();
        let kitty = html.find("<tr><td>kitty</td>").unwrap();
        assert!(foot < kitty);
        let foot_row = &html[foot..kitty];
        assert_eq!(foot_row.matches(r#"<td class="bar">"#).count(), 1);
        assert!(foot_row.contains(r#"<td class="unknown">?</td>"#));
        assert!(foot_row.contains("1/2 (50%)"));

        let kitty_row = &html[kitty..];
        assert_eq!(kitty_row.matches(r#"<td class="bar">"#).count(), 2);
        assert!(!kitty_row.contains(r#"class="unknown""#));
    }

    #[test]
    fn unused_support_map_does_not_panic() {
        let mut support = BTreeMap::new();
        support.insert("other".to_string(), 1);
        let rows = vec![CompatibilityRow { section: "S".into(), num_chars: 1, terminal_support: support, important: false }];
        let html = render_compatibility_table("t", &["emu"], &rows, "");
        assert!(html.contains(r#"<td class="unknown">?</td>"#));
    }
}
