//! Page assembly: fill the static template with rendered fragments.

pub mod grid;
pub mod html;

use crate::diagnostics;
use crate::view::{BlockReport, PageData};
use crate::Result;

use anyhow::Context;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use grid::Glyphs;

const BUILTIN_PAGE: &str = include_str!("../templates/index.html");
const BUILTIN_STYLE: &str = include_str!("../templates/style.css");
const BUILTIN_SCRIPT: &str = include_str!("../templates/script.js");

/// The page skeleton plus its inlined stylesheet and script.
#[derive(Debug, Clone)]
pub struct Templates {
    pub page: String,
    pub style: String,
    pub script: String,
}

impl Templates {
    /// Copy compiled into the binary.
    pub fn builtin() -> Self {
        Templates {
            page: BUILTIN_PAGE.to_string(),
            style: BUILTIN_STYLE.to_string(),
            script: BUILTIN_SCRIPT.to_string(),
        }
    }

    /// Read `index.html`, `style.css` and `script.js` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path)
                .with_context(|| diagnostics::error_message(format!("read template {}", path.display())))
        };
        Ok(Templates {
            page: read("index.html")?,
            style: read("style.css")?,
            script: read("script.js")?,
        })
    }

    /// Prefer an on-disk template directory, fall back to the builtin copy.
    pub fn load_or_builtin(dir: &Path) -> Result<Self> {
        if dir.is_dir() {
            log::debug!("using templates from {}", dir.display());
            Self::load(dir)
        } else {
            log::debug!("no template directory at {}, using builtin", dir.display());
            Ok(Self::builtin())
        }
    }
}

/// Replace every `__NAME__` placeholder in one pass. Inserted text is never
/// rescanned, so fragments may contain anything. Unknown placeholders are
/// left untouched.
pub fn substitute(template: &str, values: &BTreeMap<&str, String>) -> Result<String> {
    const PLACEHOLDER_RE: &str = r"__([A-Z]+)__";
    let re = Regex::new(PLACEHOLDER_RE)?;
    Ok(re
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(v) => v.clone(),
            None => caps[0].to_string(),
        })
        .into_owned())
}

/// Render the complete, self-contained page.
pub fn render_page(reports: &[BlockReport], glyphs: &[Glyphs], templates: &Templates) -> Result<String> {
    let data = serde_json::to_string(&PageData::from_reports(reports))?; // embedded as JS object literal

    let empty = Glyphs::default();
    let grids: String = reports
        .iter()
        .enumerate()
        .map(|(idx, report)| grid::render_grid_section(report, glyphs.get(idx).unwrap_or(&empty)))
        .collect();

    let mut values = BTreeMap::new();
    values.insert("STYLE", templates.style.clone());
    values.insert("SCRIPT", templates.script.clone());
    values.insert("OVERVIEW", html::render_overview(reports));
    values.insert("TABLES", html::render_tables(reports));
    values.insert("GRIDS", grids);
    values.insert("DATA", data);

    substitute(&templates.page, &values)
}
