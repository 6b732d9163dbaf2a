//! The report pipeline: load every block present, aggregate, render.

use crate::block::Block;
use crate::codepoint::Codepoint;
use crate::config::ProjectLayout;
use crate::diagnostics;
use crate::input::{load_emulators, load_sections};
use crate::render::{render_page, Glyphs, Templates};
use crate::view::{build_block_report, BlockReport};
use crate::Result;

use anyhow::Context;
use std::fs;

/// Load one block, or `None` when its sections file or emulator directory
/// does not exist.
pub fn load_block(layout: &ProjectLayout, block: Block) -> Result<Option<(BlockReport, Glyphs)>> {
    let sections_file = layout.sections_file(block);
    let emulator_dir = layout.emulator_dir(block);

    if !sections_file.is_file() {
        diagnostics::warn(format!(
            "skipping {}: no sections file at {}",
            block.id(),
            sections_file.display()
        ));
        return Ok(None);
    }
    if !emulator_dir.is_dir() {
        diagnostics::warn(format!(
            "skipping {}: no emulator directory at {}",
            block.id(),
            emulator_dir.display()
        ));
        return Ok(None);
    }

    let sections = load_sections(&sections_file)?;
    let emulators = load_emulators(&emulator_dir)?;
    log::info!(
        "{}: {} sections, {} emulators",
        block.id(),
        sections.len(),
        emulators.len()
    );

    let report = build_block_report(block, sections, emulators);
    let glyphs = Glyphs::load(
        &layout.svg_dir(block),
        report.covered.iter().copied().map(Codepoint),
    );

    Ok(Some((report, glyphs)))
}

/// Build the page for every block present under the project root.
pub fn build_report(layout: &ProjectLayout, templates: &Templates) -> Result<String> {
    let mut reports = Vec::new();
    let mut glyphs = Vec::new();
    for block in Block::ALL {
        if let Some((report, block_glyphs)) = load_block(layout, block)? {
            reports.push(report);
            glyphs.push(block_glyphs);
        }
    }

    if reports.is_empty() {
        diagnostics::warn(format!("no block data found under {}", layout.root().display()));
    }

    render_page(&reports, &glyphs, templates)
}

/// Build the page and write it to the layout's output path.
pub fn generate(layout: &ProjectLayout) -> Result<()> {
    let templates = Templates::load_or_builtin(&layout.templates)?;
    let html = build_report(layout, &templates)?;
    let html_len = html.len();
    fs::write(&layout.output, html).with_context(|| {
        diagnostics::error_message(format!("write {}", layout.output.display()))
    })?;
    log::debug!("{} bytes written", html_len);
    Ok(())
}
