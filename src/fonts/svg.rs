//! Render glyph outlines to standalone SVG files.

use crate::block::Block;
use crate::codepoint::Codepoint;
use crate::diagnostics;
use crate::fonts::cmap::{filter_range, GlyphMap};
use crate::Result;

use anyhow::Context;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Fixed cell width in font units.
pub const CELL_WIDTH: i32 = 720;

/// Collects outline commands as SVG path data in font units (y up).
#[derive(Debug, Default)]
pub struct SvgPathBuilder {
    d: String,
}

impl SvgPathBuilder {
    pub fn finish(self) -> String {
        self.d
    }

    fn push(&mut self, cmd: char, coords: &[f32]) {
        self.d.push(cmd);
        for (i, v) in coords.iter().enumerate() {
            if i > 0 {
                self.d.push(' ');
            }
            let _ = write!(self.d, "{}", v);
        }
    }
}

impl OutlineBuilder for SvgPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push('M', &[x, y]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push('L', &[x, y]);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push('Q', &[x1, y1, x, y]);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.push('C', &[x1, y1, x2, y2, x, y]);
    }

    fn close(&mut self) {
        self.d.push('Z');
    }
}

/// Path data for one glyph, or `None` when it has no contours.
pub fn glyph_path(face: &Face<'_>, glyph: GlyphId) -> Option<String> {
    let mut builder = SvgPathBuilder::default();
    face.outline_glyph(glyph, &mut builder)?;
    let d = builder.finish();
    (!d.trim().is_empty()).then_some(d)
}

/// Wrap path data in a document. The group flips font y-up coordinates into
/// SVG's y-down space with the baseline at `ascent`.
pub fn svg_document(path: &str, ascent: i32, descent: i32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">
  <g transform="translate(0, {}) scale(1, -1)">
    <path d="{}" fill="currentColor"/>
  </g>
</svg>"#,
        CELL_WIDTH,
        ascent - descent,
        ascent,
        path
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub generated: usize,
    pub skipped: usize,
}

/// Write `U+XXXXX.svg` for every mapped glyph inside the block.
pub fn export_glyphs(face: &Face<'_>, map: &GlyphMap, block: Block, out_dir: &Path) -> Result<ExportSummary> {
    let targets = filter_range(map, block.range());
    log::info!("{} of {} mapped glyphs fall in {}", targets.len(), map.len(), block.id());

    fs::create_dir_all(out_dir).with_context(|| {
        diagnostics::error_message(format!("create output directory {}", out_dir.display()))
    })?;

    let ascent = i32::from(face.ascender());
    let descent = i32::from(face.descender());
    log::debug!("ascent {}, descent {}, cell {}x{}", ascent, descent, CELL_WIDTH, ascent - descent);

    let mut by_codepoint: Vec<(u32, u32)> = targets.into_iter().collect();
    by_codepoint.sort_by_key(|(_, cp)| *cp);

    let mut summary = ExportSummary::default();
    for (gid, cp) in by_codepoint {
        let path = u16::try_from(gid)
            .ok()
            .filter(|gid| *gid < face.number_of_glyphs())
            .and_then(|gid| glyph_path(face, GlyphId(gid)));
        let Some(path) = path else {
            log::debug!("glyph {} for {} has no outline", gid, Codepoint(cp));
            summary.skipped += 1;
            continue;
        };

        let file = out_dir.join(format!("U+{:05X}.svg", cp));
        fs::write(&file, svg_document(&path, ascent, descent))
            .with_context(|| diagnostics::error_message(format!("write {}", file.display())))?;
        summary.generated += 1;
    }

    Ok(summary)
}
