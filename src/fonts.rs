//! Font tooling: cmap coverage, ToUnicode CMaps, glyph export and metrics.

pub mod checker;
pub mod cmap;
pub mod metrics;
pub mod svg;

use crate::diagnostics;
use crate::Result;

use anyhow::{anyhow, Context};
use std::fs;
use std::path::Path;

/// Raw bytes of a font file, kept alive for borrowing faces.
pub struct FontData {
    bytes: Vec<u8>,
    source: String,
}

impl FontData {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| {
            diagnostics::error_message(format!("font file not found: {}", path.display()))
        })?;
        Ok(FontData { bytes, source: path.display().to_string() })
    }

    /// Parse the first face of the file.
    pub fn face(&self) -> Result<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.bytes, 0).map_err(|e| {
            anyhow!(diagnostics::error_message(format!(
                "could not load font {}: {}",
                self.source, e
            )))
        })
    }
}
