//! Tooling behind the "Are We Legacy Computing Yet?" site: compatibility
//! report generation, font coverage checks, terminal surveys and glyph export
//! for Unicode's Symbols for Legacy Computing blocks.

pub mod block;
pub mod codepoint;
pub mod config;
pub mod diagnostics;
pub mod fonts;
pub mod input;
pub mod render;
pub mod report;
pub mod survey;
pub mod view;

pub type Result<T> = anyhow::Result<T>;
