//! Filesystem layout of the site project.

use crate::block::Block;

use std::path::{Path, PathBuf};

/// Every input and output path, derived from the project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub output: PathBuf,
    pub templates: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        ProjectLayout {
            output: root.join("index.html"),
            templates: root.join("templates"),
            root,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_templates(mut self, templates: impl Into<PathBuf>) -> Self {
        self.templates = templates.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `sections/<block>.csv`
    pub fn sections_file(&self, block: Block) -> PathBuf {
        self.root.join("sections").join(format!("{}.csv", block.id()))
    }

    /// `terminal-emulators/<block>/`
    pub fn emulator_dir(&self, block: Block) -> PathBuf {
        self.root.join("terminal-emulators").join(block.id())
    }

    /// `svgs/<block>/`
    pub fn svg_dir(&self, block: Block) -> PathBuf {
        self.root.join("svgs").join(block.id())
    }
}
