//! CSV inputs: section definitions and per-emulator verdicts.

pub mod emulators;
pub mod sections;

pub use emulators::{load_emulator, load_emulators, SupportTable};
pub use sections::{load_sections, parse_ranges, parse_section_name, Section};
