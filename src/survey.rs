//! Interactive survey of a terminal emulator, one codepoint at a time.
//!
//! The session reads one command per input line so it works over any
//! `BufRead`; uppercase commands read their argument from the following line.

use crate::block::Block;
use crate::codepoint::{parse_span, Codepoint, Verdict};
use crate::diagnostics;
use crate::Result;

use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

pub const HELP: &str = "\
Keys:
  y = supported
  n = not supported
  m = maybe
  Y = confirm a range as supported
  N = confirm a range as not supported
  M = confirm a range as maybe
  s = skip
  S = skip to a specific codepoint
  h / l = previous / next codepoint
  q = quit (saves progress)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Mark(Verdict),
    MarkRange(Verdict),
    Skip,
    Jump,
    Back,
    Forward,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        Some(match line.trim() {
            "y" => Command::Mark(Verdict::Yes),
            "n" => Command::Mark(Verdict::No),
            "m" => Command::Mark(Verdict::Maybe),
            "Y" => Command::MarkRange(Verdict::Yes),
            "N" => Command::MarkRange(Verdict::No),
            "M" => Command::MarkRange(Verdict::Maybe),
            "s" => Command::Skip,
            "S" => Command::Jump,
            "h" => Command::Back,
            "l" => Command::Forward,
            "q" => Command::Quit,
            _ => return None,
        })
    }
}

/// Cursor and recorded verdicts for one block.
#[derive(Debug, Clone)]
pub struct Survey {
    start: u32,
    end: u32,
    cursor: u32,
    results: BTreeMap<u32, Verdict>,
}

impl Survey {
    pub fn new(block: Block) -> Self {
        let range = block.range();
        Survey {
            start: *range.start(),
            end: *range.end(),
            cursor: *range.start(),
            results: BTreeMap::new(),
        }
    }

    /// Codepoint under the cursor, or `None` once past the block.
    pub fn current(&self) -> Option<Codepoint> {
        (self.cursor <= self.end).then_some(Codepoint(self.cursor))
    }

    pub fn status(&self, cp: Codepoint) -> Option<Verdict> {
        self.results.get(&cp.0).copied()
    }

    pub fn results(&self) -> &BTreeMap<u32, Verdict> {
        &self.results
    }

    pub fn mark(&mut self, verdict: Verdict) {
        if self.cursor <= self.end {
            self.results.insert(self.cursor, verdict);
            self.cursor += 1;
        }
    }

    pub fn skip(&mut self) {
        self.cursor += 1;
    }

    pub fn back(&mut self) {
        if self.cursor > self.start {
            self.cursor -= 1;
        }
    }

    pub fn forward(&mut self) {
        if self.cursor < self.end {
            self.cursor += 1;
        }
    }

    /// Parse a range like `1FB00-1FB0F` and check it lies inside the block.
    pub fn parse_range(&self, text: &str) -> std::result::Result<(u32, u32), String> {
        let text = text.trim().to_uppercase();
        let (start, end) = parse_span(&text).map_err(|_| "Invalid range format.".to_string())?;
        if start < self.start || end > self.end {
            return Err(format!(
                "Range must be within U+{:04X}-U+{:04X}",
                self.start, self.end
            ));
        }
        Ok((start, end))
    }

    /// Mark an inclusive range and move just past it, staying inside the block.
    pub fn mark_range(&mut self, start: u32, end: u32, verdict: Verdict) {
        for cp in start..=end {
            self.results.insert(cp, verdict);
        }
        self.cursor = (end + 1).min(self.end);
    }

    pub fn jump(&mut self, text: &str) -> std::result::Result<(), String> {
        let target = text
            .trim()
            .parse::<Codepoint>()
            .map_err(|_| "Invalid codepoint.".to_string())?;
        if target.0 < self.start || target.0 > self.end {
            return Err(format!(
                "Codepoint must be within U+{:04X}-U+{:04X}",
                self.start, self.end
            ));
        }
        self.cursor = target.0;
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Drive a survey from `input` until the block ends, `q`, or end of input.
pub fn run<R: BufRead, W: Write>(survey: &mut Survey, mut input: R, mut out: W) -> Result<()> {
    while let Some(cp) = survey.current() {
        let ch = cp.as_char().map(String::from).unwrap_or_default();
        write!(out, "{}: {}  {}  > ", cp, ch, diagnostics::badge(survey.status(cp)))?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out)?;
            break;
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Mark(verdict) => survey.mark(verdict),
            Command::MarkRange(verdict) => {
                writeln!(out, "Mark range as {}:", verdict.as_str().to_uppercase())?;
                write!(out, "Enter range (e.g., 1FB00-1FB0F): ")?;
                out.flush()?;
                let Some(text) = read_line(&mut input)? else { break };
                match survey.parse_range(&text) {
                    Ok((start, end)) => {
                        survey.mark_range(start, end, verdict);
                        writeln!(out, "Marked U+{:04X}-U+{:04X} as {}", start, end, verdict)?;
                    }
                    Err(msg) => writeln!(out, "{}", msg)?,
                }
            }
            Command::Skip => survey.skip(),
            Command::Jump => {
                write!(out, "Enter codepoint (e.g., 1FB50): ")?;
                out.flush()?;
                let Some(text) = read_line(&mut input)? else { break };
                if let Err(msg) = survey.jump(&text) {
                    writeln!(out, "{}", msg)?;
                }
            }
            Command::Back => survey.back(),
            Command::Forward => survey.forward(),
            Command::Quit => {
                writeln!(out, "\nQuitting early...")?;
                break;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SurveyRecord {
    codepoint: String,
    supported: Verdict,
}

/// Write results as `codepoint,supported`, sorted by codepoint.
pub fn write_results<W: Write>(results: &BTreeMap<u32, Verdict>, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (cp, verdict) in results {
        csv.serialize(SurveyRecord { codepoint: Codepoint(*cp).label(), supported: *verdict })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn save_results(results: &BTreeMap<u32, Verdict>, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| {
        diagnostics::error_message(format!("create {}", path.display()))
    })?;
    write_results(results, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(script: &str) -> Survey {
        let mut survey = Survey::new(Block::LegacyComputing);
        let mut out = Vec::new();
        run(&mut survey, script.as_bytes(), &mut out).unwrap();
        survey
    }

    #[test]
    fn single_keys_record_and_advance() {
        let survey = drive("y\nn\nm\ns\ny\nq\n");
        let got: Vec<_> = survey.results().iter().map(|(cp, v)| (*cp, *v)).collect();
        assert_eq!(
            got,
            [
                (0x1FB00, Verdict::Yes),
                (0x1FB01, Verdict::No),
                (0x1FB02, Verdict::Maybe),
                (0x1FB04, Verdict::Yes),
            ]
        );
    }

    #[test]
    fn range_marks_and_moves_past() {
        let survey = drive("Y\n1fb00-1fb0f\nn\n");
        assert_eq!(survey.results().len(), 17);
        assert_eq!(survey.status(Codepoint(0x1FB0F)), Some(Verdict::Yes));
        assert_eq!(survey.status(Codepoint(0x1FB10)), Some(Verdict::No));
    }

    #[test]
    fn range_to_block_end_stays_on_last() {
        let survey = drive("M\nU+1FBF0-U+1FBFF\n");
        assert_eq!(survey.current(), Some(Codepoint(0x1FBFF)));
    }

    #[test]
    fn out_of_block_range_is_rejected() {
        let mut survey = Survey::new(Block::LegacyComputing);
        assert!(survey.parse_range("1CC00-1CC01").is_err());
        assert!(survey.parse_range("1FB10-1FB00").is_err());
        assert!(survey.parse_range("zz").is_err());
        assert!(survey.jump("1CC00").is_err());
        assert!(survey.jump("1FB50").is_ok());
        assert_eq!(survey.current(), Some(Codepoint(0x1FB50)));
    }

    #[test]
    fn navigation_is_clamped() {
        let survey = drive("h\nh\nl\nl\ny\n");
        assert_eq!(survey.status(Codepoint(0x1FB02)), Some(Verdict::Yes));

        let survey = drive("S\n1FBFF\nl\nl\ny\n");
        assert_eq!(survey.status(Codepoint(0x1FBFF)), Some(Verdict::Yes));
        assert_eq!(survey.current(), None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let survey = drive("x\n\nY\n");
        assert!(survey.results().is_empty());
    }

    #[test]
    fn results_csv() {
        let mut results = BTreeMap::new();
        results.insert(0x1FB01, Verdict::Maybe);
        results.insert(0x1FB00, Verdict::Yes);
        let mut buf = Vec::new();
        write_results(&results, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "codepoint,supported\nU+1FB00,yes\nU+1FB01,maybe\n"
        );
    }
}
