use std::fmt;

use log::warn;

use crate::timecode::{format_timecode, parse_timecode};

// @module: Subtitle document parsing and building

// @struct: Single timed subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Sequence number (1-based)
    pub index: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Displayed text lines
    pub lines: Vec<String>,
}

impl Cue {
    /// Creates a new cue
    pub fn new(index: usize, start_time_ms: u64, end_time_ms: u64, lines: Vec<String>) -> Self {
        Cue {
            index,
            start_time_ms,
            end_time_ms,
            lines,
        }
    }

    /// Cue text with lines joined by newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Convert start time to formatted timecode
    pub fn format_start_time(&self) -> String {
        format_timecode(self.start_time_ms)
    }

    /// Convert end time to formatted timecode
    pub fn format_end_time(&self) -> String {
        format_timecode(self.end_time_ms)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Parse a plain-text subtitle document into cues.
///
/// Blocks are separated by blank lines; each block carries a sequence
/// number, a `start --> end` timecode line and zero or more text lines. A
/// missing or non-numeric sequence number falls back to the block's
/// 1-based position. Blocks without a parseable timecode line are skipped;
/// parsing itself never fails.
pub fn parse(document: &str) -> Vec<Cue> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in document.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    let mut cues = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        let position = i + 1;
        match parse_block(block, position) {
            Some(cue) => cues.push(cue),
            None => warn!("Skipping malformed subtitle block at position {}", position),
        }
    }
    cues
}

/// Parse one block of non-empty lines into a cue.
fn parse_block(block: &[&str], position: usize) -> Option<Cue> {
    let first = block.first()?.trim();

    let (index, rest) = match first.parse::<usize>() {
        Ok(n) if n > 0 => (n, &block[1..]),
        _ if first.contains("-->") => (position, block),
        _ => (position, &block[1..]),
    };

    let time_line = rest.first()?.trim();
    let (start_text, end_text) = time_line.split_once("-->")?;
    let start_ms = parse_timecode(start_text).ok()?;
    let end_ms = parse_timecode(end_text).ok()?;

    let lines = rest[1..].iter().map(|l| l.trim().to_string()).collect();
    Some(Cue::new(index, start_ms, end_ms, lines))
}

/// Build the plain-text representation of a cue list, renumbering indices
/// densely from 1.
pub fn build(cues: &[Cue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&(i + 1).to_string());
        out.push('\n');
        out.push_str(&format_timecode(cue.start_time_ms));
        out.push_str(" --> ");
        out.push_str(&format_timecode(cue.end_time_ms));
        out.push('\n');
        for line in &cue.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
