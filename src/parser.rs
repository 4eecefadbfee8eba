// Word pair parser: reads raw input lines (from a file or stdin) and
// turns `front - back` lines into `WordPair`s. Malformed lines are not
// errors; they are collected as `SkippedLine`s so the caller can warn.

use crate::error::InputError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A validated front/back pair. Both sides are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPair {
    front: String,
    back: String,
}

impl WordPair {
    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No separator run splits the line into two parts.
    InvalidFormat,
    /// One side of the separator is blank.
    EmptyField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based position in the input.
    pub line_number: usize,
    pub text: String,
    pub reason: SkipReason,
}

impl SkippedLine {
    /// Human-readable warning for the console.
    pub fn message(&self) -> String {
        match self.reason {
            SkipReason::InvalidFormat => format!(
                "Skipping line {}: invalid format '{}'",
                self.line_number, self.text
            ),
            SkipReason::EmptyField => format!(
                "Skipping line {}: empty word or translation '{}'",
                self.line_number, self.text
            ),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub pairs: Vec<WordPair>,
    pub skipped: Vec<SkippedLine>,
}

/// One or more of `-`, `–`, `—` or tab, in any mix.
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—\t]+").expect("valid regex"));

/// Split on the first separator run only; later runs stay in the back.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let m = SEPARATOR_RE.find(line)?;
    Some((&line[..m.start()], &line[m.end()..]))
}

/// Parse word pairs from input lines, preserving input order.
///
/// Blank lines are ignored silently. Lines without a delimiter or with an
/// empty side are reported in [`ParsedInput::skipped`].
pub fn parse_word_pairs<S: AsRef<str>>(lines: &[S]) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for (idx, raw) in lines.iter().enumerate() {
        let line_number = idx + 1;
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let reason = match split_pair(line) {
            None => SkipReason::InvalidFormat,
            Some((front, back)) => {
                let (front, back) = (front.trim(), back.trim());
                if !front.is_empty() && !back.is_empty() {
                    parsed.pairs.push(WordPair {
                        front: front.to_string(),
                        back: back.to_string(),
                    });
                    continue;
                }
                SkipReason::EmptyField
            }
        };

        debug!(line_number, ?reason, "skipping input line");
        parsed.skipped.push(SkippedLine {
            line_number,
            text: line.to_string(),
            reason,
        });
    }

    debug!(
        pairs = parsed.pairs.len(),
        skipped = parsed.skipped.len(),
        "parsed input"
    );
    parsed
}

/// Read every line from `reader`.
pub fn read_lines_from<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

/// Read input lines from `file_path`, or from stdin when no path is given.
pub fn read_input(file_path: Option<&Path>) -> Result<Vec<String>, InputError> {
    match file_path {
        Some(path) => {
            let file = File::open(path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
                _ => InputError::Read {
                    path: path.to_path_buf(),
                    source: e,
                },
            })?;
            read_lines_from(BufReader::new(file)).map_err(|source| InputError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        None => read_lines_from(io::stdin().lock()).map_err(InputError::Stdin),
    }
}
