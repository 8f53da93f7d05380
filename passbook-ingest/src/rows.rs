//! Logical row assembly.
//!
//! Bank statements wrap long narrations across physical lines. A logical
//! transaction row starts at a line opening with a date token and runs until
//! the next such line; everything in between is continuation text that
//! belongs to the open row.

use regex::Regex;

/// Merges physical lines into logical transaction rows.
///
/// The row-start pattern and the header/footer prefixes are bank-specific
/// and injected by the owning parser.
pub struct RowAssembler {
    row_start: Regex,
    skip_prefixes: &'static [&'static str],
}

impl RowAssembler {
    pub fn new(row_start: Regex, skip_prefixes: &'static [&'static str]) -> Self {
        Self {
            row_start,
            skip_prefixes,
        }
    }

    /// Split `text` into logical rows.
    ///
    /// Two states: no open row, or accumulating one. A row-start line closes
    /// the open row and opens the next; a continuation line space-joins onto
    /// the open row; continuations with no open row are dropped.
    pub fn assemble(&self, text: &str) -> Vec<String> {
        let mut rows = Vec::new();
        let mut open: Option<String> = None;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || self.is_skipped(line) {
                continue;
            }

            if self.row_start.is_match(line) {
                if let Some(done) = open.take() {
                    rows.push(done);
                }
                open = Some(line.to_string());
            } else if let Some(buf) = open.as_mut() {
                buf.push(' ');
                buf.push_str(line);
            }
        }

        if let Some(done) = open {
            rows.push(done);
        }
        rows
    }

    fn is_skipped(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.skip_prefixes
            .iter()
            .any(|prefix| lower.starts_with(prefix))
    }
}
