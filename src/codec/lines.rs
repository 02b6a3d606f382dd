//! Line filter for the instance text format.
//!
//! Yields trimmed lines that are neither blank nor comments (first
//! non-whitespace character `#`), paired with their 1-based line number in
//! the source so parse errors can point at the offending line. The iterator
//! is lazy and finite; restart it by reopening the source.

use std::io::{self, BufRead, Lines};

/// Iterator over the significant lines of a reader.
pub struct SignificantLines<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> SignificantLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Number of source lines consumed so far (significant or not)
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for SignificantLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Some(Ok((self.line_no, trimmed.to_owned())));
        }
    }
}
