//! The line source: buffered reading with terminator accounting.
//!
//! The engine processes logically terminator-free lines, but echoing a
//! file byte-for-byte requires knowing exactly which bytes ended each
//! line. `LineReader` therefore tags every line with the terminator it
//! stripped (or kept, depending on the configured mode).

use std::io::BufRead;

use crate::error::Result;

/// How line terminators are treated on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Newline {
    /// Strip `\r\n` or `\n` from the line text and remember the exact
    /// bytes removed. The default.
    #[default]
    Strip,
    /// Leave the terminator attached to the line text; the recorded
    /// ending is empty.
    Keep,
}

/// One raw input line tagged with the terminator that ended it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Line text, terminator-free under `Newline::Strip`.
    pub text: String,
    /// The stripped terminator bytes; empty for the final line of a
    /// source without a trailing newline, and always empty under
    /// `Newline::Keep`.
    pub ending: String,
}

/// Pulls terminator-tagged lines out of any buffered reader.
pub struct LineReader<R> {
    inner: R,
    mode: Newline,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, mode: Newline) -> Self {
        Self { inner, mode }
    }

    /// The next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<RawLine>> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut text = String::from_utf8_lossy(&buf).into_owned();
        let ending = if text.ends_with("\r\n") {
            "\r\n"
        } else if text.ends_with('\n') {
            "\n"
        } else {
            ""
        };
        match self.mode {
            Newline::Keep => Ok(Some(RawLine {
                text,
                ending: String::new(),
            })),
            Newline::Strip => {
                text.truncate(text.len() - ending.len());
                Ok(Some(RawLine {
                    text,
                    ending: ending.to_string(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &str, mode: Newline) -> Vec<RawLine> {
        let mut reader = LineReader::new(input.as_bytes(), mode);
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_strip_records_exact_terminators() {
        let lines = read_all("a\r\nb\nc", Newline::Strip);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[0].ending, "\r\n");
        assert_eq!(lines[1].text, "b");
        assert_eq!(lines[1].ending, "\n");
        assert_eq!(lines[2].text, "c");
        assert_eq!(lines[2].ending, "");
    }

    #[test]
    fn test_keep_leaves_terminator_in_text() {
        let lines = read_all("a\r\nb\n", Newline::Keep);
        assert_eq!(lines[0].text, "a\r\n");
        assert_eq!(lines[0].ending, "");
        assert_eq!(lines[1].text, "b\n");
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(read_all("", Newline::Strip).is_empty());
    }

    #[test]
    fn test_blank_line_is_a_record() {
        let lines = read_all("\n\n", Newline::Strip);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[0].ending, "\n");
    }
}
