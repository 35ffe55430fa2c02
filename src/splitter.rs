//! Field splitting strategies.
//!
//! A splitter is a pure `line -> fields` function selected when the
//! engine is built. Strategies hold no per-line state and never mutate
//! their input; fields are recomputed fresh for every record.

use std::fmt;

use regex::Regex;

use crate::error::Result;

/// Strategy used to derive fields from a record.
pub enum FieldSplitter {
    /// Split on every non-overlapping match of a pattern. An empty
    /// pattern yields one field per character instead of erroring.
    Pattern(Regex),
    /// Split on a fixed substring. An empty separator yields one field
    /// per character.
    Literal(String),
    /// Any `line -> fields` function. Errors propagate to the engine
    /// and abort the run at the offending line.
    Custom(Box<dyn Fn(&str) -> Result<Vec<String>>>),
}

impl FieldSplitter {
    /// The default splitter: collapse runs of spaces.
    pub fn whitespace() -> Self {
        FieldSplitter::Pattern(Regex::new(" +").expect("static pattern"))
    }

    /// Split one line into fields.
    pub fn split(&self, line: &str) -> Result<Vec<String>> {
        match self {
            FieldSplitter::Pattern(re) => {
                if line.is_empty() {
                    Ok(Vec::new())
                } else if re.as_str().is_empty() {
                    Ok(line.chars().map(String::from).collect())
                } else {
                    Ok(re.split(line).map(str::to_string).collect())
                }
            }
            FieldSplitter::Literal(sep) => {
                if sep.is_empty() {
                    Ok(line.chars().map(String::from).collect())
                } else {
                    Ok(line.split(sep.as_str()).map(str::to_string).collect())
                }
            }
            FieldSplitter::Custom(f) => f(line),
        }
    }
}

impl Default for FieldSplitter {
    fn default() -> Self {
        FieldSplitter::whitespace()
    }
}

impl fmt::Debug for FieldSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSplitter::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            FieldSplitter::Literal(sep) => f.debug_tuple("Literal").field(sep).finish(),
            FieldSplitter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
