//! The CSV field-splitting strategy.
//!
//! Operates on one pre-terminator-stripped line:
//! - fields are comma-separated;
//! - a field may be wrapped in double quotes, inside which `""` is a
//!   literal quote and commas are verbatim;
//! - unquoted fields may contain anything except commas and quotes.
//!
//! Quoted fields cannot contain line breaks, because the reader has
//! already broken the input into lines. In strict mode any text that
//! does not decompose into the grammar is an error; in lenient mode the
//! unparsed gaps are swallowed into the adjacent field instead.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AwkError, Result};
use crate::splitter::FieldSplitter;

// One field anchored to the line start or a comma: a quoted run with
// `""` escapes, or a bare run free of commas and quotes.
static CSV_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|,)("(?:""|[^"])*"|[^,"]*)"#).expect("static pattern"));

/// A `FieldSplitter` that parses each line as CSV.
///
/// This is not the same as splitting on a literal comma: quoted commas
/// stay inside their field.
pub fn splitter(strict: bool) -> FieldSplitter {
    FieldSplitter::Custom(Box::new(move |line| split_csv(line, strict)))
}

/// Split one line using the CSV grammar.
///
/// Returns the ordered field strings with wrapping quotes removed and
/// doubled quotes collapsed. With `strict` set, a line that does not
/// decompose cleanly fails with [`AwkError::Format`]; otherwise the
/// leftover text is merged into the neighbouring field.
pub fn split_csv(line: &str, strict: bool) -> Result<Vec<String>> {
    // (field text, start of match, end of match) per grammar match.
    let mut matched: Vec<(&str, usize, usize)> = Vec::new();
    for caps in CSV_FIELD.captures_iter(line) {
        if let (Some(whole), Some(group)) = (caps.get(0), caps.get(1)) {
            matched.push((group.as_str(), whole.start(), whole.end()));
        }
    }

    let mut fields = Vec::with_capacity(matched.len());
    for (i, (text, _, end)) in matched.iter().enumerate() {
        // The gap is whatever the grammar failed to claim between this
        // field and the next one.
        let next_start = matched.get(i + 1).map_or(line.len(), |(_, start, _)| *start);
        let gap = &line[*end..next_start];
        if !gap.is_empty() && strict {
            return Err(AwkError::Format {
                line: line.to_string(),
            });
        }
        fields.push(format!("{gap}{text}"));
    }

    Ok(fields
        .iter()
        .map(|f| f.trim_matches('"').replace("\"\"", "\""))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(split_csv("a,b,c", true).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        let fields = split_csv(r#"a,"b,c","d""e""#, true).unwrap();
        assert_eq!(fields, vec!["a", "b,c", "d\"e"]);
    }

    #[test]
    fn test_empty_fields_survive() {
        assert_eq!(split_csv("a,,b,", true).unwrap(), vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_empty_line_is_one_empty_field() {
        assert_eq!(split_csv("", true).unwrap(), vec![""]);
    }

    #[test]
    fn test_strict_rejects_unmatched_quote() {
        let err = split_csv(r#"a,"bc"#, true).unwrap_err();
        assert!(matches!(err, AwkError::Format { .. }));
    }

    #[test]
    fn test_lenient_swallows_unparsed_text() {
        let fields = split_csv(r#"a,"bc"#, false).unwrap();
        assert_eq!(fields, vec!["a", "bc"]);
    }

    #[test]
    fn test_strict_rejects_quote_inside_bare_field() {
        let err = split_csv(r#"ab"cd,e"#, true).unwrap_err();
        assert!(matches!(err, AwkError::Format { .. }));
    }

    #[test]
    fn test_splitter_strategy_plugs_into_split() {
        let strategy = splitter(true);
        assert_eq!(
            strategy.split(r#"x,"y,z""#).unwrap(),
            vec!["x", "y,z"]
        );
    }
}
