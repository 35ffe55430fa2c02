//! Ready-made conditions and actions.
//!
//! Conditions are plain closures over the record context; these
//! builders cover the common cases. `find` yields the match offset (0
//! included — offsets are truthy), `matches` tests a pattern anchored
//! at the start of the line, `search` tests it anywhere.

use regex::Regex;

use crate::context::RecordContext;
use crate::error::Result;
use crate::value::Value;

/// Condition that matches every record.
pub fn always() -> impl FnMut(&mut RecordContext<'_>) -> Result<Value> {
    |_ctx: &mut RecordContext<'_>| Ok(Value::Bool(true))
}

/// Condition yielding the byte offset of the first occurrence of
/// `substring` in the line, or `false` when absent.
pub fn find(substring: impl Into<String>) -> impl FnMut(&mut RecordContext<'_>) -> Result<Value> {
    let substring = substring.into();
    move |ctx: &mut RecordContext<'_>| {
        Ok(match ctx.line().find(&substring) {
            Some(offset) => Value::Int(offset as i64),
            None => Value::Bool(false),
        })
    }
}

/// Condition yielding the matched text when the pattern matches at the
/// start of the line, else `false`.
pub fn matches(pattern: Regex) -> impl FnMut(&mut RecordContext<'_>) -> Result<Value> {
    move |ctx: &mut RecordContext<'_>| {
        // The leftmost match starts at 0 or no match does.
        Ok(match pattern.find(ctx.line()) {
            Some(m) if m.start() == 0 => Value::Str(m.as_str().to_string()),
            _ => Value::Bool(false),
        })
    }
}

/// Condition yielding the matched text when the pattern matches
/// anywhere in the line, else `false`.
pub fn search(pattern: Regex) -> impl FnMut(&mut RecordContext<'_>) -> Result<Value> {
    move |ctx: &mut RecordContext<'_>| {
        Ok(match pattern.find(ctx.line()) {
            Some(m) => Value::Str(m.as_str().to_string()),
            None => Value::Bool(false),
        })
    }
}

/// Action that re-emits the record byte-for-byte, terminator included.
pub fn echo() -> impl FnMut(&mut RecordContext<'_>) -> Result<()> {
    |ctx: &mut RecordContext<'_>| ctx.echo()
}

/// Action that prints the line with the configured output terminator.
pub fn print_line() -> impl FnMut(&mut RecordContext<'_>) -> Result<()> {
    |ctx: &mut RecordContext<'_>| {
        let line = ctx.line().to_string();
        ctx.print(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Record;
    use std::collections::HashMap;

    fn eval<C>(cond: &mut C, line: &str) -> Value
    where
        C: FnMut(&mut RecordContext<'_>) -> Result<Value>,
    {
        let mut vars = HashMap::new();
        let mut out = Vec::new();
        let record = Record {
            line: line.to_string(),
            ending: "\n".to_string(),
            fields: vec![line.to_string()],
        };
        let mut ctx = RecordContext::new(
            Some(record),
            Some("mem"),
            1,
            Some(1),
            &mut vars,
            &mut out,
            " ",
            "\n",
        );
        cond(&mut ctx).unwrap()
    }

    #[test]
    fn test_find_yields_offset_or_false() {
        let mut cond = find("X");
        assert_eq!(eval(&mut cond, "fooXbar"), Value::Int(3));
        assert_eq!(eval(&mut cond, "foobar"), Value::Bool(false));
    }

    #[test]
    fn test_find_offset_zero_is_truthy() {
        let mut cond = find("f");
        let result = eval(&mut cond, "foo");
        assert_eq!(result, Value::Int(0));
        assert!(result.is_truthy());
    }

    #[test]
    fn test_matches_is_anchored() {
        let mut cond = matches(Regex::new("[0-9]+").unwrap());
        assert_eq!(eval(&mut cond, "42nd"), Value::Str("42".to_string()));
        assert_eq!(eval(&mut cond, "n42"), Value::Bool(false));
    }

    #[test]
    fn test_search_matches_anywhere() {
        let mut cond = search(Regex::new("[0-9]+").unwrap());
        assert_eq!(eval(&mut cond, "n42"), Value::Str("42".to_string()));
        assert_eq!(eval(&mut cond, "none"), Value::Bool(false));
    }

    #[test]
    fn test_always_matches_anything() {
        let mut cond = always();
        assert!(eval(&mut cond, "").is_truthy());
    }
}
