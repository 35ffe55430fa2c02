//! Binding of named-parameter callables to the record context.
//!
//! A user callable declares the values it wants by name (`"line"`,
//! `"f2"`, `"nr"`, an extension value, ...). The binding is built once
//! at registration time; on every invocation it resolves each declared
//! name against the current context and passes the values along in
//! declaration order. This keeps "unknown parameter" an explicit,
//! typed error instead of a silent wrong default.

use crate::context::RecordContext;
use crate::error::{AwkError, Result};
use crate::value::Value;

/// A declared parameter of a bound callable.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    default: Option<Value>,
}

/// Declare a parameter with no default.
pub fn param(name: impl Into<String>) -> Param {
    Param {
        name: name.into(),
        default: None,
    }
}

impl Param {
    /// Attach a default, used when the context has no value under this
    /// parameter's name.
    pub fn or(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The declared parameter list of a user callable.
#[derive(Debug, Clone)]
pub struct Binding {
    params: Vec<Param>,
}

impl Binding {
    pub fn new(params: Vec<Param>) -> Self {
        Self { params }
    }

    /// Resolve every declared parameter against the context, in
    /// declaration order.
    ///
    /// Resolution per name: the context's value if present, else the
    /// declared default, else the absent sentinel for field-shaped
    /// names (`f` + digits) while a record is current, else
    /// [`AwkError::MissingArgument`].
    pub fn resolve(&self, ctx: &RecordContext<'_>) -> Result<Vec<Value>> {
        self.params.iter().map(|p| resolve_one(p, ctx)).collect()
    }
}

fn resolve_one(param: &Param, ctx: &RecordContext<'_>) -> Result<Value> {
    if let Some(value) = ctx.lookup(&param.name) {
        return Ok(value);
    }
    if let Some(default) = &param.default {
        return Ok(default.clone());
    }
    if is_field_name(&param.name) && ctx.record().is_some() {
        return Ok(Value::Absent);
    }
    Err(AwkError::MissingArgument(param.name.clone()))
}

// `f` followed by digits, the indexed-field naming convention.
fn is_field_name(name: &str) -> bool {
    name.strip_prefix('f')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Adapt a named-parameter function into a context callable usable as a
/// condition (`T = Value`) or an action (`T = ()`).
pub fn bind<F, T>(params: Vec<Param>, mut f: F) -> impl FnMut(&mut RecordContext<'_>) -> Result<T>
where
    F: FnMut(&[Value]) -> Result<T>,
{
    let binding = Binding::new(params);
    move |ctx: &mut RecordContext<'_>| {
        let args = binding.resolve(ctx)?;
        f(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Record;
    use std::collections::HashMap;

    fn record(line: &str, fields: &[&str]) -> Record {
        Record {
            line: line.to_string(),
            ending: "\n".to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn check<F: FnOnce(&mut RecordContext<'_>)>(record: Option<Record>, f: F) {
        let mut vars = HashMap::new();
        let mut out = Vec::new();
        let mut ctx = RecordContext::new(
            record,
            Some("data.txt"),
            1,
            Some(1),
            &mut vars,
            &mut out,
            " ",
            "\n",
        );
        f(&mut ctx);
    }

    #[test]
    fn test_resolves_context_values_in_order() {
        check(Some(record("a b", &["a", "b"])), |ctx| {
            let binding = Binding::new(vec![param("f2"), param("nr"), param("line")]);
            let args = binding.resolve(ctx).unwrap();
            assert_eq!(
                args,
                vec![
                    Value::Str("b".to_string()),
                    Value::Int(1),
                    Value::Str("a b".to_string()),
                ]
            );
        });
    }

    #[test]
    fn test_default_fills_unknown_name() {
        check(Some(record("a", &["a"])), |ctx| {
            let binding = Binding::new(vec![param("threshold").or(10i64)]);
            assert_eq!(binding.resolve(ctx).unwrap(), vec![Value::Int(10)]);
        });
    }

    #[test]
    fn test_context_value_wins_over_default() {
        check(Some(record("a", &["a"])), |ctx| {
            ctx.set_var("threshold", 3i64);
            let binding = Binding::new(vec![param("threshold").or(10i64)]);
            assert_eq!(binding.resolve(ctx).unwrap(), vec![Value::Int(3)]);
        });
    }

    #[test]
    fn test_out_of_range_field_resolves_to_absent() {
        check(Some(record("a", &["a"])), |ctx| {
            let binding = Binding::new(vec![param("f7")]);
            assert_eq!(binding.resolve(ctx).unwrap(), vec![Value::Absent]);
        });
    }

    #[test]
    fn test_field_name_without_record_is_missing() {
        check(None, |ctx| {
            let binding = Binding::new(vec![param("f7")]);
            let err = binding.resolve(ctx).unwrap_err();
            assert!(matches!(err, AwkError::MissingArgument(name) if name == "f7"));
        });
    }

    #[test]
    fn test_unknown_name_without_default_is_missing() {
        check(Some(record("a", &["a"])), |ctx| {
            let binding = Binding::new(vec![param("threshold")]);
            let err = binding.resolve(ctx).unwrap_err();
            assert!(matches!(err, AwkError::MissingArgument(name) if name == "threshold"));
        });
    }

    #[test]
    fn test_bound_callable_sees_resolved_values() {
        check(Some(record("a b", &["a", "b"])), |ctx| {
            let mut cond = bind(vec![param("f1"), param("f9").or("")], |args: &[Value]| {
                assert_eq!(args[1], Value::Str(String::new()));
                Ok(args[0].clone())
            });
            assert_eq!(cond(ctx).unwrap(), Value::Str("a".to_string()));
        });
    }

    #[test]
    fn test_field_name_shapes() {
        assert!(is_field_name("f1"));
        assert!(is_field_name("f10"));
        assert!(is_field_name("f01"));
        assert!(!is_field_name("f"));
        assert!(!is_field_name("fx"));
        assert!(!is_field_name("nf"));
    }
}
