//! The per-record execution context.
//!
//! A fresh context is built for every line processed and discarded once
//! every registered pair has seen it; job- and file-boundary hooks get a
//! context with no record attached. Extension values and the output
//! sink live for the whole run and are shared by every context.

use std::collections::HashMap;
use std::io::Write;

use crate::error::Result;
use crate::value::Value;

/// One logical input line after terminator handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Line text with the terminator removed.
    pub line: String,
    /// The exact terminator bytes stripped from the line; empty when
    /// the line had none.
    pub ending: String,
    /// Fields produced by the active splitter, recomputed per line.
    pub fields: Vec<String>,
}

/// State visible to hooks, conditions, and actions.
pub struct RecordContext<'run> {
    record: Option<Record>,
    filename: Option<&'run str>,
    nr: u64,
    nfr: Option<u64>,
    result: Option<Value>,
    vars: &'run mut HashMap<String, Value>,
    out: &'run mut (dyn Write + 'run),
    ofs: &'run str,
    ors: &'run str,
}

impl<'run> RecordContext<'run> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        record: Option<Record>,
        filename: Option<&'run str>,
        nr: u64,
        nfr: Option<u64>,
        vars: &'run mut HashMap<String, Value>,
        out: &'run mut (dyn Write + 'run),
        ofs: &'run str,
        ors: &'run str,
    ) -> Self {
        Self {
            record,
            filename,
            nr,
            nfr,
            result: None,
            vars,
            out,
            ofs,
            ors,
        }
    }

    /// The current record, absent inside job/file hooks.
    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// The current line text; empty when no record is being processed.
    pub fn line(&self) -> &str {
        self.record.as_ref().map_or("", |r| r.line.as_str())
    }

    /// The terminator stripped from the current line.
    pub fn line_ending(&self) -> &str {
        self.record.as_ref().map_or("", |r| r.ending.as_str())
    }

    /// The parsed fields of the current record.
    pub fn fields(&self) -> &[String] {
        self.record.as_ref().map_or(&[], |r| r.fields.as_slice())
    }

    /// The field count of the current record.
    pub fn nf(&self) -> usize {
        self.fields().len()
    }

    /// The `i`-th field, 1-based. `None` when the index is out of range
    /// for the current record; never an error.
    pub fn field(&self, i: usize) -> Option<&str> {
        let idx = i.checked_sub(1)?;
        self.fields().get(idx).map(String::as_str)
    }

    /// Records read so far in the job; monotonic across files.
    pub fn nr(&self) -> u64 {
        self.nr
    }

    /// Records read so far in the current file; resets per file.
    pub fn nfr(&self) -> u64 {
        self.nfr.unwrap_or(0)
    }

    /// Name of the file being processed, absent in job-level hooks.
    pub fn filename(&self) -> Option<&str> {
        self.filename
    }

    /// The truthy value returned by the condition that triggered the
    /// running action; populated only for the duration of that action.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub(crate) fn set_result(&mut self, result: Value) {
        self.result = Some(result);
    }

    pub(crate) fn clear_result(&mut self) {
        self.result = None;
    }

    /// Read a job-scoped extension value.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Write a job-scoped extension value, visible to every hook,
    /// condition, and action for the rest of the run.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Look up a value by name: built-in record values first, then
    /// indexed fields, then extension values. `None` means the name is
    /// not available in the current scope.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        match name {
            "line" | "f0" => self.record.as_ref().map(|r| Value::Str(r.line.clone())),
            "line_ending" => self.record.as_ref().map(|r| Value::Str(r.ending.clone())),
            "fields" => self.record.as_ref().map(|r| Value::List(r.fields.clone())),
            "nf" => self.record.as_ref().map(|r| Value::Int(r.fields.len() as i64)),
            "nr" => Some(Value::Int(self.nr as i64)),
            "nfr" => self.nfr.map(|n| Value::Int(n as i64)),
            "filename" => self.filename.map(|f| Value::Str(f.to_string())),
            "result" => self.result.clone(),
            _ => {
                if let Some(i) = canonical_field_index(name) {
                    return self.field(i).map(|f| Value::Str(f.to_string()));
                }
                self.vars.get(name).cloned()
            }
        }
    }

    /// Write raw text to the sink.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write text followed by the configured output terminator.
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(self.ors.as_bytes())?;
        Ok(())
    }

    /// Write the given strings joined with the configured output field
    /// separator, then the output terminator.
    pub fn print_fields<'s, I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let joined = fields.into_iter().collect::<Vec<_>>().join(self.ofs);
        self.print(&joined)
    }

    /// Write the current record's fields joined with the output field
    /// separator, then the output terminator.
    pub fn print_record(&mut self) -> Result<()> {
        let joined = self.fields().join(self.ofs);
        self.print(&joined)
    }

    /// Re-emit the current record byte-for-byte: line text plus the
    /// terminator that was stripped from it.
    pub fn echo(&mut self) -> Result<()> {
        if let Some(record) = &self.record {
            self.out.write_all(record.line.as_bytes())?;
            self.out.write_all(record.ending.as_bytes())?;
        }
        Ok(())
    }
}

/// The canonical `f1`, `f2`, ... field names. Leading zeros are not
/// canonical, so `f01` is never a present value.
fn canonical_field_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix('f')?;
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}
