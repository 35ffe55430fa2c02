//! Inclusive range matching across records.
//!
//! A range matcher turns an on/off condition pair into a single
//! condition. The record that opens a range and the record that closes
//! it are both included, and the closing condition is never consulted
//! on the record that opened the range: a would-be single-record match
//! stays open until a later record satisfies the off condition.

use crate::context::RecordContext;
use crate::error::Result;
use crate::value::Value;

/// Stateful on/off condition pair.
///
/// The inside/outside flag is mutated once per evaluated record and is
/// never reset automatically; it persists across files within a run,
/// and across runs unless the matcher is rebuilt.
pub struct RangeMatcher<On, Off> {
    on: On,
    off: Off,
    inside: bool,
}

impl<On, Off> RangeMatcher<On, Off>
where
    On: FnMut(&mut RecordContext<'_>) -> Result<Value>,
    Off: FnMut(&mut RecordContext<'_>) -> Result<Value>,
{
    pub fn new(on: On, off: Off) -> Self {
        Self {
            on,
            off,
            inside: false,
        }
    }

    /// Evaluate one record.
    ///
    /// Outside a range, the on condition decides: a truthy result opens
    /// the range and is returned as the match value. Inside, the off
    /// condition decides: a truthy result closes the range and is
    /// returned (the closing record is included); otherwise the record
    /// is interior and matches with a plain `true`.
    pub fn eval(&mut self, ctx: &mut RecordContext<'_>) -> Result<Value> {
        if !self.inside {
            let opened = (self.on)(ctx)?;
            if opened.is_truthy() {
                self.inside = true;
            }
            Ok(opened)
        } else {
            let closed = (self.off)(ctx)?;
            if closed.is_truthy() {
                self.inside = false;
                Ok(closed)
            } else {
                Ok(Value::Bool(true))
            }
        }
    }
}
