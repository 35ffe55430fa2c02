//! # linewise
//!
//! An awk-style line-by-line text processing library.
//!
//! Register conditions and actions against an [`Awk`] engine, then run
//! it over one or more inputs. Every line becomes a record with parsed
//! fields and counters; each registered (condition, action) pair is
//! evaluated in registration order, and any condition result other than
//! `false` or the absent sentinel fires the paired action.
//!
//! ## Overview
//!
//! A run walks three nested granularities:
//! - **Job**: one invocation over all supplied inputs, bracketed by
//!   begin/end job hooks.
//! - **File**: each input, bracketed by begin/end file hooks, with its
//!   own record counter.
//! - **Record**: one line, split into fields by the configured
//!   [`FieldSplitter`] and dispatched through every registered pair.
//!
//! ## Example
//!
//! ```
//! use linewise::{Awk, cond};
//!
//! let mut awk = Awk::new();
//! awk.when(cond::find("SALES"), |ctx| {
//!     let name = ctx.field(1).unwrap_or("").to_string();
//!     ctx.print(&name)
//! });
//!
//! let staff = "SMITH JOHN SALES\nJONES MARY ENGINEER\nDOE JANE SALES\n";
//! let mut out = Vec::new();
//! awk.run_reader("staff", staff.as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "SMITH\nDOE\n");
//! ```

pub mod adapter;
pub mod cond;
pub mod context;
pub mod csv;
pub mod engine;
pub mod error;
pub mod range;
pub mod reader;
pub mod splitter;
pub mod value;

pub use adapter::{Binding, Param, bind, param};
pub use context::{Record, RecordContext};
pub use engine::{Action, Awk, Condition, WriteMode};
pub use error::{AwkError, Result};
pub use range::RangeMatcher;
pub use reader::{LineReader, Newline, RawLine};
pub use splitter::FieldSplitter;
pub use value::Value;
