//! The dispatch engine: job, file, and record lifecycle.
//!
//! A run walks three nested granularities, strictly sequential and
//! single-pass:
//!
//! ```text
//! JOB:    beginjob hooks -> for each file: FILE -> endjob hooks
//! FILE:   begin hooks -> for each line: RECORD -> end hooks
//! RECORD: parse fields -> for each registered (condition, action)
//!         pair, in registration order: evaluate the condition and,
//!         on a truthy result, run the action with that result
//!         available as `result`
//! ```
//!
//! Each line is read, parsed, and fully dispatched before the next line
//! is read. The first unrecovered error aborts the run; output already
//! written stays on the sink.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::context::{Record, RecordContext};
use crate::error::Result;
use crate::range::RangeMatcher;
use crate::reader::{LineReader, Newline};
use crate::splitter::FieldSplitter;
use crate::value::Value;

/// A condition evaluated once per record; any result other than `false`
/// or the absent sentinel fires the paired action.
pub type Condition = Box<dyn FnMut(&mut RecordContext<'_>) -> Result<Value>>;

/// An action fired when its condition matches, or a job/file hook.
pub type Action = Box<dyn FnMut(&mut RecordContext<'_>) -> Result<()>>;

/// Open mode for path outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Create or truncate the output file. The default.
    #[default]
    Truncate,
    /// Create the output file if needed and append to it.
    Append,
}

/// An awk-style line processing engine.
///
/// Configure it, register hooks and (condition, action) pairs, then run
/// it over one or more inputs. Registration order is significant: every
/// record is offered to every pair in the order the pairs were declared.
pub struct Awk {
    splitter: FieldSplitter,
    newline: Newline,
    ofs: String,
    ors: String,
    beginjob_hooks: Vec<Action>,
    endjob_hooks: Vec<Action>,
    begin_hooks: Vec<Action>,
    end_hooks: Vec<Action>,
    calls: Vec<(Condition, Action)>,
    vars: HashMap<String, Value>,
}

impl Default for Awk {
    fn default() -> Self {
        Self::new()
    }
}

impl Awk {
    /// An engine with the default configuration: whitespace-collapsing
    /// field splitter, stripped line terminators, `" "` output field
    /// separator, `"\n"` output terminator.
    pub fn new() -> Self {
        Self {
            splitter: FieldSplitter::whitespace(),
            newline: Newline::Strip,
            ofs: " ".to_string(),
            ors: "\n".to_string(),
            beginjob_hooks: Vec::new(),
            endjob_hooks: Vec::new(),
            begin_hooks: Vec::new(),
            end_hooks: Vec::new(),
            calls: Vec::new(),
            vars: HashMap::new(),
        }
    }

    /// Use the given field splitting strategy.
    pub fn field_separator(mut self, splitter: FieldSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Control how line terminators are treated on read.
    pub fn newline(mut self, mode: Newline) -> Self {
        self.newline = mode;
        self
    }

    /// Separator used by the field-joining print helpers.
    pub fn output_separator(mut self, ofs: impl Into<String>) -> Self {
        self.ofs = ofs.into();
        self
    }

    /// Terminator appended by the print helpers.
    pub fn output_terminator(mut self, ors: impl Into<String>) -> Self {
        self.ors = ors.into();
        self
    }

    /// Seed a job-scoped extension value at construction time.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_var(name, value);
        self
    }

    /// Attach a job-scoped extension value, visible by name to every
    /// hook, condition, and action.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Read back an extension value, e.g. a total accumulated by
    /// actions during a run.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    // -----------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------

    /// Register a hook run once before any file is processed.
    pub fn begin_job<H>(&mut self, hook: H)
    where
        H: FnMut(&mut RecordContext<'_>) -> Result<()> + 'static,
    {
        self.beginjob_hooks.push(Box::new(hook));
    }

    /// Register a hook run once after every file has been processed.
    pub fn end_job<H>(&mut self, hook: H)
    where
        H: FnMut(&mut RecordContext<'_>) -> Result<()> + 'static,
    {
        self.endjob_hooks.push(Box::new(hook));
    }

    /// Register a hook run before each file, after its record counter
    /// has been reset to zero.
    pub fn begin_file<H>(&mut self, hook: H)
    where
        H: FnMut(&mut RecordContext<'_>) -> Result<()> + 'static,
    {
        self.begin_hooks.push(Box::new(hook));
    }

    /// Register a hook run after each file.
    pub fn end_file<H>(&mut self, hook: H)
    where
        H: FnMut(&mut RecordContext<'_>) -> Result<()> + 'static,
    {
        self.end_hooks.push(Box::new(hook));
    }

    /// Register a (condition, action) pair, evaluated for every record
    /// in registration order.
    pub fn when<C, A>(&mut self, condition: C, action: A)
    where
        C: FnMut(&mut RecordContext<'_>) -> Result<Value> + 'static,
        A: FnMut(&mut RecordContext<'_>) -> Result<()> + 'static,
    {
        self.calls.push((Box::new(condition), Box::new(action)));
    }

    /// Register an action for every record between a record matching
    /// `on` and the next record matching `off`, both inclusive.
    ///
    /// The range state lives with the registration: it persists across
    /// files within a run and is only reset by registering anew.
    pub fn between<On, Off, A>(&mut self, on: On, off: Off, action: A)
    where
        On: FnMut(&mut RecordContext<'_>) -> Result<Value> + 'static,
        Off: FnMut(&mut RecordContext<'_>) -> Result<Value> + 'static,
        A: FnMut(&mut RecordContext<'_>) -> Result<()> + 'static,
    {
        let mut matcher = RangeMatcher::new(on, off);
        self.calls.push((
            Box::new(move |ctx: &mut RecordContext<'_>| matcher.eval(ctx)),
            Box::new(action),
        ));
    }

    // -----------------------------------------------------------------
    // Execution
    // -----------------------------------------------------------------

    /// Process files, writing to standard output.
    pub fn run<P: AsRef<Path>>(&mut self, filenames: &[P]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(filenames, &mut out)
    }

    /// Process files into an output file opened with the given mode.
    pub fn run_to_path<P, Q>(&mut self, filenames: &[P], output: Q, mode: WriteMode) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let file = match mode {
            WriteMode::Truncate => File::create(output.as_ref())?,
            WriteMode::Append => OpenOptions::new()
                .create(true)
                .append(true)
                .open(output.as_ref())?,
        };
        let mut out = BufWriter::new(file);
        self.run_to(filenames, &mut out)
    }

    /// Process files into any sink. The sink is flushed once the job
    /// completes; on an aborted run the output written so far remains.
    pub fn run_to<P: AsRef<Path>, W: Write>(&mut self, filenames: &[P], out: &mut W) -> Result<()> {
        let mut nr: u64 = 0;
        self.run_hooks(Phase::BeginJob, None, nr, None, out)?;
        for filename in filenames {
            let path = filename.as_ref();
            let name = path.display().to_string();
            // An unopenable file aborts before its begin hooks run.
            let file = File::open(path)?;
            self.process_source(&name, BufReader::new(file), out, &mut nr)?;
        }
        self.run_hooks(Phase::EndJob, None, nr, None, out)?;
        out.flush()?;
        Ok(())
    }

    /// Run a complete job over one named line source. This is the same
    /// lifecycle as [`Awk::run_to`] with a single one-file job.
    pub fn run_reader<R: BufRead, W: Write>(
        &mut self,
        name: &str,
        reader: R,
        out: &mut W,
    ) -> Result<()> {
        let mut nr: u64 = 0;
        self.run_hooks(Phase::BeginJob, None, nr, None, out)?;
        self.process_source(name, reader, out, &mut nr)?;
        self.run_hooks(Phase::EndJob, None, nr, None, out)?;
        out.flush()?;
        Ok(())
    }

    fn process_source<R: BufRead, W: Write>(
        &mut self,
        name: &str,
        reader: R,
        out: &mut W,
        nr: &mut u64,
    ) -> Result<()> {
        let mut lines = LineReader::new(reader, self.newline.clone());
        let mut nfr: u64 = 0;
        self.run_hooks(Phase::BeginFile, Some(name), *nr, Some(nfr), out)?;
        while let Some(raw) = lines.next_line()? {
            nfr += 1;
            *nr += 1;
            let fields = self.splitter.split(&raw.text)?;
            let record = Record {
                line: raw.text,
                ending: raw.ending,
                fields,
            };
            let mut ctx = RecordContext::new(
                Some(record),
                Some(name),
                *nr,
                Some(nfr),
                &mut self.vars,
                &mut *out,
                &self.ofs,
                &self.ors,
            );
            for (condition, action) in self.calls.iter_mut() {
                let result = condition(&mut ctx)?;
                if result.is_truthy() {
                    ctx.set_result(result);
                    action(&mut ctx)?;
                    ctx.clear_result();
                }
            }
        }
        self.run_hooks(Phase::EndFile, Some(name), *nr, Some(nfr), out)?;
        Ok(())
    }

    fn run_hooks<W: Write>(
        &mut self,
        phase: Phase,
        filename: Option<&str>,
        nr: u64,
        nfr: Option<u64>,
        out: &mut W,
    ) -> Result<()> {
        let mut ctx = RecordContext::new(
            None,
            filename,
            nr,
            nfr,
            &mut self.vars,
            &mut *out,
            &self.ofs,
            &self.ors,
        );
        let hooks = match phase {
            Phase::BeginJob => &mut self.beginjob_hooks,
            Phase::EndJob => &mut self.endjob_hooks,
            Phase::BeginFile => &mut self.begin_hooks,
            Phase::EndFile => &mut self.end_hooks,
        };
        for hook in hooks.iter_mut() {
            hook(&mut ctx)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Phase {
    BeginJob,
    EndJob,
    BeginFile,
    EndFile,
}
