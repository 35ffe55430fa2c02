//! Error types for engine runs.
//!
//! A run is single-attempt and fail-fast: the first unrecovered error
//! aborts the job and propagates to the caller. Output already written
//! to the sink is retained.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AwkError>;

/// Everything that can abort a run.
#[derive(Debug, Error)]
pub enum AwkError {
    /// A registered condition or action declared a parameter the record
    /// context cannot supply. This is a configuration error on the
    /// caller's side and is never silently defaulted.
    #[error("parameter `{0}` does not have a value")]
    MissingArgument(String),

    /// A strict field splitter rejected the current line.
    #[error("line {line:?} does not decompose into fields")]
    Format { line: String },

    /// File open/read or sink write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An error raised inside a user-supplied condition, action, or hook.
    /// Propagated unchanged to the top-level caller.
    #[error("{0}")]
    User(Box<dyn std::error::Error + Send + Sync>),
}

impl AwkError {
    /// Wrap an arbitrary user-side error.
    ///
    /// Accepts anything convertible into a boxed error, including plain
    /// message strings:
    ///
    /// ```
    /// use linewise::AwkError;
    ///
    /// let err = AwkError::user("negative total");
    /// assert_eq!(err.to_string(), "negative total");
    /// ```
    pub fn user<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        AwkError::User(err.into())
    }
}
