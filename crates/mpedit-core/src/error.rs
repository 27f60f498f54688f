//! Error types for the editing core.

use thiserror::Error;

/// Failure of an edit or a buffer query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The edit (or query) reaches past the end of the buffer. Always a bug
    /// in the caller; the buffer is left untouched.
    #[error("range {position}+{deleted} is outside the buffer (length {len})")]
    OutOfRange {
        position: usize,
        deleted: usize,
        len: usize,
    },

    /// No style tag was found where the buffer should have one. The engine
    /// recovers by assuming `Normal` carry-in and only logs this.
    #[error("no style tag before offset {offset}")]
    InconsistentState { offset: usize },
}

/// Failure to apply a `:set` directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option: {0}")]
    Unknown(String),

    #[error("not a boolean option: {0}")]
    NotBoolean(String),

    #[error("not a numeric option: {0}")]
    NotNumeric(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}
