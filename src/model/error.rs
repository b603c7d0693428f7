//! Error types for the waterfall application.
//!
//! The layout engine itself is total and never fails. Everything in this
//! module belongs to the outer crate: reading item input and driving the
//! terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`InputError`] - File/stdin reading failures
//!   - [`ParseError`] - A single malformed JSONL line
//!   - `std::io::Error` - Terminal failures
//!
//! # Error Recovery Strategy
//!
//! Parse errors are **non-fatal**: the offending line is logged with
//! `tracing::warn!` and skipped, so the view still shows every valid item.
//! Input and terminal errors are fatal and propagate to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Domain errors convert into `AppError` via `From`, so `?` works across
/// layers.
///
/// # Examples
///
/// ```no_run
/// use waterfall::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     let _items = read_items()?;
///     Ok(())
/// }
/// # fn read_items() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin. Fatal.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to parse an item line.
    ///
    /// Only surfaces here when a caller chose to treat parse failures as
    /// fatal; the default ingestion path logs and skips them.
    #[error("Failed to parse item: {0}")]
    Parse(#[from] ParseError),

    /// Terminal I/O error. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading item input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use waterfall::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No file argument and stdin is a terminal.
    #[error("No input: provide a file path or pipe items to stdin")]
    NoInput,

    /// Generic I/O failure while reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single JSONL line that could not become an item.
///
/// Line numbers are 1-based, matching what an editor shows.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Not valid JSON, or valid JSON of the wrong shape.
    #[error("Invalid JSON on line {line}: {message}")]
    InvalidJson {
        /// Line number of the bad input.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// The `height` hint is negative or not finite.
    #[error("Invalid height on line {line}: {value}")]
    InvalidHeight {
        /// Line number of the bad input.
        line: usize,
        /// The rejected value.
        value: f64,
    },

    /// The line is not valid UTF-8.
    #[error("Invalid UTF-8 on line {line}")]
    InvalidUtf8 {
        /// Line number of the bad input.
        line: usize,
    },
}

impl ParseError {
    /// Line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidJson { line, .. }
            | ParseError::InvalidHeight { line, .. }
            | ParseError::InvalidUtf8 { line } => *line,
        }
    }
}
