//! Item input sources.
//!
//! - File loading for a path argument
//! - Stdin for piped input
//! - Unified InputSource enum for both

use crate::model::error::InputError;
use crate::model::Item;
use crate::parser::{parse_byte_lines, ParsedItems};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::info;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for JSONL items.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// A file given on the command line.
    File(FileSource),
    /// Piped stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Read and parse everything the source holds.
    ///
    /// Malformed lines, including lines that are not UTF-8, are logged and
    /// skipped; see [`parse_byte_lines`].
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn load(self) -> Result<ParsedItems, InputError> {
        let (origin, lines) = match self {
            InputSource::File(f) => (f.path().display().to_string(), f.read_lines()?),
            InputSource::Stdin(s) => ("<stdin>".to_string(), s.read_lines()?),
        };
        let parsed = parse_byte_lines(&lines, 1);
        info!(
            source = %origin,
            lines = lines.len(),
            items = parsed.items.len(),
            malformed = parsed.errors.len(),
            "items loaded"
        );
        Ok(parsed)
    }
}

/// Split a reader into lines without `\n` or `\r\n`, leaving decoding to
/// the parser.
fn read_byte_lines(reader: impl BufRead) -> Result<Vec<Vec<u8>>, InputError> {
    reader
        .split(b'\n')
        .map(|line| -> Result<Vec<u8>, InputError> {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Ok(line)
        })
        .collect()
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided: open it
/// 2. Else if stdin is piped: use stdin
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

/// Convenience: detect the source and load its items.
///
/// # Errors
///
/// See [`detect_input_source`] and [`InputSource::load`].
pub fn load_items(file: Option<PathBuf>) -> Result<Vec<Item>, InputError> {
    Ok(detect_input_source(file)?.load()?.items)
}
