//! Stdin-based item source for piped input.

use crate::model::error::InputError;
use std::io::{BufReader, IsTerminal, Read};

/// Piped JSONL input, read to EOF before the view starts.
///
/// Generic over the reader so tests can feed bytes directly.
pub struct StdinSource<R: Read> {
    reader: BufReader<R>,
}

impl StdinSource<std::io::Stdin> {
    /// Create a source from the process stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal, so
    /// the program never blocks waiting for keystrokes nobody will type.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read every line to EOF, without trailing newlines.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` on read failure.
    pub fn read_lines(self) -> Result<Vec<Vec<u8>>, InputError> {
        super::read_byte_lines(self.reader)
    }
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lines_until_eof() {
        let data = b"line1\nline2\nline3\n";
        let lines = StdinSource::from_reader(&data[..]).read_lines().unwrap();
        assert_eq!(lines, vec![b"line1".to_vec(), b"line2".to_vec(), b"line3".to_vec()]);
    }

    #[test]
    fn keeps_final_line_without_newline() {
        let data = b"{\"text\":\"a\"}\n{\"text\":\"b\"}";
        let lines = StdinSource::from_reader(&data[..]).read_lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], br#"{"text":"b"}"#.to_vec());
    }

    #[test]
    fn empty_input_has_no_lines() {
        let data = b"";
        let lines = StdinSource::from_reader(&data[..]).read_lines().unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn invalid_utf8_is_returned_as_raw_bytes() {
        let data = [0xff, 0xfe, b'\r', b'\n', b'o', b'k'];
        let lines = StdinSource::from_reader(&data[..]).read_lines().unwrap();
        assert_eq!(lines, vec![vec![0xff, 0xfe], b"ok".to_vec()]);
    }
}
