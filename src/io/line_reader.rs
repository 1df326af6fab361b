//! Logical line reader with iterator interface
//!
//! Provides a streaming iterator over the logical lines of a delimited text
//! source, each tagged with the 1-based physical line number it starts on.
//!
//! # Design
//!
//! A logical line is usually one physical line. When a quoted field spans a
//! line break, physical lines are joined (keeping the break) until the quote
//! closes. If the input ends with the quote still open, only the starting
//! physical line is yielded, and the lines read ahead are yielded again one
//! by one. The unterminated line is then rejected by the row codec while the
//! rows after it are still read.
//!
//! ```no_run
//! use group_tally::io::line_reader::LineReader;
//! use group_tally::types::Dialect;
//! use std::path::Path;
//!
//! let reader = LineReader::open(Path::new("users.csv"), Dialect::default()).unwrap();
//! for line in reader {
//!     let line = line.unwrap();
//!     println!("{}: {}", line.number, line.text);
//! }
//! ```
//!
//! # Error Handling
//!
//! - A missing input file is reported by `open()` as `FileNotFound`
//! - Read failures are yielded as `Err` items
//! - Invalid UTF-8 is replaced rather than rejected

use crate::io::row_codec::QuoteScanner;
use crate::types::{Dialect, TallyError};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// One logical line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based physical line number the logical line starts on
    pub number: u64,
    /// Line text without its final line terminator
    pub text: String,
}

/// Streaming reader of logical lines
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    dialect: Dialect,
    line_num: u64,
    next_number: u64,
    pending: VecDeque<Vec<u8>>,
}

impl LineReader<BufReader<File>> {
    /// Open a file for line-by-line reading
    ///
    /// # Errors
    ///
    /// * `TallyError::FileNotFound` if the file does not exist
    /// * `TallyError::Io` for any other open failure
    pub fn open(path: &Path, dialect: Dialect) -> Result<Self, TallyError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TallyError::file_not_found(&path.display().to_string()),
            _ => TallyError::Io {
                message: format!("Could not open {} for reading: {}", path.display(), e),
            },
        })?;

        Ok(Self::new(BufReader::with_capacity(8 * 1024, file), dialect))
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wrap any buffered reader
    pub fn new(reader: R, dialect: Dialect) -> Self {
        Self {
            reader,
            dialect,
            line_num: 0,
            next_number: 1,
            pending: VecDeque::new(),
        }
    }

    /// Number of physical lines read from the source so far
    ///
    /// Lines read ahead while looking for a closing quote are included.
    pub fn lines_read(&self) -> u64 {
        self.line_num
    }

    /// Next physical line, terminator included; read-ahead lines come first
    fn next_physical(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(Some(line));
        }

        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        self.line_num += 1;
        Ok(Some(line))
    }
}

fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Line, TallyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = match self.next_physical() {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some(Err(e.into())),
        };
        let number = self.next_number;

        let mut scanner = QuoteScanner::new(self.dialect);
        scanner.feed(&buf);

        let mut continuation = Vec::new();
        while scanner.is_open() {
            match self.next_physical() {
                Ok(Some(line)) => {
                    scanner.feed(&line);
                    continuation.push(line);
                }
                Ok(None) => break,
                Err(e) => return Some(Err(e.into())),
            }
        }

        if scanner.is_open() {
            // Never closed: hand the read-ahead lines back in order
            for line in continuation.into_iter().rev() {
                self.pending.push_front(line);
            }
            self.next_number = number + 1;
        } else {
            self.next_number = number + 1 + continuation.len() as u64;
            for line in &continuation {
                buf.extend_from_slice(line);
            }
        }

        strip_terminator(&mut buf);
        Some(Ok(Line {
            number,
            text: String::from_utf8_lossy(&buf).into_owned(),
        }))
    }
}
