//! Row codec for delimited text
//!
//! This module centralizes the delimited-text format concerns, providing:
//! - `decode`: one line of text into a [`Row`]
//! - `encode`: a sequence of fields back into one line of text
//! - `QuoteScanner` / `has_open_quote`: whether text ends inside a quoted field
//! - `trim_line`: surrounding whitespace removal that keeps the delimiter
//!
//! Field splitting and quote handling are delegated to the `csv` crate.
//! A quote character opens a quoted field only at the start of a field;
//! elsewhere it is literal. Inside a quoted field a doubled quote is a
//! literal quote. All functions are pure (no I/O) for easy testing.

use crate::types::{DecodeError, Dialect, Row, TallyError};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Incremental tracker of quoting state across chunks of text
///
/// Mirrors the quoting rules of the CSV reader: line breaks outside quotes
/// start a new record, a quote closes the field unless it is doubled.
#[derive(Debug, Clone)]
pub struct QuoteScanner {
    dialect: Dialect,
    state: ScanState,
}

impl QuoteScanner {
    /// Create a scanner positioned at the start of a record
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            state: ScanState::FieldStart,
        }
    }

    /// Advance the scanner over `bytes`
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = self.next_state(byte);
        }
    }

    /// True while the text fed so far ends inside a quoted field
    pub fn is_open(&self) -> bool {
        self.state == ScanState::Quoted
    }

    fn next_state(&self, byte: u8) -> ScanState {
        let quote = self.dialect.quote;
        let is_boundary = byte == self.dialect.delimiter || byte == b'\n' || byte == b'\r';

        match self.state {
            ScanState::FieldStart if byte == quote => ScanState::Quoted,
            ScanState::FieldStart | ScanState::Unquoted if is_boundary => ScanState::FieldStart,
            ScanState::FieldStart | ScanState::Unquoted => ScanState::Unquoted,
            ScanState::Quoted if byte == quote => ScanState::QuoteInQuoted,
            ScanState::Quoted => ScanState::Quoted,
            ScanState::QuoteInQuoted if byte == quote => ScanState::Quoted,
            ScanState::QuoteInQuoted if is_boundary => ScanState::FieldStart,
            ScanState::QuoteInQuoted => ScanState::Unquoted,
        }
    }
}

/// Report whether `text` ends inside an open quoted field
pub fn has_open_quote(text: &str, dialect: &Dialect) -> bool {
    let mut scanner = QuoteScanner::new(*dialect);
    scanner.feed(text.as_bytes());
    scanner.is_open()
}

/// Trim surrounding whitespace from a line, except the delimiter itself
///
/// With a whitespace delimiter such as tab, leading and trailing delimiters
/// mark empty fields and must survive.
pub fn trim_line<'a>(line: &'a str, dialect: &Dialect) -> &'a str {
    let delimiter = char::from(dialect.delimiter);
    line.trim_matches(|c: char| c.is_whitespace() && c != delimiter)
}

/// Decode one line of delimited text into a row
///
/// # Returns
///
/// * `Ok(Some(Row))` - the decoded fields
/// * `Ok(None)` - the line is empty or whitespace only (delimiters excluded)
/// * `Err(DecodeError)` - the line is malformed
///
/// # Errors
///
/// - `UnterminatedQuote` if a quoted field is never closed
/// - `MultipleRecords` if the line holds an unquoted line break between records
pub fn decode(line: &str, dialect: &Dialect) -> Result<Option<Row>, DecodeError> {
    if trim_line(line, dialect).is_empty() {
        return Ok(None);
    }

    if has_open_quote(line, dialect) {
        return Err(DecodeError::UnterminatedQuote);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .from_reader(line.as_bytes());

    let mut row = Row::new();
    if !reader.read_record(&mut row).map_err(malformed)? {
        return Ok(None);
    }

    let mut trailing = Row::new();
    if reader.read_record(&mut trailing).map_err(malformed)? {
        return Err(DecodeError::MultipleRecords);
    }

    Ok(Some(row))
}

fn malformed(error: csv::Error) -> DecodeError {
    DecodeError::Malformed {
        message: error.to_string(),
    }
}

/// Encode fields into one line of delimited text, without a line terminator
///
/// Fields containing the delimiter, the quote character or a line break are
/// wrapped in quotes with inner quotes doubled; all other fields are written
/// as-is. `decode(encode(fields))` yields the original fields.
///
/// # Errors
///
/// Returns `TallyError::Render` if the CSV writer fails.
pub fn encode<I, T>(fields: I, dialect: &Dialect) -> Result<String, TallyError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(fields)?;

    let mut bytes = writer.into_inner().map_err(|e| TallyError::Render {
        message: format!("Failed to flush encoded row: {}", e),
    })?;
    bytes.pop();

    String::from_utf8(bytes).map_err(|e| TallyError::Render {
        message: format!("Encoded row is not valid UTF-8: {}", e),
    })
}
