//! Column schema and text dialect types
//!
//! This module defines the Schema that every ingested row is validated
//! against, and the Dialect describing how delimited text is split.

use super::error::TallyError;
use crate::io::row_codec;
use tracing::debug;

/// A decoded data row
///
/// Rows keep every decoded field, including trailing fields beyond the
/// schema width. Lookups go through `StringRecord::get`, which yields `None`
/// for out-of-range indexes.
pub type Row = csv::StringRecord;

/// Minimum number of columns a schema must declare
///
/// A tally needs a key column plus at least one other column.
pub const MIN_COLUMNS: usize = 2;

/// Delimited-text dialect
///
/// Both characters are single ASCII bytes and must differ from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field separator
    pub delimiter: u8,
    /// Text quote character
    pub quote: u8,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl Dialect {
    /// Create a dialect from user-supplied characters
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Config` if either character is not ASCII, is a
    /// line break, or if both characters are the same.
    pub fn new(delimiter: char, quote: char) -> Result<Self, TallyError> {
        let delimiter = ascii_byte("delimiter", delimiter)?;
        let quote = ascii_byte("quote", quote)?;

        if delimiter == quote {
            return Err(TallyError::config(
                "delimiter and quote character must differ",
            ));
        }

        Ok(Self { delimiter, quote })
    }
}

fn ascii_byte(name: &str, c: char) -> Result<u8, TallyError> {
    if !c.is_ascii() || c == '\n' || c == '\r' {
        return Err(TallyError::config(format!(
            "{} must be a single ASCII character other than a line break, got {:?}",
            name, c
        )));
    }
    Ok(c as u8)
}

/// Ordered column names every row is validated against
///
/// Duplicate names are allowed; lookups resolve the first match.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Create a schema from already-split column names
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Schema` if fewer than [`MIN_COLUMNS`] names are given.
    pub fn new<I, S>(columns: I) -> Result<Self, TallyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if columns.len() < MIN_COLUMNS {
            return Err(TallyError::schema(
                &columns.join(","),
                &format!(
                    "at least {} columns are required, found {}",
                    MIN_COLUMNS,
                    columns.len()
                ),
            ));
        }

        debug!(columns = ?columns, "schema created");
        Ok(Self { columns })
    }

    /// Parse a header line or column list into a schema
    ///
    /// Surrounding whitespace other than the delimiter is trimmed, then the
    /// text is decoded with the row codec, so quoted column names may contain
    /// the delimiter.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Schema` if the text is blank, cannot be decoded,
    /// or names fewer than [`MIN_COLUMNS`] columns.
    pub fn parse(text: &str, dialect: &Dialect) -> Result<Self, TallyError> {
        let record = match row_codec::decode(row_codec::trim_line(text, dialect), dialect) {
            Ok(Some(record)) => record,
            Ok(None) => return Err(TallyError::schema(text, "no column names given")),
            Err(e) => return Err(TallyError::schema(text, &e.to_string())),
        };

        Self::new(record.iter())
    }

    /// Number of declared columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; a schema holds at least [`MIN_COLUMNS`] names
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Zero-based index of the first column with exactly this name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Column names in declaration order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}
