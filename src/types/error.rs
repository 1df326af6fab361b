//! Error types for group-tally
//!
//! This module defines every failure the tally pipeline can report.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Schema Errors**: the column declaration is empty, unparsable or too short
//! - **Row Errors**: a data line fails to decode or has too few fields
//! - **Lookup Errors**: the group-by column does not exist in the schema
//! - **File I/O Errors**: missing input, bad output path, read/write failures
//! - **Render Errors**: the result could not be encoded

use thiserror::Error;

/// Reasons a single line cannot be decoded by the row codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line ended while a quoted field was still open
    #[error("unterminated quoted field")]
    UnterminatedQuote,

    /// The line holds more than one record (an unquoted line break)
    #[error("line contains more than one record")]
    MultipleRecords,

    /// The underlying CSV reader rejected the input
    #[error("{message}")]
    Malformed {
        /// Description reported by the CSV reader
        message: String,
    },
}

/// Main error type for group-tally
///
/// Engine variants (`Schema`, `BadRow`, `UnknownColumn`) are fatal to the
/// run they occur in. `BadRow` is only produced when bad rows are not being
/// tolerated; otherwise the line number is recorded by the engine instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TallyError {
    /// Column declaration has fewer than 2 names or could not be parsed
    #[error("Bad column identifier '{columns}': {message}")]
    Schema {
        /// The raw column declaration
        columns: String,
        /// Why it was rejected
        message: String,
    },

    /// A data line failed to decode or had fewer fields than the schema
    #[error("Bad row on line {line}: {reason}")]
    BadRow {
        /// 1-based line number of the offending row
        line: u64,
        /// Description of the problem
        reason: String,
    },

    /// The requested group-by column is not part of the schema
    #[error("Column '{column}' not found")]
    UnknownColumn {
        /// The column name that was requested
        column: String,
    },

    /// Input file not found at the specified path
    #[error("Input file {path} does not exist")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// The output path cannot be written to
    #[error("Invalid output path {path}: {reason}")]
    OutputPath {
        /// The offending path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Invalid command-line configuration
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// The tally result could not be encoded
    #[error("Render error: {message}")]
    Render {
        /// Description of the encoding failure
        message: String,
    },

    /// The user declined to overwrite an existing output file
    #[error("Aborted")]
    Aborted,
}

impl From<std::io::Error> for TallyError {
    fn from(error: std::io::Error) -> Self {
        TallyError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for TallyError {
    fn from(error: csv::Error) -> Self {
        TallyError::Render {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(error: serde_json::Error) -> Self {
        TallyError::Render {
            message: error.to_string(),
        }
    }
}

impl TallyError {
    /// Create a Schema error
    pub fn schema(columns: &str, message: &str) -> Self {
        TallyError::Schema {
            columns: columns.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a BadRow error
    pub fn bad_row(line: u64, reason: impl Into<String>) -> Self {
        TallyError::BadRow {
            line,
            reason: reason.into(),
        }
    }

    /// Create an UnknownColumn error
    pub fn unknown_column(column: &str) -> Self {
        TallyError::UnknownColumn {
            column: column.to_string(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        TallyError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an OutputPath error
    pub fn output_path(path: &str, reason: &str) -> Self {
        TallyError::OutputPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        TallyError::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::schema(
        TallyError::Schema { columns: "only".to_string(), message: "at least 2 columns are required".to_string() },
        "Bad column identifier 'only': at least 2 columns are required"
    )]
    #[case::bad_row(
        TallyError::BadRow { line: 42, reason: "unterminated quoted field".to_string() },
        "Bad row on line 42: unterminated quoted field"
    )]
    #[case::unknown_column(
        TallyError::UnknownColumn { column: "nonexistent".to_string() },
        "Column 'nonexistent' not found"
    )]
    #[case::file_not_found(
        TallyError::FileNotFound { path: "test.csv".to_string() },
        "Input file test.csv does not exist"
    )]
    #[case::output_path(
        TallyError::OutputPath { path: "out/".to_string(), reason: "output file cannot be a directory".to_string() },
        "Invalid output path out/: output file cannot be a directory"
    )]
    #[case::config(
        TallyError::Config { message: "delimiter must be ASCII".to_string() },
        "Invalid configuration: delimiter must be ASCII"
    )]
    #[case::io_error(
        TallyError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::aborted(TallyError::Aborted, "Aborted")]
    fn test_error_display(#[case] error: TallyError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::schema(
        TallyError::schema("a", "too few"),
        TallyError::Schema { columns: "a".to_string(), message: "too few".to_string() }
    )]
    #[case::bad_row(
        TallyError::bad_row(7, "expected at least 2 fields, found 1"),
        TallyError::BadRow { line: 7, reason: "expected at least 2 fields, found 1".to_string() }
    )]
    #[case::unknown_column(
        TallyError::unknown_column("age"),
        TallyError::UnknownColumn { column: "age".to_string() }
    )]
    #[case::file_not_found(
        TallyError::file_not_found("missing.csv"),
        TallyError::FileNotFound { path: "missing.csv".to_string() }
    )]
    fn test_helper_functions(#[case] result: TallyError, #[case] expected: TallyError) {
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case::unterminated(DecodeError::UnterminatedQuote, "unterminated quoted field")]
    #[case::multiple(DecodeError::MultipleRecords, "line contains more than one record")]
    fn test_decode_error_display(#[case] error: DecodeError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: TallyError = io_error.into();
        assert!(matches!(error, TallyError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
