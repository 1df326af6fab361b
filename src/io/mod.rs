//! I/O module
//!
//! Handles delimited-text decoding, encoding and line reading.
//!
//! # Components
//!
//! - `row_codec` - Delimited-text row decoding and encoding
//! - `line_reader` - Logical line reader with iterator interface

pub mod line_reader;
pub mod row_codec;

pub use line_reader::{Line, LineReader};
pub use row_codec::{decode, encode, has_open_quote, trim_line, QuoteScanner};
