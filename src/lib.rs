//! group-tally library
//! # Overview
//!
//! This library counts the rows of a delimited text file grouped by the value
//! of one column, and renders the counts as delimited text, an aligned table
//! or JSON records.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Schema, Dialect, GroupTally, errors)
//! - [`io`] - Row codec and logical line reading
//! - [`core`] - The tally engine: ingestion, bad-row policy, aggregation
//! - [`render`] - Output encodings behind the `ResultRenderer` trait
//! - [`pipeline`] - Sequential orchestration of a complete run
//! - [`cli`] - CLI arguments parsing and run orchestration
//! - [`logging`] - Tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use group_tally::TallyEngine;
//!
//! let mut engine = TallyEngine::new(["user ID", "user age"], false).unwrap();
//! for (number, line) in ["1,30", "2,41", "3,30"].into_iter().enumerate() {
//!     engine.add_row(line, number as u64 + 1).unwrap();
//! }
//!
//! let counts = engine.group_count("user age").unwrap();
//! assert_eq!(counts["30"], 2);
//! assert_eq!(counts["41"], 1);
//! ```
//!
//! # Bad Rows
//!
//! A row is bad when it cannot be decoded or has fewer fields than the
//! schema. By default the first bad row stops the run; when bad rows are
//! ignored their line numbers are collected instead.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod types;

pub use core::{RowStatus, TallyEngine};
pub use pipeline::{ColumnSource, TallyConfig, TallyOutcome, TallyReport};
pub use render::{create_renderer, LineEnding, RenderOptions, ResultRenderer};
pub use types::{DecodeError, Dialect, GroupCounts, GroupTally, Row, Schema, TallyError};
