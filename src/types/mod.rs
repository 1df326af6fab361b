//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `schema`: Column schema, rows and the text dialect
//! - `tally`: Grouped-count results
//! - `error`: Error types for the tally pipeline

pub mod error;
pub mod schema;
pub mod tally;

pub use error::{DecodeError, TallyError};
pub use schema::{Dialect, Row, Schema, MIN_COLUMNS};
pub use tally::{GroupCounts, GroupTally, COUNT_LABEL};
