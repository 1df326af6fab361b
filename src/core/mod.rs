//! Core business logic module
//!
//! - `engine` - Row ingestion, bad-row policy and grouped counting

pub mod engine;

pub use engine::{RowStatus, TallyEngine};
