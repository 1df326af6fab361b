//! Tally pipeline
//!
//! This module orchestrates a complete run by coordinating between the
//! [`LineReader`] (input), the [`TallyEngine`] (ingestion and aggregation) and
//! a [`ResultRenderer`](crate::render::ResultRenderer) (output encoding).
//!
//! # Design
//!
//! The pipeline is single-threaded and strictly sequential: all lines are
//! ingested first, then the records are aggregated once and rendered. Every
//! decoded row is held in memory until aggregation, so memory use grows with
//! the input size.
//!
//! Nothing is written here. The rendered output is returned in the
//! [`TallyReport`] and the caller decides where it goes, so a fatal error
//! never leaves partial output behind.

use crate::cli::OutputFormat;
use crate::core::TallyEngine;
use crate::io::LineReader;
use crate::render::{create_renderer, RenderOptions};
use crate::types::{GroupTally, Schema, TallyError};
use std::io::BufRead;
use std::path::Path;
use tracing::info;

/// Where the column names come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// The first line of the input is the header row
    Header,
    /// An explicit delimited list of column names
    List(String),
}

/// Configuration for a tally run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyConfig {
    /// Source of the column schema
    pub columns: ColumnSource,
    /// Name of the group-by column
    pub group_by: String,
    /// Record bad rows instead of failing on the first one
    pub ignore_bad_rows: bool,
    /// Output encoding
    pub format: OutputFormat,
    /// Dialect and line terminator settings
    pub render: RenderOptions,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyOutcome {
    /// The rendered result, to be written verbatim
    Rendered(String),
    /// No records were ingested
    NoRows,
    /// Records were ingested but no group was produced
    EmptyResult,
}

/// Result and statistics of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyReport {
    /// What the run produced
    pub outcome: TallyOutcome,
    /// Physical lines read, header included
    pub lines_read: u64,
    /// Rows accepted by the engine
    pub record_count: usize,
    /// Rows rejected by the engine
    pub error_count: usize,
    /// Line numbers of the rejected rows
    pub bad_lines: Vec<u64>,
}

/// Run a tally over a file
///
/// # Errors
///
/// Returns `TallyError::FileNotFound` if the file does not exist, and any
/// error [`run`] can return.
pub fn run_file(path: &Path, config: &TallyConfig) -> Result<TallyReport, TallyError> {
    let lines = LineReader::open(path, config.render.dialect)?;
    tally_lines(lines, config)
}

/// Run a tally over any buffered reader
///
/// # Errors
///
/// Returns an error if:
/// - The column schema is empty, unparsable or names fewer than 2 columns
/// - A bad row is found and bad rows are not ignored
/// - The group-by column is not in the schema
/// - Reading the input or rendering the result fails
pub fn run<R: BufRead>(input: R, config: &TallyConfig) -> Result<TallyReport, TallyError> {
    tally_lines(LineReader::new(input, config.render.dialect), config)
}

fn tally_lines<R: BufRead>(
    mut lines: LineReader<R>,
    config: &TallyConfig,
) -> Result<TallyReport, TallyError> {
    let dialect = config.render.dialect;

    let schema = match &config.columns {
        ColumnSource::Header => match lines.next().transpose()? {
            Some(header) => Schema::parse(&header.text, &dialect)?,
            None => return Err(TallyError::schema("", "empty file, no header row")),
        },
        ColumnSource::List(list) => Schema::parse(list, &dialect)?,
    };

    let mut engine = TallyEngine::from_schema(schema, config.ignore_bad_rows, dialect);
    for line in lines.by_ref() {
        let line = line?;
        engine.add_row(&line.text, line.number)?;
    }

    info!(
        lines = lines.lines_read(),
        records = engine.record_count(),
        bad_rows = engine.error_count(),
        "ingestion finished"
    );

    let outcome = if engine.record_count() == 0 {
        TallyOutcome::NoRows
    } else {
        let counts = engine.group_count(&config.group_by)?;
        if counts.is_empty() {
            TallyOutcome::EmptyResult
        } else {
            let tally = GroupTally::new(config.group_by.clone(), counts);
            let renderer = create_renderer(config.format, config.render);
            TallyOutcome::Rendered(renderer.render(&tally)?)
        }
    };

    Ok(TallyReport {
        outcome,
        lines_read: lines.lines_read(),
        record_count: engine.record_count(),
        error_count: engine.error_count(),
        bad_lines: engine.errors().to_vec(),
    })
}
