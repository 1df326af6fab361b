//! Group tally engine
//!
//! This module provides the TallyEngine that ingests delimited rows against a
//! column schema and counts records grouped by the value of one column.
//!
//! The engine enforces rules such as:
//! - Every recorded row has at least as many fields as the schema declares
//! - Bad rows either stop ingestion or are recorded by line number
//! - Grouped counts are ordered by key for stable output

use crate::io::row_codec;
use crate::types::{Dialect, GroupCounts, Row, Schema, TallyError};
use tracing::{debug, warn};

/// Result of feeding one line to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// The row was decoded and recorded
    Accepted,
    /// The line was empty or whitespace only and was skipped
    Blank,
    /// The row was bad and its line number was recorded
    Rejected,
}

/// Group-by tally engine
///
/// Owns the schema, the accepted rows and the line numbers of rejected rows.
/// Rows can keep arriving after `group_count` has been called; each call
/// aggregates over the rows recorded so far.
#[derive(Debug)]
pub struct TallyEngine {
    schema: Schema,
    dialect: Dialect,
    ignore_bad_rows: bool,
    records: Vec<Row>,
    errors: Vec<u64>,
}

impl TallyEngine {
    /// Create a new TallyEngine using the default dialect
    ///
    /// # Arguments
    ///
    /// * `columns` - Column names, in order
    /// * `ignore_bad_rows` - Record bad rows instead of failing on them
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Schema` if fewer than 2 column names are given.
    pub fn new<I, S>(columns: I, ignore_bad_rows: bool) -> Result<Self, TallyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_dialect(columns, ignore_bad_rows, Dialect::default())
    }

    /// Create a new TallyEngine decoding rows with a custom dialect
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Schema` if fewer than 2 column names are given.
    pub fn with_dialect<I, S>(
        columns: I,
        ignore_bad_rows: bool,
        dialect: Dialect,
    ) -> Result<Self, TallyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::from_schema(
            Schema::new(columns)?,
            ignore_bad_rows,
            dialect,
        ))
    }

    /// Create a new TallyEngine from an already-validated schema
    pub fn from_schema(schema: Schema, ignore_bad_rows: bool, dialect: Dialect) -> Self {
        TallyEngine {
            schema,
            dialect,
            ignore_bad_rows,
            records: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Feed one raw line to the engine
    ///
    /// Surrounding whitespace other than the delimiter is trimmed first;
    /// blank lines are skipped. The rest is decoded
    /// and checked against the schema width.
    ///
    /// # Arguments
    ///
    /// * `raw_line` - The line as read from the input
    /// * `line_number` - 1-based line number, used to report bad rows
    ///
    /// # Returns
    ///
    /// * `Ok(RowStatus)` describing what happened to the line
    /// * `Err(TallyError::BadRow)` if the row is bad and bad rows are not
    ///   ignored; the caller must stop ingesting
    pub fn add_row(&mut self, raw_line: &str, line_number: u64) -> Result<RowStatus, TallyError> {
        let line = row_codec::trim_line(raw_line, &self.dialect);
        if line.is_empty() {
            return Ok(RowStatus::Blank);
        }

        let reason = match row_codec::decode(line, &self.dialect) {
            Ok(Some(row)) if row.len() >= self.schema.len() => {
                self.records.push(row);
                return Ok(RowStatus::Accepted);
            }
            Ok(Some(row)) => format!(
                "expected at least {} fields, found {}",
                self.schema.len(),
                row.len()
            ),
            Ok(None) => return Ok(RowStatus::Blank),
            Err(e) => e.to_string(),
        };

        if !self.ignore_bad_rows {
            return Err(TallyError::bad_row(line_number, reason));
        }

        warn!(line = line_number, %reason, "skipping bad row");
        self.errors.push(line_number);
        Ok(RowStatus::Rejected)
    }

    /// Count recorded rows grouped by the value of a column
    ///
    /// Values are compared exactly: no trimming and no case folding. Rows
    /// without a value at the column's index are skipped.
    ///
    /// # Arguments
    ///
    /// * `column` - Name of the group-by column; the first match wins
    ///
    /// # Returns
    ///
    /// Counts keyed by column value, in ascending key order. Empty when no
    /// rows have been recorded.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::UnknownColumn` if the schema has no such column.
    pub fn group_count(&self, column: &str) -> Result<GroupCounts, TallyError> {
        let index = self
            .schema
            .position(column)
            .ok_or_else(|| TallyError::unknown_column(column))?;

        let mut counts = GroupCounts::new();
        for value in self.records.iter().filter_map(|row| row.get(index)) {
            match counts.get_mut(value) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(value.to_string(), 1);
                }
            }
        }

        debug!(
            column,
            index,
            groups = counts.len(),
            records = self.records.len(),
            "grouped records"
        );
        Ok(counts)
    }

    /// Number of accepted rows
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of rejected rows
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Line numbers of rejected rows, in input order
    pub fn errors(&self) -> &[u64] {
        &self.errors
    }

    /// The schema rows are validated against
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user_engine(ignore_bad_rows: bool) -> TallyEngine {
        TallyEngine::new(["user ID", "user age"], ignore_bad_rows).unwrap()
    }

    fn feed(engine: &mut TallyEngine, lines: &[&str]) -> Result<(), TallyError> {
        for (i, line) in lines.iter().enumerate() {
            engine.add_row(line, i as u64 + 1)?;
        }
        Ok(())
    }

    fn counts(pairs: &[(&str, u64)]) -> GroupCounts {
        pairs
            .iter()
            .map(|(key, count)| (key.to_string(), *count))
            .collect()
    }

    #[rstest]
    #[case::empty(Vec::<&str>::new())]
    #[case::single(vec!["user ID"])]
    fn test_new_rejects_short_schema(#[case] columns: Vec<&str>) {
        let result = TallyEngine::new(columns, false);
        assert!(matches!(result, Err(TallyError::Schema { .. })));
    }

    #[test]
    fn test_group_count_example() {
        let mut engine = user_engine(false);
        feed(&mut engine, &["1,30", "2,41", "3,30"]).unwrap();

        let result = engine.group_count("user age").unwrap();
        assert_eq!(result, counts(&[("30", 2), ("41", 1)]));
        assert_eq!(engine.record_count(), 3);
        assert_eq!(engine.error_count(), 0);
    }

    #[rstest]
    #[case::accepted("1,30", RowStatus::Accepted)]
    #[case::extra_fields("1,30,extra", RowStatus::Accepted)]
    #[case::blank("   ", RowStatus::Blank)]
    #[case::empty("", RowStatus::Blank)]
    #[case::newline_only("\r\n", RowStatus::Blank)]
    fn test_add_row_status(#[case] line: &str, #[case] expected: RowStatus) {
        let mut engine = user_engine(false);
        assert_eq!(engine.add_row(line, 1).unwrap(), expected);
    }

    #[test]
    fn test_add_row_trims_line() {
        let mut engine = user_engine(false);
        engine.add_row("  1,30  \n", 1).unwrap();
        assert_eq!(
            engine.group_count("user age").unwrap(),
            counts(&[("30", 1)])
        );
    }

    #[rstest]
    #[case::short_row("1", 4, "expected at least 2 fields, found 1")]
    #[case::unterminated_quote("1,\"30", 9, "unterminated quoted field")]
    fn test_bad_row_is_fatal_when_not_ignored(
        #[case] line: &str,
        #[case] line_number: u64,
        #[case] reason: &str,
    ) {
        let mut engine = user_engine(false);
        let result = engine.add_row(line, line_number);
        assert_eq!(result, Err(TallyError::bad_row(line_number, reason)));
        assert_eq!(engine.record_count(), 0);
        assert_eq!(engine.error_count(), 0);
    }

    #[test]
    fn test_strict_mode_stops_at_first_bad_row() {
        let mut engine = user_engine(false);
        let result = feed(&mut engine, &["1,30", "broken", "3,30"]);

        assert!(matches!(result, Err(TallyError::BadRow { line: 2, .. })));
        assert_eq!(engine.record_count(), 1);
    }

    #[test]
    fn test_bad_rows_recorded_when_ignored() {
        let mut engine = user_engine(true);
        feed(&mut engine, &["1,30", "broken", "3,30", "", "4,\"41", "5,41"]).unwrap();

        assert_eq!(engine.errors(), &[2, 5]);
        assert_eq!(engine.error_count(), 2);
        assert_eq!(engine.record_count(), 3);
        assert_eq!(
            engine.group_count("user age").unwrap(),
            counts(&[("30", 2), ("41", 1)])
        );
    }

    #[test]
    fn test_unknown_column() {
        let mut engine = user_engine(false);
        feed(&mut engine, &["1,30"]).unwrap();
        assert_eq!(
            engine.group_count("nonexistent"),
            Err(TallyError::unknown_column("nonexistent"))
        );
    }

    #[test]
    fn test_empty_engine_returns_empty_counts() {
        let engine = user_engine(false);
        assert!(engine.group_count("user ID").unwrap().is_empty());
    }

    #[test]
    fn test_keys_sort_lexicographically() {
        let mut engine = user_engine(false);
        feed(
            &mut engine,
            &["1,2", "2,10", "3,b", "4,B", "5,a", "6,A", "7,10", "8,1"],
        )
        .unwrap();

        let result = engine.group_count("user age").unwrap();
        let keys: Vec<&str> = result.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1", "10", "2", "A", "B", "a", "b"]);
        assert_eq!(result["10"], 2);
    }

    #[test]
    fn test_values_compared_exactly() {
        let mut engine = user_engine(false);
        feed(&mut engine, &["1,x", "2,\" x\"", "3,X"]).unwrap();

        assert_eq!(
            engine.group_count("user age").unwrap(),
            counts(&[(" x", 1), ("X", 1), ("x", 1)])
        );
    }

    #[test]
    fn test_duplicate_column_names_resolve_first_match() {
        let mut engine = TallyEngine::new(["a", "b", "a"], false).unwrap();
        feed(&mut engine, &["1,x,9", "1,y,8", "2,z,9"]).unwrap();

        assert_eq!(
            engine.group_count("a").unwrap(),
            counts(&[("1", 2), ("2", 1)])
        );
    }

    #[test]
    fn test_group_count_is_repeatable() {
        let mut engine = user_engine(false);
        feed(&mut engine, &["1,30", "2,41", "3,30"]).unwrap();

        let first = engine.group_count("user age").unwrap();
        let second = engine.group_count("user age").unwrap();
        assert_eq!(first, second);
        assert!(first.keys().eq(second.keys()));
    }

    #[test]
    fn test_ingestion_continues_after_aggregation() {
        let mut engine = user_engine(false);
        feed(&mut engine, &["1,30"]).unwrap();
        assert_eq!(engine.group_count("user age").unwrap().len(), 1);

        engine.add_row("2,41", 2).unwrap();
        assert_eq!(
            engine.group_count("user age").unwrap(),
            counts(&[("30", 1), ("41", 1)])
        );
    }

    #[test]
    fn test_counts_sum_to_record_count() {
        let mut engine = user_engine(true);
        feed(&mut engine, &["1,30", "2,41", "bad", "3,30", "4,52"]).unwrap();

        for column in ["user ID", "user age"] {
            let total: u64 = engine.group_count(column).unwrap().values().sum();
            assert_eq!(total, engine.record_count() as u64);
        }
    }

    #[test]
    fn test_short_records_are_skipped_not_counted() {
        let mut engine = user_engine(false);
        feed(&mut engine, &["1,30", "2,41"]).unwrap();
        engine.records.push(Row::from(vec!["3"]));

        let result = engine.group_count("user age").unwrap();
        let total: u64 = result.values().sum();
        assert_eq!(result, counts(&[("30", 1), ("41", 1)]));
        assert!(total < engine.record_count() as u64);
    }

    #[test]
    fn test_tab_dialect_keeps_empty_first_field() {
        let dialect = Dialect::new('\t', '"').unwrap();
        let mut engine =
            TallyEngine::with_dialect(["id", "age", "name"], false, dialect).unwrap();
        feed(&mut engine, &["\t30\tbob", "7\t41\tann", " 8\t30\t\t"]).unwrap();

        assert_eq!(engine.record_count(), 3);
        assert_eq!(
            engine.group_count("id").unwrap(),
            counts(&[("", 1), ("7", 1), ("8", 1)])
        );
        assert_eq!(
            engine.group_count("name").unwrap(),
            counts(&[("", 1), ("ann", 1), ("bob", 1)])
        );
    }

    #[test]
    fn test_custom_dialect() {
        let dialect = Dialect::new(';', '\'').unwrap();
        let mut engine = TallyEngine::with_dialect(["id", "city"], false, dialect).unwrap();
        feed(&mut engine, &["1;'Paris; FR'", "2;Lyon", "3;'Paris; FR'"]).unwrap();

        assert_eq!(
            engine.group_count("city").unwrap(),
            counts(&[("Lyon", 1), ("Paris; FR", 2)])
        );
    }
}
