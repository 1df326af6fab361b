//! Aggregation result types
//!
//! This module defines the grouped-count result handed from the tally engine
//! to the result renderers.

use std::collections::BTreeMap;

/// Literal label of the count column in rendered output
pub const COUNT_LABEL: &str = "count";

/// Group key to occurrence count
///
/// A `BTreeMap` keeps keys in ascending byte order, which is the row order
/// of every rendered output.
pub type GroupCounts = BTreeMap<String, u64>;

/// Grouped counts labelled with the column they were grouped by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTally {
    /// Name of the group-by column
    pub column: String,

    /// Counts per distinct value of the group-by column
    pub counts: GroupCounts,
}

impl GroupTally {
    /// Create a new GroupTally
    pub fn new(column: impl Into<String>, counts: GroupCounts) -> Self {
        Self {
            column: column.into(),
            counts,
        }
    }

    /// Header pair used by the tabular encodings
    pub fn header(&self) -> [&str; 2] {
        [self.column.as_str(), COUNT_LABEL]
    }

    /// Header followed by one `[key, count]` row per group, in key order
    pub fn rows(&self) -> Vec<[String; 2]> {
        std::iter::once(self.header().map(String::from))
            .chain(
                self.counts
                    .iter()
                    .map(|(key, count)| [key.clone(), count.to_string()]),
            )
            .collect()
    }

    /// Number of distinct groups
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no group was produced
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupTally {
        let mut counts = GroupCounts::new();
        counts.insert("41".to_string(), 1);
        counts.insert("30".to_string(), 2);
        GroupTally::new("user age", counts)
    }

    #[test]
    fn test_rows_start_with_header_in_key_order() {
        let rows = sample().rows();
        assert_eq!(
            rows,
            vec![
                ["user age".to_string(), "count".to_string()],
                ["30".to_string(), "2".to_string()],
                ["41".to_string(), "1".to_string()],
            ]
        );
    }

    #[test]
    fn test_sizes_and_header() {
        let tally = sample();
        assert_eq!(tally.len(), 2);
        assert!(!tally.is_empty());
        assert_eq!(tally.header(), ["user age", "count"]);
    }

    #[test]
    fn test_empty_tally() {
        let tally = GroupTally::new("age", GroupCounts::new());
        assert!(tally.is_empty());
        assert_eq!(tally.rows(), vec![["age".to_string(), "count".to_string()]]);
    }
}
