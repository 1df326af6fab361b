//! Aligned fixed-width table rendering
//!
//! Every column is as wide as its widest cell, header included. Values are
//! right-aligned:
//!
//! ```text
//! | user age | count |
//! |       30 |     2 |
//! |       41 |     1 |
//! ```

use super::{LineEnding, ResultRenderer};
use crate::types::{GroupTally, TallyError};
use unicode_width::UnicodeWidthStr;

/// Table renderer for the `text` format
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    line_ending: LineEnding,
}

impl TableRenderer {
    /// Create a new TableRenderer
    pub fn new(line_ending: LineEnding) -> Self {
        Self { line_ending }
    }
}

impl ResultRenderer for TableRenderer {
    fn render(&self, tally: &GroupTally) -> Result<String, TallyError> {
        let rows = tally.rows();

        let mut widths = [0usize; 2];
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let mut output = String::new();
        for row in &rows {
            for (width, cell) in widths.iter().zip(row) {
                output.push_str("| ");
                output.push_str(&" ".repeat(width - cell.width()));
                output.push_str(cell);
                output.push(' ');
            }
            output.push('|');
            output.push_str(self.line_ending.as_str());
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupCounts;

    fn tally(column: &str, pairs: &[(&str, u64)]) -> GroupTally {
        let counts: GroupCounts = pairs
            .iter()
            .map(|(key, count)| (key.to_string(), *count))
            .collect();
        GroupTally::new(column, counts)
    }

    #[test]
    fn test_header_wider_than_values() {
        let output = TableRenderer::default()
            .render(&tally("user age", &[("30", 2), ("41", 1)]))
            .unwrap();
        assert_eq!(
            output,
            "| user age | count |\n|       30 |     2 |\n|       41 |     1 |\n"
        );
    }

    #[test]
    fn test_values_wider_than_header() {
        let output = TableRenderer::default()
            .render(&tally("c", &[("long value", 1234567)]))
            .unwrap();
        assert_eq!(
            output,
            "|          c |   count |\n| long value | 1234567 |\n"
        );
    }

    #[test]
    fn test_empty_tally_renders_header_only() {
        let output = TableRenderer::default().render(&tally("age", &[])).unwrap();
        assert_eq!(output, "| age | count |\n");
    }

    #[test]
    fn test_wide_characters_use_display_width() {
        let output = TableRenderer::default()
            .render(&tally("city", &[("東京", 3), ("Oslo", 1)]))
            .unwrap();
        assert_eq!(
            output,
            "| city | count |\n| Oslo |     1 |\n| 東京 |     3 |\n"
        );
    }

    #[test]
    fn test_every_line_has_same_width() {
        let output = TableRenderer::default()
            .render(&tally("k", &[("a", 1), ("bbbbbb", 22), ("cc", 333)]))
            .unwrap();
        let widths: Vec<usize> = output.lines().map(str::len).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
