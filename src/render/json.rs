//! Structured record rendering
//!
//! Emits a JSON array with one object per group. Each object has two
//! members, in order: the group-by column name mapped to the group key, and
//! `"count"` mapped to the numeric count. There is no header record.

use super::{LineEnding, ResultRenderer};
use crate::types::{GroupTally, TallyError, COUNT_LABEL};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Renderer for the `json` format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    line_ending: LineEnding,
}

impl JsonRenderer {
    /// Create a new JsonRenderer
    pub fn new(line_ending: LineEnding) -> Self {
        Self { line_ending }
    }
}

struct GroupRecord<'a> {
    column: &'a str,
    key: &'a str,
    count: u64,
}

impl Serialize for GroupRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.column, self.key)?;
        map.serialize_entry(COUNT_LABEL, &self.count)?;
        map.end()
    }
}

struct GroupRecords<'a>(&'a GroupTally);

impl Serialize for GroupRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tally = self.0;
        let mut seq = serializer.serialize_seq(Some(tally.len()))?;
        for (key, count) in &tally.counts {
            seq.serialize_element(&GroupRecord {
                column: &tally.column,
                key,
                count: *count,
            })?;
        }
        seq.end()
    }
}

impl ResultRenderer for JsonRenderer {
    fn render(&self, tally: &GroupTally) -> Result<String, TallyError> {
        let mut output = serde_json::to_string(&GroupRecords(tally))?;
        output.push_str(self.line_ending.as_str());
        Ok(output)
    }
}
