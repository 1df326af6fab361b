//! Delimited-text rendering
//!
//! Writes the header row and one row per group through the row codec, each
//! followed by the line terminator.

use super::{RenderOptions, ResultRenderer};
use crate::io::row_codec::encode;
use crate::types::{GroupTally, TallyError};

/// Renderer for the `csv` format
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedRenderer {
    options: RenderOptions,
}

impl DelimitedRenderer {
    /// Create a new DelimitedRenderer
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ResultRenderer for DelimitedRenderer {
    fn render(&self, tally: &GroupTally) -> Result<String, TallyError> {
        let terminator = self.options.line_ending.as_str();

        let mut output = String::new();
        for row in tally.rows() {
            output.push_str(&encode(&row, &self.options.dialect)?);
            output.push_str(terminator);
        }

        Ok(output)
    }
}
