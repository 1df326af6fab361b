//! Result rendering module
//!
//! This module defines the Strategy pattern for turning a [`GroupTally`] into
//! text. Each output format is a separate renderer selected at runtime:
//!
//! - `text` - aligned fixed-width table ([`TableRenderer`])
//! - `csv` - delimited text ([`DelimitedRenderer`])
//! - `json` - array of records ([`JsonRenderer`])

use crate::cli::OutputFormat;
use crate::types::{Dialect, GroupTally, TallyError};

pub mod delimited;
pub mod json;
pub mod table;

pub use delimited::DelimitedRenderer;
pub use json::JsonRenderer;
pub use table::TableRenderer;

/// Line terminator written after each rendered line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options shared by all renderers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Dialect used by the delimited-text renderer
    pub dialect: Dialect,
    /// Line terminator
    pub line_ending: LineEnding,
}

/// Renderer trait for grouped-count results
///
/// Implementations produce the complete output in memory so that nothing is
/// written when rendering fails.
pub trait ResultRenderer: Send + Sync {
    /// Render the tally to a string
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Render` if the result cannot be encoded.
    fn render(&self, tally: &GroupTally) -> Result<String, TallyError>;
}

/// Create a renderer for the specified output format
///
/// # Arguments
///
/// * `format` - The output encoding to produce
/// * `options` - Dialect and line terminator settings
///
/// # Returns
///
/// A boxed trait object implementing the ResultRenderer trait
pub fn create_renderer(format: OutputFormat, options: RenderOptions) -> Box<dyn ResultRenderer> {
    match format {
        OutputFormat::Text => Box::new(TableRenderer::new(options.line_ending)),
        OutputFormat::Csv => Box::new(DelimitedRenderer::new(options)),
        OutputFormat::Json => Box::new(JsonRenderer::new(options.line_ending)),
    }
}
