use crate::pipeline::{ColumnSource, TallyConfig};
use crate::render::{LineEnding, RenderOptions};
use crate::types::{Dialect, TallyError};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Column layout assumed when the input has no header row
pub const DEFAULT_COLUMNS: &str = "user ID,user age";

/// Group-by column used when none is given
pub const DEFAULT_GROUP_BY: &str = "user age";

/// Count the rows of a delimited text file grouped by one column
#[derive(Parser, Debug)]
#[command(name = "group-tally", version)]
#[command(about = "Count the rows of a delimited text file grouped by one column", long_about = None)]
#[command(disable_help_flag = true)]
pub struct CliArgs {
    /// Input file path
    #[arg(short = 'i', long = "input", value_name = "INPUTFILE", help = "Path to the input file")]
    pub input_file: PathBuf,

    /// Output file path; stdout when absent
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUTFILE",
        help = "Path to the output file (default: print to stdout)"
    )]
    pub output_file: Option<PathBuf>,

    /// The first line of the input holds the column names
    #[arg(short = 'h', long = "header", help = "First line of the input contains column names")]
    pub has_header: bool,

    /// Delimited column names, used when there is no header row
    #[arg(
        short = 'c',
        long = "columns",
        value_name = "COLUMNS",
        default_value = DEFAULT_COLUMNS,
        help = "Comma separated column names"
    )]
    pub columns: String,

    /// Name of the group-by column
    #[arg(
        short = 'g',
        long = "group-by",
        value_name = "GROUPBY",
        default_value = DEFAULT_GROUP_BY,
        value_parser = trimmed,
        help = "Title of the group-by column"
    )]
    pub group_by: String,

    /// Record bad rows instead of stopping on the first one
    #[arg(short = 'b', long = "ignore-bad-rows", help = "Ignore bad lines in the input")]
    pub ignore_bad_rows: bool,

    /// Output encoding
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        default_value = "csv",
        ignore_case = true,
        help = "Output format"
    )]
    pub format: OutputFormat,

    /// Field delimiter
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Quote character
    #[arg(short = 'q', long = "quote", value_name = "CHAR", default_value_t = '"')]
    pub quote: char,

    /// Terminate rendered lines with CRLF instead of LF
    #[arg(long = "crlf")]
    pub crlf: bool,

    /// Overwrite an existing output file without asking
    #[arg(short = 'y', long = "force")]
    pub force: bool,

    /// Print the line numbers of bad rows without asking
    #[arg(long = "list-errors")]
    pub list_errors: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Available output encodings
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned fixed-width table
    Text,
    /// Delimited text
    Csv,
    /// JSON array of records
    Json,
}

fn trimmed(value: &str) -> Result<String, String> {
    Ok(value.trim().to_string())
}

impl CliArgs {
    /// Create a TallyConfig from CLI arguments
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Config` if the delimiter or quote character is
    /// unusable, or if the group-by column name is blank.
    pub fn to_tally_config(&self) -> Result<TallyConfig, TallyError> {
        let dialect = Dialect::new(self.delimiter, self.quote)?;

        if self.group_by.is_empty() {
            return Err(TallyError::config(
                "please specify a column by which to group your tally",
            ));
        }

        let columns = if self.has_header {
            ColumnSource::Header
        } else {
            ColumnSource::List(self.columns.clone())
        };

        let line_ending = if self.crlf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };

        Ok(TallyConfig {
            columns,
            group_by: self.group_by.clone(),
            ignore_bad_rows: self.ignore_bad_rows,
            format: self.format,
            render: RenderOptions {
                dialect,
                line_ending,
            },
        })
    }
}
