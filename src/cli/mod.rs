// CLI module
// Command-line interface, argument parsing and run orchestration

mod app;
mod args;
mod console;

pub use app::execute;
pub use args::{CliArgs, OutputFormat, DEFAULT_COLUMNS, DEFAULT_GROUP_BY};
pub use console::{format_thousands, Console};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., invalid arguments, missing required arguments, or
/// the --help flag), clap displays an error message or help text and exits
/// the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
