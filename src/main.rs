//! group-tally CLI
//!
//! Counts the rows of a delimited text file grouped by one column.
//!
//! # Usage
//!
//! ```bash
//! group-tally -i users.csv -h -g "user age"
//! group-tally -i users.csv -c "user ID,user age" -f text
//! group-tally -i users.csv -h -b -f json -o tally.json
//! ```
//!
//! The rendered result goes to stdout (or the `-o` file). Prompts, the
//! processing summary and error messages go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success, including "No rows in file." and "Empty result."
//! - 1: Error (missing input, bad column list, bad row, unknown column, etc.)
//! - 2: Invalid command-line arguments

use group_tally::{cli, logging};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: {}", e);
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    let mut console = cli::Console {
        input: &mut input,
        stdout: &mut stdout,
        stderr: &mut stderr,
        interactive,
    };

    match cli::execute(&args, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
