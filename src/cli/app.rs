//! CLI run orchestration
//!
//! Validates paths, runs the pipeline, writes the result and reports the
//! summary. Every failure is returned to the caller, which owns the exit code.

use super::args::CliArgs;
use super::console::{format_thousands, Console};
use crate::pipeline::{self, TallyOutcome, TallyReport};
use crate::types::TallyError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Run the tool for parsed arguments
///
/// # Errors
///
/// Returns the first fatal error: bad configuration, missing input, unusable
/// output path, declined overwrite, or any pipeline failure. Nothing is
/// written to the output in that case.
pub fn execute(args: &CliArgs, console: &mut Console<'_>) -> Result<(), TallyError> {
    let config = args.to_tally_config()?;

    if !args.input_file.is_file() {
        return Err(TallyError::file_not_found(
            &args.input_file.display().to_string(),
        ));
    }

    if let Some(path) = &args.output_file {
        check_output_path(path, args.force, console)?;
    }

    let start = Instant::now();
    let report = pipeline::run_file(&args.input_file, &config)?;
    let elapsed = start.elapsed();

    match &report.outcome {
        TallyOutcome::Rendered(output) => {
            match &args.output_file {
                Some(path) => {
                    fs::write(path, output)?;
                    debug!(path = %path.display(), bytes = output.len(), "wrote output file");
                }
                None => {
                    console.stdout.write_all(output.as_bytes())?;
                    console.stdout.flush()?;
                }
            }
            writeln!(
                console.stderr,
                "Processed {} lines ({} records) in {:.2} seconds.",
                format_thousands(report.lines_read),
                format_thousands(report.record_count as u64),
                elapsed.as_secs_f64()
            )?;
        }
        TallyOutcome::NoRows => writeln!(console.stderr, "No rows in file.")?,
        TallyOutcome::EmptyResult => writeln!(console.stderr, "Empty result.")?,
    }

    report_bad_lines(&report, args.list_errors, console)
}

/// Check that the output path can be written to
///
/// The parent directory must exist and the path must not name a directory.
/// An existing file is only replaced after confirmation or with `force`.
fn check_output_path(path: &Path, force: bool, console: &mut Console<'_>) -> Result<(), TallyError> {
    let display = path.display().to_string();

    if display.ends_with('/') || display.ends_with('\\') || path.is_dir() {
        return Err(TallyError::output_path(
            &display,
            "output file cannot be a directory",
        ));
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(TallyError::output_path(
            &display,
            "output directory does not exist",
        ));
    }

    if path.exists()
        && !force
        && !console.confirm(&format!("File {} already exists.  Overwrite?", display))?
    {
        return Err(TallyError::Aborted);
    }

    Ok(())
}

fn report_bad_lines(
    report: &TallyReport,
    list_errors: bool,
    console: &mut Console<'_>,
) -> Result<(), TallyError> {
    if report.error_count == 0 {
        return Ok(());
    }

    writeln!(
        console.stderr,
        "Encountered {} bad line{}.",
        report.error_count,
        if report.error_count == 1 { "" } else { "s" }
    )?;

    let list = list_errors || (console.interactive && console.confirm("List line numbers?")?);
    if list {
        for line in &report.bad_lines {
            writeln!(console.stderr, "{}", line)?;
        }
    }

    Ok(())
}
