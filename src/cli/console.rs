//! Terminal handles and user feedback helpers

use crate::types::TallyError;
use std::io::{BufRead, Write};

/// Handles the CLI reads answers from and writes output to
///
/// `stdout` receives only rendered results; prompts and feedback go to
/// `stderr`.
pub struct Console<'a> {
    /// Source of prompt answers
    pub input: &'a mut dyn BufRead,
    /// Destination of rendered output when no output file is given
    pub stdout: &'a mut dyn Write,
    /// Destination of prompts and feedback messages
    pub stderr: &'a mut dyn Write,
    /// Whether prompts may be shown when not explicitly requested
    pub interactive: bool,
}

impl Console<'_> {
    /// Ask a yes/no question; only `y` (any case) counts as yes
    ///
    /// End of input counts as no.
    pub fn confirm(&mut self, question: &str) -> Result<bool, TallyError> {
        write!(self.stderr, "{} y/N: ", question)?;
        self.stderr.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

/// Format a number with `,` thousands separators
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case::lower_y("y\n", true)]
    #[case::upper_y("Y\n", true)]
    #[case::padded(" y \r\n", true)]
    #[case::no("n\n", false)]
    #[case::yes_word("yes\n", false)]
    #[case::empty_line("\n", false)]
    #[case::end_of_input("", false)]
    fn test_confirm(#[case] answer: &str, #[case] expected: bool) {
        let mut input = Cursor::new(answer.as_bytes());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut console = Console {
            input: &mut input,
            stdout: &mut stdout,
            stderr: &mut stderr,
            interactive: true,
        };

        assert_eq!(console.confirm("Overwrite?").unwrap(), expected);
        assert_eq!(String::from_utf8(stderr).unwrap(), "Overwrite? y/N: ");
        assert!(stdout.is_empty());
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(123456, "123,456")]
    #[case(1234567, "1,234,567")]
    fn test_format_thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(format_thousands(value), expected);
    }
}
