//! Interactive prompts
//!
//! Line-based prompts used by `edit` and `delete`.

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Typed at an edit prompt to clear an optional field
pub const CLEAR_MARKER: &str = "-";

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

/// Prompt with a default value, returns None if user keeps default
pub fn prompt_with_default(prompt: &str, default: &str) -> Result<Option<String>> {
    if default.is_empty() {
        print!("{}: ", prompt);
    } else {
        print!("{} [{}]: ", prompt, default);
    }
    io::stdout().flush()?;

    read_answer(&mut io::stdin().lock())
}

/// Read one line; an empty line means "keep"
fn read_answer(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut input = String::new();
    reader.read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_read_answer() {
        let mut keep = Cursor::new("\n");
        assert_eq!(read_answer(&mut keep).unwrap(), None);

        let mut value = Cursor::new("  New Title  \n");
        assert_eq!(read_answer(&mut value).unwrap().as_deref(), Some("New Title"));

        let mut eof = Cursor::new("");
        assert_eq!(read_answer(&mut eof).unwrap(), None);
    }
}
