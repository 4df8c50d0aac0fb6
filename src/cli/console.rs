//! Line-oriented terminal seam shared by the dispatcher and the command
//! handlers.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

use crate::errors::{LibraryError, Result};

/// Line-oriented terminal seam. The dispatcher and every command handler talk
/// to the user only through this, so tests can script input and capture
/// output.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap `input` and `output`. With `color` off every writer prints plain
    /// text, which is what tests compare against.
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Print `prompt` and read one line with its line ending stripped.
    /// Returns `None` once input is exhausted.
    ///
    /// The whole line is consumed before it is decoded, so a line that is not
    /// valid UTF-8 is rejected as `InvalidInput` and the next prompt starts
    /// cleanly on the following line.
    pub fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8(raw).map_err(|_| LibraryError::InvalidInput {
            field: "line",
            reason: "input is not valid UTF-8".to_string(),
        })?;
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Write `text` followed by a newline, unstyled.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Bold when colour is on. Used for the menu.
    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.output, "{}", text.bold())
        } else {
            self.line(text)
        }
    }

    /// Green when colour is on. Used for inserted/created confirmations.
    pub fn success(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.output, "{}", text.green())
        } else {
            self.line(text)
        }
    }

    /// Prefix `text` with `error: `, red when colour is on.
    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let text = format!("error: {text}");
        if self.color {
            writeln!(self.output, "{}", text.as_str().red())
        } else {
            self.line(&text)
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn plain(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    #[test]
    fn prompt_strips_line_endings() {
        let mut console = plain("joe\r\namy\n");
        assert_eq!(console.prompt("Name? ").unwrap().as_deref(), Some("joe"));
        assert_eq!(console.prompt("Name? ").unwrap().as_deref(), Some("amy"));
        assert_eq!(console.prompt("Name? ").unwrap(), None);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Name? Name? Name? ");
    }

    #[test]
    fn invalid_utf8_line_is_rejected_and_skipped() {
        let mut console = Console::new(Cursor::new(b"jos\xe9\namy\n".to_vec()), Vec::new(), false);

        let err = console.prompt("Name? ").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidInput { field: "line", .. }));
        assert!(!err.is_fatal());
        assert_eq!(console.prompt("Name? ").unwrap().as_deref(), Some("amy"));
    }

    #[test]
    fn plain_error_has_prefix_and_no_escape_codes() {
        let mut console = plain("");
        console.error("boom").unwrap();
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "error: boom\n");
    }

    #[test]
    fn styled_heading_emits_escape_codes() {
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new(), true);
        console.heading("Menu").unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Menu"));
        assert!(output.contains('\u{1b}'));
    }
}
