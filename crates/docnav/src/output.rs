//! Colored terminal output utilities.

use std::io::{self, Write};

use console::{Style, Term};

/// Terminal output formatter.
///
/// Messages go to stderr; command results (JSON) go to stdout.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print command output to stdout, uncolored.
    ///
    /// Unlike diagnostics, a failed write is an error: the output is the
    /// command's result.
    pub(crate) fn data(&self, text: &str) -> io::Result<()> {
        write_data(&mut &self.stdout, text)
    }
}

fn write_data<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writeln!(writer, "{text}")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::StorageFull))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_data_appends_newline() {
        let mut buf = Vec::new();

        write_data(&mut buf, "{}").unwrap();

        assert_eq!(buf, b"{}\n");
    }

    #[test]
    fn test_write_data_reports_failed_write() {
        let err = write_data(&mut FullDevice, "{}").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
    }
}
