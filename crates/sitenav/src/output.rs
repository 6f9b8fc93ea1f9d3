//! Terminal reporting for command results.

use std::fmt::Display;

use console::{Term, style};

/// Report writer.
///
/// Status lines go to stderr; [`Output::data`] writes to stdout so command
/// results can be piped.
pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
        }
    }

    /// Print the site header: bold title and its base path.
    pub(crate) fn site(&self, title: &str, base_path: impl Display) {
        let line = format!(
            "{} {}",
            style(title).cyan().bold(),
            style(format_args!("(served under {base_path})")).dim()
        );
        let _ = self.stderr.write_line(&line);
    }

    /// Print a labeled detail line.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let _ = self
            .stderr
            .write_line(&format!("  {} {value}", style(format_args!("{label}:")).dim()));
    }

    pub(crate) fn success(&self, msg: &str) {
        let _ = self.stderr.write_line(&style(msg).green().to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        let _ = self
            .stderr
            .write_line(&format!("{} {msg}", style("warning:").yellow().bold()));
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self
            .stderr
            .write_line(&format!("{} {msg}", style("error:").red().bold()));
    }

    /// Write command output to stdout.
    pub(crate) fn data(&self, text: &str) -> std::io::Result<()> {
        self.stdout.write_line(text)
    }
}
