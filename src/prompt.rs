use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Line-oriented interactive input
pub trait Prompt {
    /// Shows `message` and returns the next input line without its line ending.
    /// End of input yields an empty string.
    fn ask(&mut self, message: &str) -> Result<String>;
}

/// Prompt reading from any buffered reader, writing prompts to stdout
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        LinePrompt { reader }
    }
}

/// Prompt bound to the terminal.
///
/// Locks stdin only for the duration of a single read, so several instances
/// can coexist in one process.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, message: &str) -> Result<String> {
        LinePrompt::new(io::stdin().lock()).ask(message)
    }
}

impl<R: BufRead> Prompt for LinePrompt<R> {
    fn ask(&mut self, message: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{message}").context("Failed to write prompt")?;
        stdout.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .context("Failed to read from standard input")?;
        Ok(strip_line_ending(&line).to_string())
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}
