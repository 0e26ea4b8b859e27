use crate::error::IssueError;
use crate::output;
use crate::prompt::{Prompt, StdinPrompt};
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Input that confirms the edited text.
pub const CONFIRM_INPUT: &str = "1";

const CONFIRM_MESSAGE: &str = "Save and close the file in your editor.\n>>> Enter 1 to submit, anything else cancels: ";

/// Result of handing text to the user for editing
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    /// Text accepted by the user, surrounding whitespace trimmed
    Confirmed(String),
    /// User declined to submit
    Cancelled,
}

/// Source of multi-line text entered by the user
pub trait Editor {
    /// Presents `seed` for editing and returns the final text or a cancellation.
    ///
    /// Progress messages go to stdout and are copied into `out`.
    fn acquire_text(
        &mut self,
        seed: &str,
        out: &mut Option<&mut dyn Write>,
    ) -> Result<EditorOutcome>;
}

/// Editor bridge that runs an external program on a temporary file.
///
/// The command is split with shell quoting rules, so it may carry arguments
/// (`code --wait`) or a quoted program path with spaces. The file path is
/// appended as the last argument. The temporary file is removed when this call returns,
/// whatever the outcome.
pub struct ExternalEditor<P = StdinPrompt> {
    command: String,
    prompt: P,
}

impl ExternalEditor<StdinPrompt> {
    pub fn new(command: impl Into<String>) -> Self {
        Self::with_prompt(command, StdinPrompt)
    }
}

impl<P: Prompt> ExternalEditor<P> {
    pub fn with_prompt(command: impl Into<String>, prompt: P) -> Self {
        ExternalEditor {
            command: command.into(),
            prompt,
        }
    }

    fn launch(&self, path: &Path, out: &mut Option<&mut dyn Write>) -> Result<()> {
        let launch_error = |reason: String| IssueError::EditorLaunch {
            editor: self.command.clone(),
            reason,
        };

        let parts = shell_words::split(&self.command).map_err(|e| launch_error(e.to_string()))?;
        let Some((program, args)) = parts.split_first() else {
            return Err(launch_error("editor command is empty".to_string()).into());
        };

        output::println(&format!("Launching editor ({})...", self.command), out)?;
        log::debug!("Running {program} {args:?} on {}", path.display());

        let status = Command::new(program)
            .args(args)
            .arg(path)
            .status()
            .map_err(|e| launch_error(e.to_string()))?;
        if !status.success() {
            return Err(launch_error(format!("editor exited with {status}")).into());
        }
        Ok(())
    }
}

impl<P: Prompt> Editor for ExternalEditor<P> {
    fn acquire_text(
        &mut self,
        seed: &str,
        out: &mut Option<&mut dyn Write>,
    ) -> Result<EditorOutcome> {
        let mut file = tempfile::Builder::new()
            .prefix("issue_")
            .suffix(".md")
            .tempfile()
            .map_err(IssueError::TempFile)?;

        if !seed.is_empty() {
            file.write_all(seed.as_bytes())
                .map_err(IssueError::TempFile)?;
            file.as_file().sync_all().map_err(IssueError::TempFile)?;
        }
        let path = file.into_temp_path();

        self.launch(&path, out)?;

        let answer = self.prompt.ask(CONFIRM_MESSAGE)?;
        if answer.trim() != CONFIRM_INPUT {
            return Ok(EditorOutcome::Cancelled);
        }

        let content = std::fs::read_to_string(&path).map_err(IssueError::TempFile)?;
        Ok(EditorOutcome::Confirmed(content.trim().to_string()))
    }
}
