use crate::cli::parser::{self, Command, IssueCommand};
use crate::config::Config;
use crate::editor::{Editor, ExternalEditor};
use crate::error::IssueError;
use crate::github::client::{ReqwestTransport, Transport};
use crate::github::operations::{IssueOperations, Outcome};
use crate::output;
use crate::prompt::{Prompt, StdinPrompt};
use anyhow::Result;
use std::io::Write;

const CANCELLED_MESSAGE: &str = "Cancelled. Nothing was submitted.";

/// Parses `args` and runs the selected command against the live API.
///
/// Configuration is loaded through `load_config` only for issue commands,
/// before any prompt or request. Usage problems come back as
/// [`IssueError::Usage`].
pub async fn run<L>(
    args: Vec<String>,
    load_config: L,
    mut stdout_additional: Option<&mut dyn Write>,
) -> Result<Outcome>
where
    L: FnOnce() -> Result<Config>,
{
    let command = match parser::parse_args(&args) {
        Command::Issue(command) => command,
        Command::Help => {
            output::println(parser::USAGE, &mut stdout_additional)?;
            return Ok(Outcome::Completed);
        }
        Command::Unknown(cmd) => {
            return Err(IssueError::Usage(format!("Unknown command: {cmd}")).into());
        }
        Command::Invalid(message) => return Err(IssueError::Usage(message).into()),
    };

    let config = load_config()?;
    log::debug!("Using {config:?}");

    let transport = ReqwestTransport::new()?;
    let mut editor = ExternalEditor::new(config.editor.clone());
    let mut prompt = StdinPrompt;

    execute(
        command,
        &config,
        &transport,
        &mut editor,
        &mut prompt,
        &mut stdout_additional,
    )
    .await
}

/// Runs one issue command with the given collaborators.
pub async fn execute<T, E, P>(
    command: IssueCommand,
    config: &Config,
    transport: &T,
    editor: &mut E,
    prompt: &mut P,
    out: &mut Option<&mut dyn Write>,
) -> Result<Outcome>
where
    T: Transport,
    E: Editor,
    P: Prompt,
{
    let mut operations = IssueOperations::new(config, transport, editor, prompt);
    let outcome = match command {
        IssueCommand::Create { owner, repo } => operations.create(&owner, &repo, out).await?,
        IssueCommand::Read {
            owner,
            repo,
            number,
        } => operations.read(&owner, &repo, number, out).await?,
        IssueCommand::Update {
            owner,
            repo,
            number,
        } => operations.update(&owner, &repo, number, out).await?,
        IssueCommand::Close {
            owner,
            repo,
            number,
        } => operations.close(&owner, &repo, number, out).await?,
    };

    if outcome == Outcome::Cancelled {
        output::println(CANCELLED_MESSAGE, out)?;
    }
    Ok(outcome)
}
