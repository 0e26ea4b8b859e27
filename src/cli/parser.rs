pub const PROGRAM: &str = "github-issue-editor";

pub const USAGE: &str = "\
Usage: github-issue-editor <command> [arguments]

Commands:
  create <owner> <repo>             Create a new issue
  read   <owner> <repo> <number>    Print an issue
  update <owner> <repo> <number>    Edit the title and body of an issue
  close  <owner> <repo> <number>    Close an issue
  help                              Show this help

Environment:
  GITHUB_TOKEN     API token (required)
  EDITOR           Editor used for issue bodies (default: code)
  GITHUB_API_URL   API base URL (default: https://api.github.com)";

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Issue(IssueCommand),
    Help,
    /// Command name not recognised
    Unknown(String),
    /// Known command with missing or malformed arguments
    Invalid(String),
}

/// Operations that talk to the issues API
#[derive(Debug, Clone, PartialEq)]
pub enum IssueCommand {
    Create {
        owner: String,
        repo: String,
    },
    Read {
        owner: String,
        repo: String,
        number: u64,
    },
    Update {
        owner: String,
        repo: String,
        number: u64,
    },
    Close {
        owner: String,
        repo: String,
        number: u64,
    },
}

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command. Arguments beyond the expected ones are ignored.
pub fn parse_args(args: &[String]) -> Command {
    let Some(command) = args.get(1) else {
        return Command::Invalid("Missing command".to_string());
    };

    match command.as_str() {
        "help" | "-h" | "--help" => Command::Help,
        "create" => match &args[2..] {
            [owner, repo, ..] => Command::Issue(IssueCommand::Create {
                owner: owner.clone(),
                repo: repo.clone(),
            }),
            _ => Command::Invalid(format!(
                "Not enough arguments. Usage: {PROGRAM} create <owner> <repo>"
            )),
        },
        name @ ("read" | "update" | "close") => match &args[2..] {
            [owner, repo, number, ..] => match number.parse::<u64>() {
                Ok(number) => Command::Issue(numbered(name, owner.clone(), repo.clone(), number)),
                Err(_) => Command::Invalid(format!(
                    "Issue number must be a non-negative integer, got `{number}`"
                )),
            },
            _ => Command::Invalid(format!(
                "Not enough arguments. Usage: {PROGRAM} {name} <owner> <repo> <number>"
            )),
        },
        cmd => Command::Unknown(cmd.to_string()),
    }
}

fn numbered(name: &str, owner: String, repo: String, number: u64) -> IssueCommand {
    match name {
        "read" => IssueCommand::Read {
            owner,
            repo,
            number,
        },
        "update" => IssueCommand::Update {
            owner,
            repo,
            number,
        },
        _ => IssueCommand::Close {
            owner,
            repo,
            number,
        },
    }
}
