use github_issue_editor::cli::parser::USAGE;
use github_issue_editor::config::Config;
use github_issue_editor::error::IssueError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    match github_issue_editor::run::run(args, Config::from_env, None).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            if err
                .downcast_ref::<IssueError>()
                .is_some_and(IssueError::is_usage)
            {
                eprintln!("\n{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}
