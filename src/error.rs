use thiserror::Error;

/// Failures the dispatcher needs to tell apart from generic errors
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("{0} environment variable is not set. Export a GitHub token and try again.")]
    MissingToken(&'static str),
    #[error("{0}")]
    Usage(String),
    #[error("Issue title must not be empty")]
    EmptyTitle,
    #[error("Failed to launch editor `{editor}`: {reason}")]
    EditorLaunch { editor: String, reason: String },
    #[error("Temporary file error: {0}")]
    TempFile(#[source] std::io::Error),
    #[error("Failed to {action}: HTTP {status}\n{body}")]
    Api {
        action: String,
        status: u16,
        body: String,
    },
}

impl IssueError {
    pub fn api(action: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        IssueError::Api {
            action: action.into(),
            status,
            body: body.into(),
        }
    }

    /// Whether this error should be followed by the usage text
    pub fn is_usage(&self) -> bool {
        matches!(self, IssueError::Usage(_))
    }
}
