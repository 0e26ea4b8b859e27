use crate::error::IssueError;
use anyhow::Result;

/// Environment variables read by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKey {
    Token,
    Editor,
    ApiUrl,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::Token => "GITHUB_TOKEN",
            EnvKey::Editor => "EDITOR",
            EnvKey::ApiUrl => "GITHUB_API_URL",
        }
    }
}

/// Editor launched when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "code";
/// Base URL of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings resolved once at startup and handed to the issue operations.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub token: String,
    pub editor: String,
    pub api_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("editor", &self.editor)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// - Returns `Err(IssueError::MissingToken)` if the token is absent or blank.
    /// - Falls back to [`DEFAULT_EDITOR`] and [`DEFAULT_API_URL`] for blank values.
    /// - Strips trailing slashes from the API URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: EnvKey| {
            lookup(key.as_str())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token =
            non_blank(EnvKey::Token).ok_or(IssueError::MissingToken(EnvKey::Token.as_str()))?;
        let editor = non_blank(EnvKey::Editor).unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        let api_url = non_blank(EnvKey::ApiUrl)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            token,
            editor,
            api_url,
        })
    }
}
