use crate::config::Config;
use crate::editor::{Editor, EditorOutcome};
use crate::error::IssueError;
use crate::github::client::{ApiRequest, Method, Transport};
use crate::github::issues::{CreatedIssue, Issue, IssueState, issue_path, issues_path};
use crate::output;
use crate::prompt::Prompt;
use anyhow::{Context, Result};
use std::io::Write;

const ACCEPT: &str = "application/vnd.github+json";

/// How an operation that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user declined to submit; nothing was sent
    Cancelled,
}

/// Create, read, update and close issues of a repository.
///
/// Each operation performs its HTTP calls one after another and fails on the
/// first unexpected status.
pub struct IssueOperations<'a, T, E, P> {
    config: &'a Config,
    transport: &'a T,
    editor: &'a mut E,
    prompt: &'a mut P,
}

impl<'a, T, E, P> IssueOperations<'a, T, E, P>
where
    T: Transport,
    E: Editor,
    P: Prompt,
{
    pub fn new(config: &'a Config, transport: &'a T, editor: &'a mut E, prompt: &'a mut P) -> Self {
        IssueOperations {
            config,
            transport,
            editor,
            prompt,
        }
    }

    /// Prompts for a title, takes the body from the editor and POSTs the issue.
    pub async fn create(
        &mut self,
        owner: &str,
        repo: &str,
        out: &mut Option<&mut dyn Write>,
    ) -> Result<Outcome> {
        let title = self.prompt.ask("Issue title: ")?;
        if title.is_empty() {
            return Err(IssueError::EmptyTitle.into());
        }

        let body = match self.editor.acquire_text("", out)? {
            EditorOutcome::Confirmed(body) => body,
            EditorOutcome::Cancelled => return Ok(Outcome::Cancelled),
        };

        let request = self.json_request(
            Method::POST,
            &issues_path(owner, repo),
            &Issue::with_content(&title, &body),
        )?;
        let response = self
            .expect_status(request, 201, format!("create issue in {owner}/{repo}"))
            .await?;

        let created: CreatedIssue =
            serde_json::from_str(&response).context("Failed to parse created issue response")?;
        output::println(&format!("Created issue #{}", created.number), out)?;
        if let Some(url) = created.html_url {
            output::println(&url, out)?;
        }
        Ok(Outcome::Completed)
    }

    /// Prints the issue exactly as returned by the API.
    pub async fn read(
        &mut self,
        owner: &str,
        repo: &str,
        number: u64,
        out: &mut Option<&mut dyn Write>,
    ) -> Result<Outcome> {
        let request = self.request(Method::GET, &issue_path(owner, repo, number));
        let body = self
            .expect_status(request, 200, format!("read issue #{number} in {owner}/{repo}"))
            .await?;
        output::println(&body, out)?;
        Ok(Outcome::Completed)
    }

    /// Fetches the issue, lets the user edit title and body, then PATCHes it.
    ///
    /// A blank title keeps the current one, so the title cannot be cleared.
    pub async fn update(
        &mut self,
        owner: &str,
        repo: &str,
        number: u64,
        out: &mut Option<&mut dyn Write>,
    ) -> Result<Outcome> {
        let path = issue_path(owner, repo, number);

        let request = self.request(Method::GET, &path);
        let response = self
            .expect_status(request, 200, format!("read issue #{number} in {owner}/{repo}"))
            .await?;
        let current: Issue =
            serde_json::from_str(&response).context("Failed to parse issue response")?;
        let current_title = current.title.unwrap_or_default();

        output::println(&format!("Current title: {current_title}"), out)?;
        let new_title = self.prompt.ask("New title (leave blank to keep): ")?;
        let title = if new_title.is_empty() {
            current_title
        } else {
            new_title
        };

        let body = match self
            .editor
            .acquire_text(current.body.as_deref().unwrap_or_default(), out)?
        {
            EditorOutcome::Confirmed(body) => body,
            EditorOutcome::Cancelled => return Ok(Outcome::Cancelled),
        };

        let request =
            self.json_request(Method::PATCH, &path, &Issue::with_content(&title, &body))?;
        self.expect_status(
            request,
            200,
            format!("update issue #{number} in {owner}/{repo}"),
        )
        .await?;
        output::println(&format!("Updated issue #{number}"), out)?;
        Ok(Outcome::Completed)
    }

    /// Sets the issue state to closed.
    pub async fn close(
        &mut self,
        owner: &str,
        repo: &str,
        number: u64,
        out: &mut Option<&mut dyn Write>,
    ) -> Result<Outcome> {
        let request = self.json_request(
            Method::PATCH,
            &issue_path(owner, repo, number),
            &Issue::with_state(IssueState::Closed),
        )?;
        self.expect_status(
            request,
            200,
            format!("close issue #{number} in {owner}/{repo}"),
        )
        .await?;
        output::println(&format!("Closed issue #{number}"), out)?;
        Ok(Outcome::Completed)
    }

    fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, format!("{}{path}", self.config.api_url))
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", ACCEPT)
    }

    fn json_request(&self, method: Method, path: &str, issue: &Issue) -> Result<ApiRequest> {
        let body = serde_json::to_string(issue).context("Failed to serialize issue")?;
        Ok(self
            .request(method, path)
            .header("Content-Type", "application/json")
            .body(body))
    }

    /// Sends the request and returns the response body if the status matches.
    async fn expect_status(
        &self,
        request: ApiRequest,
        expected: u16,
        action: String,
    ) -> Result<String> {
        let response = self.transport.send(request).await?;
        if response.status != expected {
            return Err(IssueError::api(action, response.status, response.body).into());
        }
        Ok(response.body)
    }
}
