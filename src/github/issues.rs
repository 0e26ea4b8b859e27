use serde::{Deserialize, Serialize};

/// Issue fields exchanged with the issues API.
///
/// Absent fields are left out of the serialized body so a PATCH only touches
/// what was set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Issue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl Issue {
    /// Title and body payload; empty strings are left out.
    pub fn with_content(title: &str, body: &str) -> Self {
        Issue {
            title: non_empty(title),
            body: non_empty(body),
            state: None,
        }
    }

    /// Payload that only changes the state.
    pub fn with_state(state: IssueState) -> Self {
        Issue {
            state: Some(state),
            ..Issue::default()
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Part of the creation response the client reports back
#[derive(Deserialize, Debug, PartialEq)]
pub struct CreatedIssue {
    pub number: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Path of the issue collection of a repository
pub fn issues_path(owner: &str, repo: &str) -> String {
    format!("/repos/{owner}/{repo}/issues")
}

/// Path of a single issue
pub fn issue_path(owner: &str, repo: &str, number: u64) -> String {
    format!("{}/{number}", issues_path(owner, repo))
}
