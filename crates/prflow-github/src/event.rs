//! Webhook events delivered to a workflow run.
//!
//! GitHub Actions writes the triggering payload to the file named by
//! `GITHUB_EVENT_PATH` and the event kind to `GITHUB_EVENT_NAME`.

use std::path::Path;

use serde::Deserialize;

use crate::client::ApiPullRequest;
use crate::error::{Error, Result};
use crate::types::PullRequest;

/// Repository an event was delivered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Owner login (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

/// Issue fields carried by `issues` and `issue_comment` payloads.
#[derive(Debug, Clone)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    /// Whether the issue is the conversation of a pull request.
    pub is_pull_request: bool,
}

/// Check run carried by a `check_run` payload.
#[derive(Debug, Clone)]
pub struct CheckRunEvent {
    pub id: u64,
    pub name: String,
    pub head_sha: String,
    /// Pull requests whose head matches the run's commit. Entries only
    /// carry number, head and base.
    pub pull_requests: Vec<PullRequest>,
}

/// Check suite carried by a `check_suite` payload.
#[derive(Debug, Clone)]
pub struct CheckSuiteEvent {
    pub id: u64,
    pub head_sha: String,
    pub head_branch: Option<String>,
    pub pull_requests: Vec<PullRequest>,
}

/// A webhook event that triggered the current workflow.
#[derive(Debug, Clone)]
pub enum Event {
    PullRequest {
        action: String,
        repository: Repository,
        pull_request: PullRequest,
    },
    Issues {
        action: String,
        repository: Repository,
        issue: Issue,
    },
    IssueComment {
        action: String,
        repository: Repository,
        issue: Issue,
        comment_body: String,
    },
    CheckRun {
        action: String,
        repository: Repository,
        check_run: CheckRunEvent,
    },
    CheckSuite {
        action: String,
        repository: Repository,
        check_suite: CheckSuiteEvent,
    },
    /// Any event kind this tool does not act on.
    Other(String),
}

// === Payload shapes ===

#[derive(Deserialize)]
struct ApiRepository {
    name: String,
    owner: ApiOwner,
}

#[derive(Deserialize)]
struct ApiOwner {
    login: String,
}

impl From<ApiRepository> for Repository {
    fn from(repo: ApiRepository) -> Self {
        Self {
            owner: repo.owner.login,
            name: repo.name,
        }
    }
}

#[derive(Deserialize)]
struct ApiIssue {
    number: u64,
    #[serde(default)]
    title: String,
    body: Option<String>,
    pull_request: Option<serde_json::Value>,
}

impl From<ApiIssue> for Issue {
    fn from(issue: ApiIssue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            body: issue.body,
            is_pull_request: issue.pull_request.is_some(),
        }
    }
}

#[derive(Deserialize)]
struct ApiComment {
    #[serde(default)]
    body: String,
}

#[derive(Deserialize)]
struct ApiCheckRunEvent {
    id: u64,
    name: String,
    head_sha: String,
    #[serde(default)]
    pull_requests: Vec<ApiPullRequest>,
}

#[derive(Deserialize)]
struct ApiCheckSuiteEvent {
    id: u64,
    head_sha: String,
    head_branch: Option<String>,
    #[serde(default)]
    pull_requests: Vec<ApiPullRequest>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    action: String,
    repository: ApiRepository,
    pull_request: ApiPullRequest,
}

#[derive(Deserialize)]
struct IssuesPayload {
    action: String,
    repository: ApiRepository,
    issue: ApiIssue,
}

#[derive(Deserialize)]
struct IssueCommentPayload {
    action: String,
    repository: ApiRepository,
    issue: ApiIssue,
    comment: ApiComment,
}

#[derive(Deserialize)]
struct CheckRunPayload {
    action: String,
    repository: ApiRepository,
    check_run: ApiCheckRunEvent,
}

#[derive(Deserialize)]
struct CheckSuitePayload {
    action: String,
    repository: ApiRepository,
    check_suite: ApiCheckSuiteEvent,
}

fn into_pull_requests(prs: Vec<ApiPullRequest>) -> Vec<PullRequest> {
    prs.into_iter()
        .map(ApiPullRequest::into_pull_request)
        .collect()
}

impl Event {
    /// Parse a payload for the named event kind.
    ///
    /// # Errors
    /// Returns error if the payload is not valid JSON for that kind.
    pub fn parse(name: &str, payload: &[u8]) -> Result<Self> {
        let event = match name {
            "pull_request" | "pull_request_target" => {
                let p: PullRequestPayload = serde_json::from_slice(payload)?;
                Self::PullRequest {
                    action: p.action,
                    repository: p.repository.into(),
                    pull_request: p.pull_request.into_pull_request(),
                }
            }
            "issues" => {
                let p: IssuesPayload = serde_json::from_slice(payload)?;
                Self::Issues {
                    action: p.action,
                    repository: p.repository.into(),
                    issue: p.issue.into(),
                }
            }
            "issue_comment" => {
                let p: IssueCommentPayload = serde_json::from_slice(payload)?;
                Self::IssueComment {
                    action: p.action,
                    repository: p.repository.into(),
                    issue: p.issue.into(),
                    comment_body: p.comment.body,
                }
            }
            "check_run" => {
                let p: CheckRunPayload = serde_json::from_slice(payload)?;
                Self::CheckRun {
                    action: p.action,
                    repository: p.repository.into(),
                    check_run: CheckRunEvent {
                        id: p.check_run.id,
                        name: p.check_run.name,
                        head_sha: p.check_run.head_sha,
                        pull_requests: into_pull_requests(p.check_run.pull_requests),
                    },
                }
            }
            "check_suite" => {
                let p: CheckSuitePayload = serde_json::from_slice(payload)?;
                Self::CheckSuite {
                    action: p.action,
                    repository: p.repository.into(),
                    check_suite: CheckSuiteEvent {
                        id: p.check_suite.id,
                        head_sha: p.check_suite.head_sha,
                        head_branch: p.check_suite.head_branch,
                        pull_requests: into_pull_requests(p.check_suite.pull_requests),
                    },
                }
            }
            other => Self::Other(other.to_string()),
        };

        tracing::debug!(event = event.name(), "parsed webhook event");
        Ok(event)
    }

    /// Read an event payload from disk.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(name: &str, path: &Path) -> Result<Self> {
        let payload = std::fs::read(path)?;
        Self::parse(name, &payload)
    }

    /// Load the event of the current workflow run.
    ///
    /// # Errors
    /// Returns [`Error::MissingEnv`] outside of a workflow run, or a read or
    /// parse error for the payload.
    pub fn from_env() -> Result<Self> {
        let name = std::env::var("GITHUB_EVENT_NAME")
            .map_err(|_| Error::MissingEnv("GITHUB_EVENT_NAME"))?;
        let path = std::env::var("GITHUB_EVENT_PATH")
            .map_err(|_| Error::MissingEnv("GITHUB_EVENT_PATH"))?;

        Self::from_file(&name, Path::new(&path))
    }

    /// Event kind as GitHub names it.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PullRequest { .. } => "pull_request",
            Self::Issues { .. } => "issues",
            Self::IssueComment { .. } => "issue_comment",
            Self::CheckRun { .. } => "check_run",
            Self::CheckSuite { .. } => "check_suite",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Repository the event was delivered for, if the kind is understood.
    #[must_use]
    pub const fn repository(&self) -> Option<&Repository> {
        match self {
            Self::PullRequest { repository, .. }
            | Self::Issues { repository, .. }
            | Self::IssueComment { repository, .. }
            | Self::CheckRun { repository, .. }
            | Self::CheckSuite { repository, .. } => Some(repository),
            Self::Other(_) => None,
        }
    }

    /// Number of the issue or pull request the event is about, if any.
    ///
    /// For check events this is the first associated pull request.
    #[must_use]
    pub fn issue_number(&self) -> Option<u64> {
        match self {
            Self::PullRequest { pull_request, .. } => Some(pull_request.number),
            Self::Issues { issue, .. } | Self::IssueComment { issue, .. } => Some(issue.number),
            Self::CheckRun { check_run, .. } => check_run.pull_requests.first().map(|p| p.number),
            Self::CheckSuite { check_suite, .. } => {
                check_suite.pull_requests.first().map(|p| p.number)
            }
            Self::Other(_) => None,
        }
    }
}
