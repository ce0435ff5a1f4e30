//! GitHub API types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub Pull Request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number.
    pub number: u64,

    /// PR title.
    pub title: String,

    /// PR body/description.
    pub body: Option<String>,

    /// PR state.
    pub state: PullRequestState,

    /// Whether this is a draft PR.
    pub draft: bool,

    /// Head branch and commit.
    pub head: BranchRef,

    /// Base branch and commit.
    pub base: BranchRef,

    /// PR URL.
    pub html_url: String,

    /// Names of the labels attached to the PR.
    pub labels: Vec<String>,

    /// Title of the milestone, if any.
    pub milestone: Option<String>,

    /// Whether the PR is mergeable (None if GitHub is still computing).
    pub mergeable: Option<bool>,

    /// The mergeable state (e.g., "clean", "dirty", "blocked", "behind").
    pub mergeable_state: Option<String>,
}

/// One side of a pull request: the branch name and the commit it pointed at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name without the `refs/heads/` prefix.
    pub branch: String,

    /// Commit SHA.
    pub sha: String,
}

/// State of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    /// PR is open.
    Open,
    /// PR was closed without merging.
    Closed,
    /// PR was merged.
    Merged,
}

// === Git data ===

/// Name, email and timestamp recorded in a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A commit object from the git database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommit {
    /// Commit SHA.
    pub sha: String,

    /// Tree SHA.
    pub tree: String,

    /// Parent commit SHAs, in order.
    pub parents: Vec<String>,

    pub author: Option<GitUser>,
    pub committer: Option<GitUser>,
    pub message: String,
}

/// Request to create a commit object.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,

    /// Defaults to the authenticated user when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<GitUser>,

    /// Defaults to the author when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<GitUser>,
}

/// A git reference and the object it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    /// Fully qualified name, e.g. `refs/heads/main`.
    pub name: String,

    /// SHA of the referenced object.
    pub sha: String,
}

/// Result of comparing two commits.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// SHA of the best common ancestor.
    pub merge_base: String,

    /// `ahead`, `behind`, `diverged` or `identical`.
    pub status: String,

    pub ahead_by: u64,
    pub behind_by: u64,

    /// Commits reachable from head but not from base, oldest first.
    pub commits: Vec<GitCommit>,
}

/// Outcome of a server-side merge of a commit into a branch.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// A merge commit was created on the base branch.
    Merged(GitCommit),

    /// The head was already contained in the base; nothing changed.
    NothingToMerge,
}

// === Commit statuses ===

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
}

/// Request to create a commit status.
#[derive(Debug, Clone, Serialize)]
pub struct CreateStatus {
    pub state: StatusState,

    pub context: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}

impl CreateStatus {
    /// GitHub rejects descriptions longer than this.
    pub const MAX_DESCRIPTION_CHARS: usize = 140;

    /// Truncate the description to what the API accepts.
    #[must_use]
    pub fn truncated(mut self) -> Self {
        if let Some(desc) = &self.description
            && desc.chars().count() > Self::MAX_DESCRIPTION_CHARS
        {
            self.description = Some(desc.chars().take(Self::MAX_DESCRIPTION_CHARS).collect());
        }
        self
    }
}

/// A commit status as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    pub id: u64,
    pub state: StatusState,
    pub context: String,
    pub description: Option<String>,
    pub target_url: Option<String>,
}

// === Checks ===

/// A check suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSuite {
    pub id: u64,
    pub head_branch: Option<String>,
    pub head_sha: String,
}

/// A CI check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRun {
    /// Check run ID.
    pub id: u64,

    /// Check name.
    pub name: String,

    /// Commit the run reports on.
    pub head_sha: String,

    /// Check status.
    pub status: CheckStatus,

    /// URL to view check details.
    pub details_url: Option<String>,
}

/// Status of a CI check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check is queued.
    Queued,
    /// Check is in progress.
    InProgress,
    /// Check completed successfully.
    Success,
    /// Check failed.
    Failure,
    /// Check was skipped.
    Skipped,
    /// Check was cancelled.
    Cancelled,
}

impl CheckStatus {
    /// Map the API's `status`/`conclusion` pair onto a single value.
    #[must_use]
    pub fn from_api(status: &str, conclusion: Option<&str>) -> Self {
        match (status, conclusion) {
            ("queued", _) => Self::Queued,
            ("in_progress", _) => Self::InProgress,
            ("completed", Some("success" | "neutral")) => Self::Success,
            ("completed", Some("skipped")) => Self::Skipped,
            ("completed", Some("cancelled")) => Self::Cancelled,
            // Any other status (failure, timed_out, action_required, etc.) treated as failure
            _ => Self::Failure,
        }
    }

    /// Check if this status indicates success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::Skipped)
    }

    /// Check if this status indicates failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Check if this status indicates the check is still running.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }
}

/// Lifecycle status written when creating or updating a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
}

/// Final conclusion of a completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
}

/// Rendered output attached to a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Request to create a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCheckRun {
    pub name: String,
    pub head_sha: String,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Request to update a check run.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCheckRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<CheckConclusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<CheckRunOutput>,
}

// === Merging ===

/// Method used to merge a pull request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Create a merge commit.
    #[default]
    Merge,
    /// Squash all commits into one.
    Squash,
    /// Rebase commits onto base.
    Rebase,
}

impl std::str::FromStr for MergeMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "squash" => Ok(Self::Squash),
            "rebase" => Ok(Self::Rebase),
            _ => Err(format!(
                "invalid merge method: {s}. Use merge, squash, or rebase."
            )),
        }
    }
}

/// Request to merge a pull request.
#[derive(Debug, Serialize)]
pub struct MergePullRequest {
    /// Commit title (for squash/merge).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_title: Option<String>,

    /// Commit message (for squash/merge).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,

    /// Merge method.
    pub merge_method: MergeMethod,
}

/// Result of merging a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeResult {
    /// SHA of the merge commit.
    pub sha: String,

    /// Whether the merge was successful.
    pub merged: bool,

    /// Message from the API.
    pub message: String,
}

// === Comments ===

/// A comment on an issue or pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    /// Comment ID.
    pub id: u64,

    /// Comment body.
    pub body: Option<String>,
}

/// Request to create an issue/PR comment.
#[derive(Debug, Serialize)]
pub struct CreateComment {
    /// Comment body.
    pub body: String,
}
