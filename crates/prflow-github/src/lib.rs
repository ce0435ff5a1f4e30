//! # prflow-github
//!
//! GitHub API integration for prflow: pull requests, the git database,
//! server-side merges, commit statuses, checks, and the webhook event
//! that triggered the current workflow.
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which automatically
//! zeroizes memory when dropped, reducing credential exposure in memory dumps.

mod auth;
mod client;
mod error;
mod event;
pub mod traits;
mod types;

pub use auth::{Auth, TokenType};
pub use client::GitHubClient;
pub use error::{Error, Result};
pub use event::{CheckRunEvent, CheckSuiteEvent, Event, Issue, Repository};
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
pub use traits::GitHubApi;
pub use types::{
    BranchRef, CheckConclusion, CheckRun, CheckRunOutput, CheckStatus, CheckSuite, CommitStatus,
    Comparison, CreateCheckRun, CreateComment, CreateCommit, CreateStatus, GitCommit, GitRef,
    GitUser, IssueComment, MergeMethod, MergeOutcome, MergePullRequest, MergeResult, PullRequest,
    PullRequestState, RunStatus, StatusState, UpdateCheckRun,
};
