//! Trait abstractions for GitHub API operations.
//!
//! This module defines the `GitHubApi` trait which abstracts GitHub API operations,
//! enabling dependency injection and testability.

use crate::{
    CheckRun, CheckSuite, CommitStatus, Comparison, CreateCheckRun, CreateComment, CreateCommit,
    CreateStatus, GitCommit, GitRef, IssueComment, MergeOutcome, MergePullRequest, MergeResult,
    PullRequest, Result, UpdateCheckRun,
};

/// Trait for GitHub API operations.
///
/// This trait abstracts GitHub API calls, allowing for:
/// - Dependency injection in commands/services
/// - Mock implementations for testing
///
/// All methods take `owner` and `repo` as parameters to support
/// operations across different repositories. Branch arguments are bare
/// names (`main`), never `refs/heads/main`.
pub trait GitHubApi: Send + Sync {
    // === PR Operations ===

    /// Get a pull request by number.
    fn get_pr(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> impl std::future::Future<Output = Result<PullRequest>> + Send;

    /// Merge a pull request.
    fn merge_pr(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        merge: MergePullRequest,
    ) -> impl std::future::Future<Output = Result<MergeResult>> + Send;

    // === Git Data ===

    /// Read the branch ref `refs/heads/{branch}`.
    fn get_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> impl std::future::Future<Output = Result<GitRef>> + Send;

    /// Create the branch ref `refs/heads/{branch}` at `sha`.
    fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> impl std::future::Future<Output = Result<GitRef>> + Send;

    /// Move the branch ref to `sha`, allowing non-fast-forward moves when `force` is set.
    fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> impl std::future::Future<Output = Result<GitRef>> + Send;

    /// Delete a branch ref.
    fn delete_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Read a commit object.
    fn get_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> impl std::future::Future<Output = Result<GitCommit>> + Send;

    /// Create a commit object. Does not move any ref.
    fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: CreateCommit,
    ) -> impl std::future::Future<Output = Result<GitCommit>> + Send;

    // === Repository Operations ===

    /// Compare two commits (`base...head`).
    fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> impl std::future::Future<Output = Result<Comparison>> + Send;

    /// Merge `head` (a SHA or branch) into the branch `base` on the server.
    fn merge_branches(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        message: Option<&str>,
    ) -> impl std::future::Future<Output = Result<MergeOutcome>> + Send;

    // === Commit Statuses ===

    /// Create a status on a commit.
    fn create_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        status: CreateStatus,
    ) -> impl std::future::Future<Output = Result<CommitStatus>> + Send;

    /// List statuses for a ref or SHA, newest first.
    fn list_statuses(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CommitStatus>>> + Send;

    /// Status contexts required by the branch's protection rules.
    ///
    /// An unprotected branch yields an empty list.
    fn required_status_contexts(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    // === Checks ===

    /// List check suites for a commit, optionally filtered by check name.
    fn list_check_suites(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        check_name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<CheckSuite>>> + Send;

    /// Create a check suite for a commit.
    fn create_check_suite(
        &self,
        owner: &str,
        repo: &str,
        head_sha: &str,
    ) -> impl std::future::Future<Output = Result<CheckSuite>> + Send;

    /// Ask GitHub to re-run a check suite.
    fn rerequest_check_suite(
        &self,
        owner: &str,
        repo: &str,
        suite_id: u64,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// List check runs in a suite, optionally filtered by name.
    fn list_check_runs_in_suite(
        &self,
        owner: &str,
        repo: &str,
        suite_id: u64,
        check_name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<CheckRun>>> + Send;

    /// Create a check run.
    fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        run: CreateCheckRun,
    ) -> impl std::future::Future<Output = Result<CheckRun>> + Send;

    /// Update a check run.
    fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
        update: UpdateCheckRun,
    ) -> impl std::future::Future<Output = Result<CheckRun>> + Send;

    // === Comment Operations ===

    /// Create a comment on an issue or pull request.
    fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: CreateComment,
    ) -> impl std::future::Future<Output = Result<IssueComment>> + Send;
}
