//! Mock implementations for testing services.
//!
//! `MockGitHub` implements `GitHubApi` over in-memory state and records the
//! writes services make, so service logic can be tested without HTTP.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use prflow_github::{
    BranchRef, CheckRun, CheckStatus, CheckSuite, CommitStatus, Comparison, CreateCheckRun,
    CreateComment, CreateCommit, CreateStatus, Error, GitCommit, GitHubApi, GitRef, IssueComment,
    MergeMethod, MergeOutcome, MergePullRequest, MergeResult, PullRequest, PullRequestState,
    Repository, Result, StatusState, UpdateCheckRun,
};

/// A pull request on `feature/widgets` targeting `main`.
pub fn pr(number: u64) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR {number}"),
        body: None,
        state: PullRequestState::Open,
        draft: false,
        head: BranchRef {
            branch: "feature/widgets".into(),
            sha: format!("head{number:036}"),
        },
        base: BranchRef {
            branch: "main".into(),
            sha: format!("base{number:036}"),
        },
        html_url: format!("https://github.com/octo/widgets/pull/{number}"),
        labels: vec![],
        milestone: None,
        mergeable: Some(true),
        mergeable_state: Some("clean".into()),
    }
}

/// The `octo/widgets` repository.
pub fn repository() -> Repository {
    Repository {
        owner: "octo".into(),
        name: "widgets".into(),
    }
}

pub fn status(context: &str, state: StatusState) -> CommitStatus {
    CommitStatus {
        id: 1,
        state,
        context: context.into(),
        description: None,
        target_url: None,
    }
}

pub fn check_run(id: u64, name: &str) -> CheckRun {
    CheckRun {
        id,
        name: name.into(),
        head_sha: "abc".into(),
        status: CheckStatus::Queued,
        details_url: None,
    }
}

fn not_mocked(what: &str) -> Error {
    Error::ApiError {
        status: 501,
        message: format!("{what} is not mocked"),
    }
}

#[derive(Default)]
struct State {
    prs: HashMap<u64, PullRequest>,
    required_contexts: Vec<String>,
    statuses: Vec<CommitStatus>,
    suites: Vec<CheckSuite>,
    unfiltered_suites: Vec<CheckSuite>,
    create_suite_status: Option<u16>,
    runs: Vec<CheckRun>,
    merge_status: Option<u16>,
    comment_status: Option<u16>,
    failing_status_states: Vec<StatusState>,
    next_id: u64,

    fetched_prs: Vec<u64>,
    created_statuses: Vec<(String, CreateStatus)>,
    created_suites: Vec<String>,
    rerequested: Vec<u64>,
    created_runs: Vec<CreateCheckRun>,
    updated_runs: Vec<(u64, UpdateCheckRun)>,
    merges: Vec<(u64, MergeMethod)>,
    comments: Vec<(u64, String)>,
}

/// Mock implementation of `GitHubApi` for testing.
#[derive(Default)]
pub struct MockGitHub {
    state: Mutex<State>,
}

#[allow(clippy::unwrap_used)]
impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut *self.state.lock().unwrap());
        self
    }

    pub fn with_pr(self, pr: PullRequest) -> Self {
        self.with(|s| {
            s.prs.insert(pr.number, pr);
        })
    }

    pub fn with_required_contexts(self, contexts: &[&str]) -> Self {
        self.with(|s| s.required_contexts = contexts.iter().map(ToString::to_string).collect())
    }

    /// Statuses returned by `list_statuses`, newest first.
    pub fn with_statuses(self, statuses: Vec<CommitStatus>) -> Self {
        self.with(|s| s.statuses = statuses)
    }

    pub fn with_suite(self, id: u64, head_sha: &str) -> Self {
        self.with(|s| {
            s.suites.push(CheckSuite {
                id,
                head_branch: None,
                head_sha: head_sha.into(),
            });
        })
    }

    /// A suite only returned when listing without a check name filter.
    pub fn with_unfiltered_suite(self, id: u64, head_sha: &str) -> Self {
        self.with(|s| {
            s.unfiltered_suites.push(CheckSuite {
                id,
                head_branch: None,
                head_sha: head_sha.into(),
            });
        })
    }

    /// Make `create_check_suite` fail with this HTTP status.
    pub fn with_create_suite_failure(self, status: u16) -> Self {
        self.with(|s| s.create_suite_status = Some(status))
    }

    pub fn with_run(self, run: CheckRun) -> Self {
        self.with(|s| s.runs.push(run))
    }

    /// Make `merge_pr` fail with this HTTP status.
    pub fn with_merge_failure(self, status: u16) -> Self {
        self.with(|s| s.merge_status = Some(status))
    }

    /// Make `create_issue_comment` fail with this HTTP status.
    pub fn with_comment_failure(self, status: u16) -> Self {
        self.with(|s| s.comment_status = Some(status))
    }

    /// Reject commit statuses in `state` with a 403.
    pub fn with_status_failure(self, state: StatusState) -> Self {
        self.with(|s| s.failing_status_states.push(state))
    }

    pub fn fetched_prs(&self) -> Vec<u64> {
        self.state.lock().unwrap().fetched_prs.clone()
    }

    pub fn created_statuses(&self) -> Vec<(String, CreateStatus)> {
        self.state.lock().unwrap().created_statuses.clone()
    }

    pub fn created_suites(&self) -> Vec<String> {
        self.state.lock().unwrap().created_suites.clone()
    }

    pub fn rerequested(&self) -> Vec<u64> {
        self.state.lock().unwrap().rerequested.clone()
    }

    pub fn created_runs(&self) -> Vec<CreateCheckRun> {
        self.state.lock().unwrap().created_runs.clone()
    }

    pub fn updated_runs(&self) -> Vec<(u64, UpdateCheckRun)> {
        self.state.lock().unwrap().updated_runs.clone()
    }

    pub fn merges(&self) -> Vec<(u64, MergeMethod)> {
        self.state.lock().unwrap().merges.clone()
    }

    pub fn comments(&self) -> Vec<(u64, String)> {
        self.state.lock().unwrap().comments.clone()
    }

    fn next_id(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        1000 + state.next_id
    }
}

#[allow(clippy::unwrap_used)]
impl GitHubApi for MockGitHub {
    async fn get_pr(&self, _owner: &str, _repo: &str, number: u64) -> Result<PullRequest> {
        let mut state = self.state.lock().unwrap();
        state.fetched_prs.push(number);
        state.prs.get(&number).cloned().ok_or(Error::ApiError {
            status: 404,
            message: "Not Found".into(),
        })
    }

    async fn merge_pr(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        merge: MergePullRequest,
    ) -> Result<MergeResult> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.merge_status {
            return Err(Error::ApiError {
                status,
                message: "Pull Request is not mergeable".into(),
            });
        }
        state.merges.push((number, merge.merge_method));
        Ok(MergeResult {
            sha: format!("merged{number}"),
            merged: true,
            message: "Pull Request successfully merged".into(),
        })
    }

    async fn get_ref(&self, _owner: &str, _repo: &str, _branch: &str) -> Result<GitRef> {
        Err(not_mocked("get_ref"))
    }

    async fn create_ref(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
        _sha: &str,
    ) -> Result<GitRef> {
        Err(not_mocked("create_ref"))
    }

    async fn update_ref(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
        _sha: &str,
        _force: bool,
    ) -> Result<GitRef> {
        Err(not_mocked("update_ref"))
    }

    async fn delete_ref(&self, _owner: &str, _repo: &str, _branch: &str) -> Result<()> {
        Err(not_mocked("delete_ref"))
    }

    async fn get_commit(&self, _owner: &str, _repo: &str, _sha: &str) -> Result<GitCommit> {
        Err(not_mocked("get_commit"))
    }

    async fn create_commit(
        &self,
        _owner: &str,
        _repo: &str,
        _commit: CreateCommit,
    ) -> Result<GitCommit> {
        Err(not_mocked("create_commit"))
    }

    async fn compare_commits(
        &self,
        _owner: &str,
        _repo: &str,
        _base: &str,
        _head: &str,
    ) -> Result<Comparison> {
        Err(not_mocked("compare_commits"))
    }

    async fn merge_branches(
        &self,
        _owner: &str,
        _repo: &str,
        _base: &str,
        _head: &str,
        _message: Option<&str>,
    ) -> Result<MergeOutcome> {
        Err(not_mocked("merge_branches"))
    }

    async fn create_status(
        &self,
        _owner: &str,
        _repo: &str,
        sha: &str,
        status: CreateStatus,
    ) -> Result<CommitStatus> {
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        if state.failing_status_states.contains(&status.state) {
            return Err(Error::ApiError {
                status: 403,
                message: "Resource not accessible by integration".into(),
            });
        }
        state.created_statuses.push((sha.to_string(), status.clone()));
        Ok(CommitStatus {
            id,
            state: status.state,
            context: status.context,
            description: status.description,
            target_url: status.target_url,
        })
    }

    async fn list_statuses(
        &self,
        _owner: &str,
        _repo: &str,
        _reference: &str,
    ) -> Result<Vec<CommitStatus>> {
        Ok(self.state.lock().unwrap().statuses.clone())
    }

    async fn required_status_contexts(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
    ) -> Result<Vec<String>> {
        Ok(self.state.lock().unwrap().required_contexts.clone())
    }

    async fn list_check_suites(
        &self,
        _owner: &str,
        _repo: &str,
        sha: &str,
        check_name: Option<&str>,
    ) -> Result<Vec<CheckSuite>> {
        let state = self.state.lock().unwrap();
        let unfiltered: &[CheckSuite] = if check_name.is_none() {
            state.unfiltered_suites.as_slice()
        } else {
            &[]
        };
        Ok(state
            .suites
            .iter()
            .chain(unfiltered)
            .filter(|s| s.head_sha == sha)
            .cloned()
            .collect())
    }

    async fn create_check_suite(
        &self,
        _owner: &str,
        _repo: &str,
        head_sha: &str,
    ) -> Result<CheckSuite> {
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.create_suite_status {
            return Err(Error::ApiError {
                status,
                message: "Validation Failed".into(),
            });
        }
        state.created_suites.push(head_sha.to_string());
        let suite = CheckSuite {
            id,
            head_branch: None,
            head_sha: head_sha.to_string(),
        };
        state.suites.push(suite.clone());
        Ok(suite)
    }

    async fn rerequest_check_suite(&self, _owner: &str, _repo: &str, suite_id: u64) -> Result<()> {
        self.state.lock().unwrap().rerequested.push(suite_id);
        Ok(())
    }

    async fn list_check_runs_in_suite(
        &self,
        _owner: &str,
        _repo: &str,
        _suite_id: u64,
        check_name: Option<&str>,
    ) -> Result<Vec<CheckRun>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .runs
            .iter()
            .filter(|r| check_name.is_none_or(|n| r.name == n))
            .cloned()
            .collect())
    }

    async fn create_check_run(
        &self,
        _owner: &str,
        _repo: &str,
        run: CreateCheckRun,
    ) -> Result<CheckRun> {
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        state.created_runs.push(run.clone());
        let created = CheckRun {
            id,
            name: run.name,
            head_sha: run.head_sha,
            status: CheckStatus::Queued,
            details_url: None,
        };
        state.runs.push(created.clone());
        Ok(created)
    }

    async fn update_check_run(
        &self,
        _owner: &str,
        _repo: &str,
        run_id: u64,
        update: UpdateCheckRun,
    ) -> Result<CheckRun> {
        let mut state = self.state.lock().unwrap();
        state.updated_runs.push((run_id, update));
        state
            .runs
            .iter()
            .find(|r| r.id == run_id)
            .cloned()
            .ok_or(Error::ApiError {
                status: 404,
                message: "Not Found".into(),
            })
    }

    async fn create_issue_comment(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        comment: CreateComment,
    ) -> Result<IssueComment> {
        let id = self.next_id();
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.comment_status {
            return Err(Error::ApiError {
                status,
                message: "Resource not accessible by integration".into(),
            });
        }
        state.comments.push((number, comment.body.clone()));
        Ok(IssueComment {
            id,
            body: Some(comment.body),
        })
    }
}
