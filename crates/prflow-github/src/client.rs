//! GitHub API client.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::auth::{Auth, TokenType};
use crate::error::{Error, Result};
use crate::traits::GitHubApi;
use crate::types::{
    BranchRef, CheckRun, CheckStatus, CheckSuite, CommitStatus, Comparison, CreateCheckRun,
    CreateComment, CreateCommit, CreateStatus, GitCommit, GitRef, GitUser, IssueComment,
    MergeOutcome, MergePullRequest, MergeResult, PullRequest, PullRequestState, UpdateCheckRun,
};

// === Internal API response types (shared across methods and webhook payloads) ===

/// Internal representation of a PR from the GitHub API.
///
/// Webhook payloads embed the same object, sometimes trimmed down (check run
/// payloads only carry number, head and base), so most fields default.
#[derive(serde::Deserialize)]
pub(crate) struct ApiPullRequest {
    number: u64,
    #[serde(default)]
    title: String,
    body: Option<String>,
    #[serde(default = "default_pr_state")]
    state: String,
    /// Whether the PR was merged (GitHub returns state="closed" + merged=true for merged PRs).
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    html_url: String,
    head: ApiBranch,
    base: ApiBranch,
    #[serde(default)]
    labels: Vec<ApiLabel>,
    milestone: Option<ApiMilestone>,
    /// Whether the PR is mergeable (None if GitHub is still computing).
    mergeable: Option<bool>,
    /// The mergeable state (e.g., "clean", "dirty", "blocked", "behind").
    mergeable_state: Option<String>,
}

fn default_pr_state() -> String {
    "open".into()
}

/// Internal representation of a branch ref from the GitHub API.
#[derive(serde::Deserialize)]
struct ApiBranch {
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(default)]
    sha: String,
}

#[derive(serde::Deserialize)]
struct ApiLabel {
    name: String,
}

#[derive(serde::Deserialize)]
struct ApiMilestone {
    title: String,
}

impl ApiPullRequest {
    /// Convert API response to domain type, parsing state string.
    pub(crate) fn into_pull_request(self) -> PullRequest {
        // GitHub API returns state="closed" + merged=true for merged PRs
        let state = if self.merged {
            PullRequestState::Merged
        } else {
            match self.state.as_str() {
                "open" => PullRequestState::Open,
                _ => PullRequestState::Closed,
            }
        };

        PullRequest {
            number: self.number,
            title: self.title,
            body: self.body,
            state,
            draft: self.draft,
            head: BranchRef {
                branch: self.head.ref_name,
                sha: self.head.sha,
            },
            base: BranchRef {
                branch: self.base.ref_name,
                sha: self.base.sha,
            },
            html_url: self.html_url,
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            milestone: self.milestone.map(|m| m.title),
            mergeable: self.mergeable,
            mergeable_state: self.mergeable_state,
        }
    }
}

#[derive(serde::Deserialize)]
struct ApiSha {
    sha: String,
}

/// Commit object from the git database endpoints (`/git/commits`).
#[derive(serde::Deserialize)]
struct ApiGitCommit {
    sha: String,
    tree: ApiSha,
    #[serde(default)]
    parents: Vec<ApiSha>,
    author: Option<GitUser>,
    committer: Option<GitUser>,
    #[serde(default)]
    message: String,
}

impl ApiGitCommit {
    fn into_git_commit(self) -> GitCommit {
        GitCommit {
            sha: self.sha,
            tree: self.tree.sha,
            parents: self.parents.into_iter().map(|p| p.sha).collect(),
            author: self.author,
            committer: self.committer,
            message: self.message,
        }
    }
}

/// Commit object from the repository endpoints (`/compare`, `/merges`),
/// which nest the git data under `commit`.
#[derive(serde::Deserialize)]
struct ApiRepoCommit {
    sha: String,
    commit: ApiRepoCommitData,
    #[serde(default)]
    parents: Vec<ApiSha>,
}

#[derive(serde::Deserialize)]
struct ApiRepoCommitData {
    tree: ApiSha,
    author: Option<GitUser>,
    committer: Option<GitUser>,
    #[serde(default)]
    message: String,
}

impl ApiRepoCommit {
    fn into_git_commit(self) -> GitCommit {
        GitCommit {
            sha: self.sha,
            tree: self.commit.tree.sha,
            parents: self.parents.into_iter().map(|p| p.sha).collect(),
            author: self.commit.author,
            committer: self.commit.committer,
            message: self.commit.message,
        }
    }
}

#[derive(serde::Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    name: String,
    object: ApiSha,
}

impl ApiRef {
    fn into_git_ref(self) -> GitRef {
        GitRef {
            name: self.name,
            sha: self.object.sha,
        }
    }
}

#[derive(serde::Deserialize)]
struct ApiCheckRun {
    id: u64,
    name: String,
    #[serde(default)]
    head_sha: String,
    status: String,
    conclusion: Option<String>,
    details_url: Option<String>,
}

impl ApiCheckRun {
    fn into_check_run(self) -> CheckRun {
        CheckRun {
            id: self.id,
            status: CheckStatus::from_api(&self.status, self.conclusion.as_deref()),
            name: self.name,
            head_sha: self.head_sha,
            details_url: self.details_url,
        }
    }
}

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: SecretString,
    token_type: TokenType,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Commits requested per page of a comparison.
    pub const COMPARE_PAGE_SIZE: usize = 100;

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn new(auth: &Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        let token = auth.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("prflow"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            token_type: TokenType::from_env(),
        })
    }

    /// Override the authorization scheme read from `GITHUB_TOKEN_TYPE`.
    #[must_use]
    pub const fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach credentials, send, and turn non-success statuses into errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .header(
                AUTHORIZATION,
                format!(
                    "{} {}",
                    self.token_type.scheme(),
                    self.token.expose_secret()
                ),
            )
            .send()
            .await?;

        tracing::debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "github response"
        );

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// Make a GET request with query parameters.
    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .send(self.client.get(self.url(path)).query(query))
            .await?;
        Ok(response.json().await?)
    }

    /// Make a POST request.
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    /// Make a PATCH request.
    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send(self.client.patch(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    /// Make a PUT request.
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.client.put(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    /// Make a DELETE request.
    async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    // === PR Operations ===

    /// Get a pull request by number.
    ///
    /// # Errors
    /// Returns error if PR not found or API call fails.
    pub async fn get_pr(&self, owner: &str, repo: &str, number: u64) -> Result<PullRequest> {
        let api_pr: ApiPullRequest = self
            .get(&format!("/repos/{owner}/{repo}/pulls/{number}"))
            .await?;

        Ok(api_pr.into_pull_request())
    }

    /// Merge a pull request.
    ///
    /// # Errors
    /// Returns error if merge fails.
    pub async fn merge_pr(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        merge: MergePullRequest,
    ) -> Result<MergeResult> {
        self.put(
            &format!("/repos/{owner}/{repo}/pulls/{number}/merge"),
            &merge,
        )
        .await
    }

    // === Git Data ===

    /// Read a branch ref.
    ///
    /// # Errors
    /// Returns [`Error::RefNotFound`] if the branch does not exist.
    pub async fn get_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<GitRef> {
        let result: Result<ApiRef> = self
            .get(&format!("/repos/{owner}/{repo}/git/ref/heads/{branch}"))
            .await;

        match result {
            Ok(api_ref) => Ok(api_ref.into_git_ref()),
            Err(e) if e.is_not_found() => Err(Error::RefNotFound(format!("refs/heads/{branch}"))),
            Err(e) => Err(e),
        }
    }

    /// Create a branch ref.
    ///
    /// # Errors
    /// Returns [`Error::RefAlreadyExists`] if the branch is already taken.
    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef> {
        let full_name = format!("refs/heads/{branch}");
        let body = serde_json::json!({ "ref": full_name, "sha": sha });

        let result: Result<ApiRef> = self
            .post(&format!("/repos/{owner}/{repo}/git/refs"), &body)
            .await;

        match result {
            Ok(api_ref) => Ok(api_ref.into_git_ref()),
            Err(Error::ApiError { status: 422, message }) if message.contains("already exists") => {
                Err(Error::RefAlreadyExists(full_name))
            }
            Err(e) => Err(e),
        }
    }

    /// Move a branch ref.
    ///
    /// # Errors
    /// Returns error if the ref is missing or the update is rejected
    /// (e.g. a non-fast-forward move without `force`).
    pub async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> Result<GitRef> {
        let body = serde_json::json!({ "sha": sha, "force": force });

        let result: Result<ApiRef> = self
            .patch(
                &format!("/repos/{owner}/{repo}/git/refs/heads/{branch}"),
                &body,
            )
            .await;

        match result {
            Ok(api_ref) => Ok(api_ref.into_git_ref()),
            Err(Error::ApiError { status: 422, message })
                if message.contains("does not exist") =>
            {
                Err(Error::RefNotFound(format!("refs/heads/{branch}")))
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a branch ref.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn delete_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<()> {
        self.delete(&format!("/repos/{owner}/{repo}/git/refs/heads/{branch}"))
            .await
    }

    /// Read a commit object.
    ///
    /// # Errors
    /// Returns error if the commit does not exist.
    pub async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<GitCommit> {
        let commit: ApiGitCommit = self
            .get(&format!("/repos/{owner}/{repo}/git/commits/{sha}"))
            .await?;
        Ok(commit.into_git_commit())
    }

    /// Create a commit object.
    ///
    /// # Errors
    /// Returns error if the tree or a parent does not exist.
    pub async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: CreateCommit,
    ) -> Result<GitCommit> {
        let created: ApiGitCommit = self
            .post(&format!("/repos/{owner}/{repo}/git/commits"), &commit)
            .await?;
        Ok(created.into_git_commit())
    }

    // === Repository Operations ===

    /// Compare two commits.
    ///
    /// GitHub pages the commit list; every page is fetched until `ahead_by`
    /// commits are collected or a short page ends the list.
    ///
    /// # Errors
    /// Returns error if either endpoint cannot be resolved.
    pub async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        #[derive(serde::Deserialize)]
        struct Response {
            merge_base_commit: ApiSha,
            status: String,
            #[serde(default)]
            ahead_by: u64,
            #[serde(default)]
            behind_by: u64,
            #[serde(default)]
            commits: Vec<ApiRepoCommit>,
        }

        let path = format!("/repos/{owner}/{repo}/compare/{base}...{head}");
        let per_page = Self::COMPARE_PAGE_SIZE.to_string();
        let mut page = 1_u32;
        let mut commits = Vec::new();

        let summary = loop {
            let page_param = page.to_string();
            let response: Response = self
                .get_with_query(
                    &path,
                    &[("per_page", per_page.as_str()), ("page", page_param.as_str())],
                )
                .await?;

            let listed = response.commits.len();
            commits.extend(
                response
                    .commits
                    .into_iter()
                    .map(ApiRepoCommit::into_git_commit),
            );

            let done = listed < Self::COMPARE_PAGE_SIZE
                || commits.len() as u64 >= response.ahead_by;
            if done {
                break Comparison {
                    merge_base: response.merge_base_commit.sha,
                    status: response.status,
                    ahead_by: response.ahead_by,
                    behind_by: response.behind_by,
                    commits: Vec::new(),
                };
            }
            page += 1;
        };

        tracing::debug!(
            base = base,
            head = head,
            pages = page,
            commits = commits.len(),
            ahead_by = summary.ahead_by,
            "compared commits"
        );

        Ok(Comparison { commits, ..summary })
    }

    /// Merge `head` into the branch `base` on the server.
    ///
    /// # Errors
    /// Returns [`Error::MergeConflict`] when the merge is not clean.
    pub async fn merge_branches(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        message: Option<&str>,
    ) -> Result<MergeOutcome> {
        let mut body = serde_json::json!({ "base": base, "head": head });
        if let Some(message) = message {
            body["commit_message"] = serde_json::Value::from(message);
        }

        let result = self
            .send(
                self.client
                    .post(self.url(&format!("/repos/{owner}/{repo}/merges")))
                    .json(&body),
            )
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => {
                Ok(MergeOutcome::NothingToMerge)
            }
            Ok(response) => {
                let commit: ApiRepoCommit = response.json().await?;
                Ok(MergeOutcome::Merged(commit.into_git_commit()))
            }
            Err(Error::ApiError { status: 409, .. }) => Err(Error::MergeConflict {
                base: base.to_string(),
                head: head.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    // === Commit Statuses ===

    /// Create a status on a commit. Over-long descriptions are truncated.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn create_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        status: CreateStatus,
    ) -> Result<CommitStatus> {
        self.post(
            &format!("/repos/{owner}/{repo}/statuses/{sha}"),
            &status.truncated(),
        )
        .await
    }

    /// List statuses for a ref, newest first.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn list_statuses(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> Result<Vec<CommitStatus>> {
        self.get_with_query(
            &format!("/repos/{owner}/{repo}/commits/{reference}/statuses"),
            &[("per_page", "100")],
        )
        .await
    }

    /// Status contexts required by branch protection; empty when unprotected.
    ///
    /// # Errors
    /// Returns error if the API call fails for any reason other than
    /// missing protection.
    pub async fn required_status_contexts(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<String>> {
        let result = self
            .get(&format!(
                "/repos/{owner}/{repo}/branches/{branch}/protection/required_status_checks/contexts"
            ))
            .await;

        match result {
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            other => other,
        }
    }

    // === Checks ===

    /// List check suites for a commit.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn list_check_suites(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        check_name: Option<&str>,
    ) -> Result<Vec<CheckSuite>> {
        #[derive(serde::Deserialize)]
        struct Response {
            check_suites: Vec<CheckSuite>,
        }

        let query: Vec<(&str, &str)> = check_name.map(|n| ("check_name", n)).into_iter().collect();
        let response: Response = self
            .get_with_query(
                &format!("/repos/{owner}/{repo}/commits/{sha}/check-suites"),
                &query,
            )
            .await?;

        Ok(response.check_suites)
    }

    /// Create a check suite.
    ///
    /// # Errors
    /// Returns error if the API call fails; GitHub answers 422 when a suite
    /// for this app and commit already exists.
    pub async fn create_check_suite(
        &self,
        owner: &str,
        repo: &str,
        head_sha: &str,
    ) -> Result<CheckSuite> {
        self.post(
            &format!("/repos/{owner}/{repo}/check-suites"),
            &serde_json::json!({ "head_sha": head_sha }),
        )
        .await
    }

    /// Re-request a check suite.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn rerequest_check_suite(
        &self,
        owner: &str,
        repo: &str,
        suite_id: u64,
    ) -> Result<()> {
        self.send(self.client.post(self.url(&format!(
            "/repos/{owner}/{repo}/check-suites/{suite_id}/rerequest"
        ))))
        .await?;
        Ok(())
    }

    /// List check runs in a suite.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn list_check_runs_in_suite(
        &self,
        owner: &str,
        repo: &str,
        suite_id: u64,
        check_name: Option<&str>,
    ) -> Result<Vec<CheckRun>> {
        #[derive(serde::Deserialize)]
        struct Response {
            check_runs: Vec<ApiCheckRun>,
        }

        let query: Vec<(&str, &str)> = check_name.map(|n| ("check_name", n)).into_iter().collect();
        let response: Response = self
            .get_with_query(
                &format!("/repos/{owner}/{repo}/check-suites/{suite_id}/check-runs"),
                &query,
            )
            .await?;

        Ok(response
            .check_runs
            .into_iter()
            .map(ApiCheckRun::into_check_run)
            .collect())
    }

    /// Create a check run.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        run: CreateCheckRun,
    ) -> Result<CheckRun> {
        let created: ApiCheckRun = self
            .post(&format!("/repos/{owner}/{repo}/check-runs"), &run)
            .await?;
        Ok(created.into_check_run())
    }

    /// Update a check run.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
        update: UpdateCheckRun,
    ) -> Result<CheckRun> {
        let updated: ApiCheckRun = self
            .patch(
                &format!("/repos/{owner}/{repo}/check-runs/{run_id}"),
                &update,
            )
            .await?;
        Ok(updated.into_check_run())
    }

    // === Comment Operations ===

    /// Create a comment on an issue or pull request.
    ///
    /// # Errors
    /// Returns error if request fails.
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: CreateComment,
    ) -> Result<IssueComment> {
        self.post(
            &format!("/repos/{owner}/{repo}/issues/{number}/comments"),
            &comment,
        )
        .await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Map a non-success response onto an [`Error`].
async fn error_from_response(response: Response) -> Error {
    let status_code = response.status().as_u16();

    match status_code {
        401 => Error::AuthenticationFailed,
        403 if response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|v| v == "0") =>
        {
            Error::RateLimited
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Error::ApiError {
                status: status_code,
                message: text,
            }
        }
    }
}

// === Trait Implementation ===

impl GitHubApi for GitHubClient {
    async fn get_pr(&self, owner: &str, repo: &str, number: u64) -> Result<PullRequest> {
        self.get_pr(owner, repo, number).await
    }

    async fn merge_pr(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        merge: MergePullRequest,
    ) -> Result<MergeResult> {
        self.merge_pr(owner, repo, number, merge).await
    }

    async fn get_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<GitRef> {
        self.get_ref(owner, repo, branch).await
    }

    async fn create_ref(&self, owner: &str, repo: &str, branch: &str, sha: &str) -> Result<GitRef> {
        self.create_ref(owner, repo, branch, sha).await
    }

    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> Result<GitRef> {
        self.update_ref(owner, repo, branch, sha, force).await
    }

    async fn delete_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<()> {
        self.delete_ref(owner, repo, branch).await
    }

    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<GitCommit> {
        self.get_commit(owner, repo, sha).await
    }

    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: CreateCommit,
    ) -> Result<GitCommit> {
        self.create_commit(owner, repo, commit).await
    }

    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        self.compare_commits(owner, repo, base, head).await
    }

    async fn merge_branches(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        message: Option<&str>,
    ) -> Result<MergeOutcome> {
        self.merge_branches(owner, repo, base, head, message).await
    }

    async fn create_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        status: CreateStatus,
    ) -> Result<CommitStatus> {
        self.create_status(owner, repo, sha, status).await
    }

    async fn list_statuses(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
    ) -> Result<Vec<CommitStatus>> {
        self.list_statuses(owner, repo, reference).await
    }

    async fn required_status_contexts(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<String>> {
        self.required_status_contexts(owner, repo, branch).await
    }

    async fn list_check_suites(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        check_name: Option<&str>,
    ) -> Result<Vec<CheckSuite>> {
        self.list_check_suites(owner, repo, sha, check_name).await
    }

    async fn create_check_suite(
        &self,
        owner: &str,
        repo: &str,
        head_sha: &str,
    ) -> Result<CheckSuite> {
        self.create_check_suite(owner, repo, head_sha).await
    }

    async fn rerequest_check_suite(&self, owner: &str, repo: &str, suite_id: u64) -> Result<()> {
        self.rerequest_check_suite(owner, repo, suite_id).await
    }

    async fn list_check_runs_in_suite(
        &self,
        owner: &str,
        repo: &str,
        suite_id: u64,
        check_name: Option<&str>,
    ) -> Result<Vec<CheckRun>> {
        self.list_check_runs_in_suite(owner, repo, suite_id, check_name)
            .await
    }

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        run: CreateCheckRun,
    ) -> Result<CheckRun> {
        self.create_check_run(owner, repo, run).await
    }

    async fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
        update: UpdateCheckRun,
    ) -> Result<CheckRun> {
        self.update_check_run(owner, repo, run_id, update).await
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: CreateComment,
    ) -> Result<IssueComment> {
        self.create_issue_comment(owner, repo, number, comment)
            .await
    }
}
