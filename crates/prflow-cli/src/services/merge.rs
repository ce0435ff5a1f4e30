//! Merge service for merging pull requests once their statuses pass.
//!
//! This service encapsulates the business logic for the merge command,
//! accepting trait-based dependencies for testability.

use std::collections::HashMap;

use anyhow::{Context, Result};
use prflow_github::{
    CommitStatus, GitHubApi, MergeMethod, MergePullRequest, MergeResult, PullRequest, StatusState,
};

/// What the merge command did.
#[derive(Debug)]
pub enum MergeDecision {
    Merged(MergeResult),
    /// Required contexts whose latest status is not `success`.
    Skipped { pending: Vec<String> },
}

/// Service for merge operations with trait-based dependencies.
pub struct MergeService<'a, H: GitHubApi> {
    client: &'a H,
    owner: String,
    repo_name: String,
}

/// Latest state of each context. `statuses` is newest first.
fn latest_states(statuses: &[CommitStatus]) -> HashMap<&str, StatusState> {
    let mut latest = HashMap::new();
    for status in statuses {
        latest.entry(status.context.as_str()).or_insert(status.state);
    }
    latest
}

impl<'a, H: GitHubApi> MergeService<'a, H> {
    /// Create a new merge service.
    #[must_use]
    pub const fn new(client: &'a H, owner: String, repo_name: String) -> Self {
        Self {
            client,
            owner,
            repo_name,
        }
    }

    /// Required contexts of the base branch not yet passing on the head commit.
    pub async fn failing_contexts(&self, pr: &PullRequest) -> Result<Vec<String>> {
        let required = self
            .client
            .required_status_contexts(&self.owner, &self.repo_name, &pr.base.branch)
            .await
            .with_context(|| format!("Failed to read protection of '{}'", pr.base.branch))?;

        let statuses = self
            .client
            .list_statuses(&self.owner, &self.repo_name, &pr.head.sha)
            .await
            .context("Failed to list commit statuses")?;

        let latest = latest_states(&statuses);
        let failing = required
            .into_iter()
            .filter(|context| {
                let state = latest.get(context.as_str()).copied();
                tracing::debug!(context = %context, state = ?state, "required status context");
                state != Some(StatusState::Success)
            })
            .collect();

        Ok(failing)
    }

    /// Merge the pull request unless required statuses are not passing.
    ///
    /// With `force` the status check is skipped entirely.
    pub async fn merge(
        &self,
        pr: &PullRequest,
        method: MergeMethod,
        force: bool,
    ) -> Result<MergeDecision> {
        if !force {
            let pending = self.failing_contexts(pr).await?;
            if !pending.is_empty() {
                tracing::info!(pr = pr.number, ?pending, "required statuses not passing");
                return Ok(MergeDecision::Skipped { pending });
            }
        }

        tracing::info!(pr = pr.number, ?method, "merging pull request");
        let merge_request = MergePullRequest {
            commit_title: None,
            commit_message: None,
            merge_method: method,
        };

        let result = self
            .client
            .merge_pr(&self.owner, &self.repo_name, pr.number, merge_request)
            .await
            .with_context(|| format!("Failed to merge PR #{}", pr.number))?;

        Ok(MergeDecision::Merged(result))
    }
}
