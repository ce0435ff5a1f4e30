//! Vet service: compliance checks against the live pull request.

use anyhow::{Context, Result};
use prflow_core::Vet;
use prflow_github::{GitHubApi, PullRequest};

/// Service for vetting pull requests with trait-based dependencies.
pub struct VetService<'a, H: GitHubApi> {
    client: &'a H,
    owner: String,
    repo_name: String,
}

impl<'a, H: GitHubApi> VetService<'a, H> {
    #[must_use]
    pub const fn new(client: &'a H, owner: String, repo_name: String) -> Self {
        Self {
            client,
            owner,
            repo_name,
        }
    }

    /// Current description of the pull request.
    ///
    /// Payload bodies are a snapshot from when the event fired, so the body
    /// is read back from the API.
    pub async fn current_body(&self, pr: &PullRequest) -> Result<String> {
        let fresh = self
            .client
            .get_pr(&self.owner, &self.repo_name, pr.number)
            .await
            .with_context(|| format!("Failed to fetch PR #{}", pr.number))?;
        Ok(fresh.body.unwrap_or_default())
    }

    /// Vet `pr`. Returns the success message, or an error listing failures.
    pub async fn vet(&self, vet: &Vet, pr: &PullRequest) -> Result<String> {
        let body = self.current_body(pr).await?;
        Ok(vet.check(pr, &body)?)
    }
}
