//! Object store backed by a GitHub repository's git database.

use prflow_github::{
    CreateCommit, Error as GitHubError, GitCommit, GitHubApi, GitUser, MergeOutcome,
};

use crate::traits::{ObjectStore, StoreResult};

use super::error::StoreError;
use super::types::{CommitRange, CommitRef, MergeResult, NewCommit, Signature};

/// A single repository on GitHub, seen through [`ObjectStore`].
pub struct GitHubStore<'a, G: GitHubApi> {
    client: &'a G,
    owner: String,
    repo: String,
}

impl<'a, G: GitHubApi> GitHubStore<'a, G> {
    /// Wrap `client` for the repository `owner/repo`.
    #[must_use]
    pub fn new(client: &'a G, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl From<GitHubError> for StoreError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::RefNotFound(name) => Self::NotFound(name),
            GitHubError::RefAlreadyExists(name) => Self::RefExists(name),
            GitHubError::MergeConflict { .. } => Self::Conflict,
            e if e.is_not_found() => Self::NotFound(e.to_string()),
            e => Self::Backend(Box::new(e)),
        }
    }
}

impl From<GitUser> for Signature {
    fn from(user: GitUser) -> Self {
        Self {
            name: user.name,
            email: user.email,
            date: user.date,
        }
    }
}

impl From<Signature> for GitUser {
    fn from(sig: Signature) -> Self {
        Self {
            name: sig.name,
            email: sig.email,
            date: sig.date,
        }
    }
}

impl From<GitCommit> for CommitRef {
    fn from(commit: GitCommit) -> Self {
        Self {
            sha: commit.sha,
            tree: commit.tree,
            parents: commit.parents,
            author: commit.author.map(Into::into),
            committer: commit.committer.map(Into::into),
            message: commit.message,
        }
    }
}

impl<G: GitHubApi> ObjectStore for GitHubStore<'_, G> {
    async fn resolve_ref(&self, branch: &str) -> StoreResult<String> {
        let git_ref = self.client.get_ref(&self.owner, &self.repo, branch).await?;
        Ok(git_ref.sha)
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> StoreResult<()> {
        self.client
            .create_ref(&self.owner, &self.repo, branch, sha)
            .await?;
        Ok(())
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> StoreResult<()> {
        self.client
            .update_ref(&self.owner, &self.repo, branch, sha, force)
            .await?;
        Ok(())
    }

    async fn delete_ref(&self, branch: &str) -> StoreResult<()> {
        self.client.delete_ref(&self.owner, &self.repo, branch).await?;
        Ok(())
    }

    async fn get_commit(&self, sha: &str) -> StoreResult<CommitRef> {
        let commit = self.client.get_commit(&self.owner, &self.repo, sha).await?;
        Ok(commit.into())
    }

    async fn create_commit(&self, commit: NewCommit) -> StoreResult<CommitRef> {
        let created = self
            .client
            .create_commit(
                &self.owner,
                &self.repo,
                CreateCommit {
                    message: commit.message,
                    tree: commit.tree,
                    parents: commit.parents,
                    author: commit.author.map(Into::into),
                    committer: commit.committer.map(Into::into),
                },
            )
            .await?;
        Ok(created.into())
    }

    async fn compare(&self, base: &str, head: &str) -> StoreResult<CommitRange> {
        let comparison = self
            .client
            .compare_commits(&self.owner, &self.repo, base, head)
            .await?;

        let expected = usize::try_from(comparison.ahead_by).unwrap_or(usize::MAX);
        if comparison.commits.len() != expected {
            return Err(StoreError::Incomplete {
                listed: comparison.commits.len(),
                expected,
            });
        }

        Ok(CommitRange {
            merge_base: comparison.merge_base,
            commits: comparison.commits.into_iter().map(Into::into).collect(),
        })
    }

    async fn merge(&self, branch: &str, sha: &str, message: &str) -> StoreResult<MergeResult> {
        let outcome = self
            .client
            .merge_branches(&self.owner, &self.repo, branch, sha, Some(message))
            .await?;

        Ok(match outcome {
            MergeOutcome::Merged(commit) => MergeResult::Merged(commit.into()),
            MergeOutcome::NothingToMerge => MergeResult::UpToDate,
        })
    }
}
