//! Resolving what the triggering event is about.

use anyhow::{Context, Result, bail};
use prflow_core::rebase::{BranchTip, RebaseTarget};
use prflow_github::{Event, GitHubApi, PullRequest};

/// A pull request and the repository it lives in.
#[derive(Debug, Clone)]
pub struct PullRequestTarget {
    pub owner: String,
    pub repo: String,
    pub pull_request: PullRequest,
}

impl PullRequestTarget {
    /// Rebase target rewriting this pull request's head onto its base.
    #[must_use]
    pub fn rebase_target(&self) -> RebaseTarget {
        let pr = &self.pull_request;
        RebaseTarget {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            base: BranchTip {
                branch: pr.base.branch.clone(),
                sha: pr.base.sha.clone(),
            },
            head: BranchTip {
                branch: pr.head.branch.clone(),
                sha: pr.head.sha.clone(),
            },
        }
    }
}

/// An issue or pull request number and the repository it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTarget {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// The issue or pull request an event refers to.
pub fn issue_target(event: &Event) -> Result<IssueTarget> {
    let repository = event
        .repository()
        .with_context(|| format!("Event '{}' does not carry a repository", event.name()))?;
    let number = event.issue_number().with_context(|| {
        format!(
            "Event '{}' does not refer to an issue or pull request",
            event.name()
        )
    })?;

    Ok(IssueTarget {
        owner: repository.owner.clone(),
        repo: repository.name.clone(),
        number,
    })
}

/// The pull request an event refers to.
///
/// `pull_request` events carry it in full. Issue events must be on a pull
/// request, and check events use their first associated pull request; both
/// are fetched so labels, body and branches are complete.
pub async fn pull_request_target<G: GitHubApi>(client: &G, event: &Event) -> Result<PullRequestTarget> {
    if let Event::PullRequest {
        repository,
        pull_request,
        ..
    } = event
    {
        return Ok(PullRequestTarget {
            owner: repository.owner.clone(),
            repo: repository.name.clone(),
            pull_request: pull_request.clone(),
        });
    }

    if let Event::Issues { issue, .. } | Event::IssueComment { issue, .. } = event
        && !issue.is_pull_request
    {
        bail!("Issue #{} is not a pull request", issue.number);
    }

    let target = issue_target(event)?;
    tracing::debug!(
        event = event.name(),
        number = target.number,
        "fetching pull request for event"
    );

    let pull_request = client
        .get_pr(&target.owner, &target.repo, target.number)
        .await
        .with_context(|| format!("Failed to fetch PR #{}", target.number))?;

    Ok(PullRequestTarget {
        owner: target.owner,
        repo: target.repo,
        pull_request,
    })
}
