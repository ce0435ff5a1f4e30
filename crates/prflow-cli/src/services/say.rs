//! Say service: comment on issues and pull requests.

use anyhow::{Context, Result};
use prflow_github::{CreateComment, GitHubApi, IssueComment};

use super::target::IssueTarget;

/// Post `body` as a comment on the target issue or pull request.
pub async fn comment<H: GitHubApi>(
    client: &H,
    target: &IssueTarget,
    body: &str,
) -> Result<IssueComment> {
    tracing::debug!(number = target.number, "creating comment");
    client
        .create_issue_comment(
            &target.owner,
            &target.repo,
            target.number,
            CreateComment {
                body: body.to_string(),
            },
        )
        .await
        .with_context(|| format!("Failed to comment on #{}", target.number))
}
