//! Commit range resolution.

use crate::traits::ObjectStore;

use super::error::{RebaseError, RebaseResult, StoreError};
use super::types::CommitRange;

/// Resolve the commits to replay: reachable from `head_sha` but not from
/// `base_sha`, oldest first.
///
/// Merge commits are rejected; only linear ranges can be replayed.
///
/// # Errors
/// Returns [`RebaseError::RangeResolution`] if either endpoint is unknown,
/// the store cannot list the whole range, or the range contains a merge
/// commit.
pub async fn resolve<S: ObjectStore>(
    store: &S,
    base_sha: &str,
    head_sha: &str,
) -> RebaseResult<CommitRange> {
    let range = store
        .compare(base_sha, head_sha)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(what) => RebaseError::RangeResolution {
                base: base_sha.to_string(),
                head: head_sha.to_string(),
                reason: format!("unknown commit {what}"),
            },
            incomplete @ StoreError::Incomplete { .. } => RebaseError::RangeResolution {
                base: base_sha.to_string(),
                head: head_sha.to_string(),
                reason: incomplete.to_string(),
            },
            other => RebaseError::ObjectStore(other),
        })?;

    if let Some(merge) = range.commits.iter().find(|c| c.is_merge()) {
        return Err(RebaseError::RangeResolution {
            base: base_sha.to_string(),
            head: head_sha.to_string(),
            reason: format!(
                "{} is a merge commit; merge commits cannot be replayed",
                merge.short_sha()
            ),
        });
    }

    tracing::debug!(
        base = base_sha,
        head = head_sha,
        merge_base = %range.merge_base,
        commits = range.commits.len(),
        "resolved commit range"
    );

    Ok(range)
}
