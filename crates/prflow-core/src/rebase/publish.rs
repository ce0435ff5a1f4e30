//! Moving the real head branch to the replayed tip.

use crate::traits::ObjectStore;

use super::error::{RebaseError, RebaseResult};

/// Force-update `branch` to `sha`.
///
/// This is the only write to a user-visible ref in a run.
///
/// # Errors
/// Returns [`RebaseError::Publish`] if the update is rejected.
pub async fn publish<S: ObjectStore>(store: &S, branch: &str, sha: &str) -> RebaseResult<()> {
    store
        .update_ref(branch, sha, true)
        .await
        .map_err(|source| RebaseError::Publish {
            branch: branch.to_string(),
            sha: sha.to_string(),
            source,
        })?;

    tracing::info!(branch, sha, "published rebased branch");
    Ok(())
}
