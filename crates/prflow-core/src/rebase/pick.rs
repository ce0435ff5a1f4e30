//! Replaying one commit with the scaffold and merge technique.
//!
//! The remote has no patch/apply primitive, only a three-way merge. To
//! cherry-pick `picked` onto the accumulated history we write a scaffold
//! commit carrying the accumulated tree but declaring `picked`'s original
//! parent as its own. Merging `picked` into it then uses that parent as the
//! merge base, so the merge applies exactly `picked`'s diff. The two-parent
//! result is collapsed into a single-parent consolidation commit.

use crate::traits::ObjectStore;

use super::error::{RebaseError, RebaseResult, StoreError};
use super::scratch::ScratchRef;
use super::types::{CommitRef, MergeResult, NewCommit, ReplayState};

/// Replay `picked` on top of `state`, returning the state for the next commit.
///
/// # Errors
/// Returns [`RebaseError::MergeConflict`] if `picked` does not apply cleanly,
/// or [`RebaseError::ObjectStore`] for any other remote failure.
pub async fn replay<S: ObjectStore>(
    store: &S,
    scratch: &ScratchRef<'_, S>,
    state: ReplayState,
    picked: &CommitRef,
) -> RebaseResult<ReplayState> {
    let scaffold = store
        .create_commit(NewCommit {
            tree: state.accumulated_head.tree.clone(),
            parents: vec![state.pseudo_parent.clone()],
            author: None,
            committer: None,
            message: format!("prflow scaffold for {}", picked.short_sha()),
        })
        .await?;

    scratch.advance(&scaffold.sha, true).await?;

    let merged = store
        .merge(
            scratch.name(),
            &picked.sha,
            &format!("prflow replay {}", picked.short_sha()),
        )
        .await
        .map_err(|e| match e {
            StoreError::Conflict => RebaseError::MergeConflict {
                sha: picked.sha.clone(),
                summary: picked.summary().to_string(),
            },
            other => RebaseError::ObjectStore(other),
        })?;

    let tree = match merged {
        MergeResult::Merged(commit) => commit.tree,
        // Nothing to apply; keep the commit so the output stays one-to-one.
        MergeResult::UpToDate => scaffold.tree,
    };

    let consolidated = store
        .create_commit(NewCommit {
            tree,
            parents: vec![state.accumulated_head.sha.clone()],
            author: picked.author.clone(),
            committer: picked.committer.clone(),
            message: picked.message.clone(),
        })
        .await?;

    scratch.advance(&consolidated.sha, true).await?;

    tracing::debug!(
        original = picked.short_sha(),
        replayed = consolidated.short_sha(),
        summary = picked.summary(),
        "replayed commit"
    );

    Ok(ReplayState {
        accumulated_head: consolidated,
        pseudo_parent: picked.sha.clone(),
    })
}
