//! Trait abstractions for the remote object store.
//!
//! This module defines the `ObjectStore` trait which abstracts the git
//! database the rebase engine writes to, enabling dependency injection and
//! testability.

use std::future::Future;

use crate::rebase::{CommitRange, CommitRef, MergeResult, NewCommit, StoreError};

/// Result type for object store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Remote content-addressable store with commit, ref and merge primitives.
///
/// This trait abstracts the hosting service, allowing for:
/// - A GitHub-backed implementation over the REST API
/// - In-memory implementations for testing
///
/// Refs are branch names without the `refs/heads/` prefix.
pub trait ObjectStore: Send + Sync {
    // === Refs ===

    /// Resolve a branch to the SHA it points at.
    fn resolve_ref(&self, branch: &str) -> impl Future<Output = StoreResult<String>> + Send;

    /// Create a branch at `sha`. Fails with [`StoreError::RefExists`] if taken.
    fn create_ref(&self, branch: &str, sha: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Move a branch to `sha`; `force` allows non-fast-forward moves.
    fn update_ref(
        &self,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Delete a branch.
    fn delete_ref(&self, branch: &str) -> impl Future<Output = StoreResult<()>> + Send;

    // === Objects ===

    /// Read a commit.
    fn get_commit(&self, sha: &str) -> impl Future<Output = StoreResult<CommitRef>> + Send;

    /// Write a commit without moving any ref.
    fn create_commit(
        &self,
        commit: NewCommit,
    ) -> impl Future<Output = StoreResult<CommitRef>> + Send;

    /// Commits reachable from `head` and not from `base`, oldest first.
    fn compare(
        &self,
        base: &str,
        head: &str,
    ) -> impl Future<Output = StoreResult<CommitRange>> + Send;

    /// Merge `sha` into `branch`, advancing the branch to the merge commit.
    ///
    /// Fails with [`StoreError::Conflict`] when the merge is not clean.
    fn merge(
        &self,
        branch: &str,
        sha: &str,
        message: &str,
    ) -> impl Future<Output = StoreResult<MergeResult>> + Send;
}
