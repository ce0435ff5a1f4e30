//! Remote rebase engine.
//!
//! Rewrites a pull request's head branch onto the current tip of its base
//! branch without a local clone, using only commit creation, ref updates and
//! the server-side merge of the hosting service.
//!
//! A run has three phases:
//! 1. **Planning**: resolve the commits to replay and create a scratch ref
//!    at the new base.
//! 2. **Replaying**: replay each commit, oldest first, on the scratch ref
//!    (see [`pick`]).
//! 3. **Publishing**: force-update the head branch to the replayed tip.

mod engine;
mod error;
mod github;
#[cfg(test)]
pub(crate) mod memory;
pub mod pick;
pub mod publish;
pub mod range;
pub mod scratch;
mod types;

pub use engine::{RebaseOptions, Rebaser};
pub use error::{RebaseError, RebaseResult, StoreError};
pub use github::GitHubStore;
pub use types::{
    BranchTip, CommitRange, CommitRef, MergeResult, NewCommit, Phase, RebaseOutcome, RebasePlan,
    RebaseTarget, ReplayState, Rewritten, Signature, short_sha,
};
