//! Values threaded through a rebase run.

use serde::{Deserialize, Serialize};

/// Identity and timestamp recorded on a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    /// ISO 8601 timestamp as stored by the remote.
    pub date: Option<String>,
}

/// An immutable commit in the remote object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub sha: String,
    pub tree: String,
    pub parents: Vec<String>,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
    pub message: String,
}

impl CommitRef {
    /// First line of the commit message.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Abbreviated SHA for log lines and ref names.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }

    /// Whether this commit joins two or more lines of history.
    #[must_use]
    pub const fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Abbreviate a SHA to seven characters.
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Request to write a commit object.
#[derive(Debug, Clone)]
pub struct NewCommit {
    pub tree: String,
    pub parents: Vec<String>,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
    pub message: String,
}

/// Commits reachable from a head but not from a base.
#[derive(Debug, Clone)]
pub struct CommitRange {
    /// Best common ancestor of base and head.
    pub merge_base: String,
    /// Oldest first.
    pub commits: Vec<CommitRef>,
}

/// Result of asking the remote to merge a commit into a branch.
#[derive(Debug, Clone)]
pub enum MergeResult {
    /// The branch now points at this merge commit.
    Merged(CommitRef),
    /// The commit was already contained in the branch.
    UpToDate,
}

/// A branch together with the commit it was observed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTip {
    pub branch: String,
    pub sha: String,
}

/// What to rebase: a pull request's head onto its base branch.
#[derive(Debug, Clone)]
pub struct RebaseTarget {
    pub owner: String,
    pub repo: String,
    /// Base branch and the SHA the head was originally built on.
    pub base: BranchTip,
    /// Head branch and its current tip.
    pub head: BranchTip,
}

/// Everything the replay needs, computed once before any write.
#[derive(Debug, Clone)]
pub struct RebasePlan {
    pub original_base_sha: String,
    pub original_head_sha: String,
    /// Current tip of the real base branch.
    pub new_base_sha: String,
    /// Best common ancestor of the original base and head.
    pub merge_base: String,
    /// Commits to replay, oldest first.
    pub commits: Vec<CommitRef>,
}

impl RebasePlan {
    /// Declared parent of the first scaffold: the original parent of the
    /// oldest commit, or the merge base when there is nothing to replay.
    #[must_use]
    pub fn initial_pseudo_parent(&self) -> &str {
        self.commits
            .first()
            .and_then(|c| c.parents.first())
            .map_or(self.merge_base.as_str(), String::as_str)
    }

    /// Whether the base branch has not moved since the head was built on it.
    #[must_use]
    pub fn base_unchanged(&self) -> bool {
        self.original_base_sha == self.new_base_sha
    }
}

/// Accumulator passed into and returned from each replay step.
#[derive(Debug, Clone)]
pub struct ReplayState {
    /// Latest linearized commit; its tree is the branch content so far.
    pub accumulated_head: CommitRef,
    /// Original pre-image of the next commit to replay.
    pub pseudo_parent: String,
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Planning,
    Replaying,
    Publishing,
    Succeeded,
    Failed,
}

impl Phase {
    /// Terminal phase of a run that stopped in `self`.
    #[must_use]
    pub const fn settle(self, succeeded: bool) -> Self {
        if succeeded { Self::Succeeded } else { Self::Failed }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planning => write!(f, "planning"),
            Self::Replaying => write!(f, "replaying"),
            Self::Publishing => write!(f, "publishing"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One original commit and the commit that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub original: String,
    pub replayed: String,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct RebaseOutcome {
    pub head_branch: String,
    pub old_head_sha: String,
    pub new_head_sha: String,
    pub new_base_sha: String,
    /// Original to replayed SHA, oldest first.
    pub rewritten: Vec<Rewritten>,
    /// Scratch ref used by the run.
    pub scratch_ref: String,
    /// Whether the scratch ref was removed after publishing.
    pub scratch_deleted: bool,
}

impl RebaseOutcome {
    /// Whether the branch ended up where it started.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.old_head_sha == self.new_head_sha
    }
}
