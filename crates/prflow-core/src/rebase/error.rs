//! Errors raised by the rebase engine and its object store.

/// Failure reported by an [`ObjectStore`](crate::traits::ObjectStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A commit, ref or other object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A ref with this name already exists.
    #[error("ref already exists: {0}")]
    RefExists(String),

    /// The remote listed fewer commits than the range holds.
    #[error("range lists {listed} of {expected} commits")]
    Incomplete { listed: usize, expected: usize },

    /// The remote could not merge cleanly.
    #[error("merge conflict")]
    Conflict,

    /// Any other failure of the backing service.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for rebase operations.
pub type RebaseResult<T> = std::result::Result<T, RebaseError>;

/// Why a rebase run stopped. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum RebaseError {
    /// The commits between base and head could not be determined.
    #[error("cannot resolve commits {base}..{head}: {reason}")]
    RangeResolution {
        base: String,
        head: String,
        reason: String,
    },

    /// The scratch ref name is already taken.
    #[error("scratch ref '{0}' already exists - delete it or pick another name")]
    RefConflict(String),

    /// Replaying a commit did not merge cleanly.
    #[error("conflict replaying {sha} ({summary}) onto the new base")]
    MergeConflict { sha: String, summary: String },

    /// Any other object store failure during planning or replay.
    #[error("object store error: {0}")]
    ObjectStore(#[source] StoreError),

    /// The head branch could not be moved to the replayed tip.
    #[error("failed to publish {branch} at {sha}: {source}")]
    Publish {
        branch: String,
        sha: String,
        #[source]
        source: StoreError,
    },
}

impl From<StoreError> for RebaseError {
    fn from(err: StoreError) -> Self {
        Self::ObjectStore(err)
    }
}
