//! Scratch branch used as the staging point of one run.

use crate::traits::ObjectStore;

use super::error::{RebaseError, RebaseResult, StoreError};

/// A temporary branch the replay advances; never the real head branch.
pub struct ScratchRef<'a, S: ObjectStore> {
    store: &'a S,
    name: String,
}

impl<S: ObjectStore> std::fmt::Debug for ScratchRef<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchRef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<'a, S: ObjectStore> ScratchRef<'a, S> {
    /// Create the scratch branch at `start_sha`.
    ///
    /// # Errors
    /// Returns [`RebaseError::RefConflict`] if the name is already in use.
    pub async fn create(store: &'a S, name: &str, start_sha: &str) -> RebaseResult<Self> {
        store.create_ref(name, start_sha).await.map_err(|e| match e {
            StoreError::RefExists(_) => RebaseError::RefConflict(name.to_string()),
            other => RebaseError::ObjectStore(other),
        })?;

        tracing::debug!(scratch = name, start = start_sha, "created scratch ref");

        Ok(Self {
            store,
            name: name.to_string(),
        })
    }

    /// Branch name of the scratch ref.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Move the scratch ref to `sha`.
    ///
    /// # Errors
    /// Returns [`RebaseError::ObjectStore`] if the update is rejected.
    pub async fn advance(&self, sha: &str, force: bool) -> RebaseResult<()> {
        self.store.update_ref(&self.name, sha, force).await?;
        tracing::trace!(scratch = %self.name, sha, force, "advanced scratch ref");
        Ok(())
    }

    /// Remove the scratch ref. Failures are logged, not returned.
    pub async fn discard(self) -> bool {
        match self.store.delete_ref(&self.name).await {
            Ok(()) => {
                tracing::debug!(scratch = %self.name, "deleted scratch ref");
                true
            }
            Err(e) => {
                tracing::warn!(scratch = %self.name, error = %e, "could not delete scratch ref");
                false
            }
        }
    }
}

/// Build a scratch ref name unique to this run.
///
/// Layout: `<prefix>/<head-branch>-<head-sha7>-<millis>`.
#[must_use]
pub fn scratch_name(prefix: &str, head_branch: &str, head_sha: &str, millis: i64) -> String {
    let prefix = prefix.trim_end_matches('/');
    let short = super::types::short_sha(head_sha);
    format!("{prefix}/{head_branch}-{short}-{millis}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rebase::memory::MemoryStore;

    #[test]
    fn test_scratch_name_layout() {
        assert_eq!(
            scratch_name("prflow/rebase/", "feature/x", "0123456789abcdef", 1_700_000_000_000),
            "prflow/rebase/feature/x-0123456-1700000000000"
        );
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let store = MemoryStore::new();
        let base = store.commit(None, &[("README", "hello\n")], "init");
        store.set_ref("scratch", &base);

        let err = ScratchRef::create(&store, "scratch", &base).await.unwrap_err();

        assert!(matches!(err, RebaseError::RefConflict(name) if name == "scratch"));
    }

    #[tokio::test]
    async fn test_advance_and_discard() {
        let store = MemoryStore::new();
        let base = store.commit(None, &[("README", "hello\n")], "init");
        let next = store.commit(Some(&base), &[("a", "a\n")], "next");

        let scratch = ScratchRef::create(&store, "scratch", &base).await.unwrap();
        assert_eq!(
            format!("{scratch:?}"),
            r#"ScratchRef { name: "scratch", .. }"#
        );
        scratch.advance(&next, true).await.unwrap();
        assert_eq!(store.ref_sha("scratch").as_deref(), Some(next.as_str()));

        assert!(scratch.discard().await);
        assert_eq!(store.ref_sha("scratch"), None);
    }
}
