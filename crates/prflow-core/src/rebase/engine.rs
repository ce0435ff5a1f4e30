//! Rebase orchestration: plan, replay, publish.

use tracing::Instrument;

use crate::config::RebaseConfig;
use crate::traits::ObjectStore;

use super::error::{RebaseError, RebaseResult, StoreError};
use super::scratch::{ScratchRef, scratch_name};
use super::types::{Phase, RebaseOutcome, RebasePlan, RebaseTarget, ReplayState, Rewritten};
use super::{pick, publish, range};

/// Knobs for a rebase run.
#[derive(Debug, Clone)]
pub struct RebaseOptions {
    /// Prefix of generated scratch ref names.
    pub scratch_prefix: String,
    /// Use this exact scratch ref name instead of generating one.
    pub scratch_name: Option<String>,
    /// Delete the scratch ref after a successful publish.
    pub delete_scratch: bool,
}

impl Default for RebaseOptions {
    fn default() -> Self {
        Self::from(&RebaseConfig::default())
    }
}

impl From<&RebaseConfig> for RebaseOptions {
    fn from(config: &RebaseConfig) -> Self {
        Self {
            scratch_prefix: config.scratch_prefix.clone(),
            scratch_name: None,
            delete_scratch: config.delete_scratch,
        }
    }
}

/// Rewrites a branch onto the current tip of its base, entirely remotely.
pub struct Rebaser<'a, S: ObjectStore> {
    store: &'a S,
    options: RebaseOptions,
}

impl<'a, S: ObjectStore> Rebaser<'a, S> {
    /// Create a rebaser over the given store.
    #[must_use]
    pub const fn new(store: &'a S, options: RebaseOptions) -> Self {
        Self { store, options }
    }

    /// Work out what a run would do, without writing anything.
    ///
    /// # Errors
    /// Returns [`RebaseError::RangeResolution`] if the range or the base
    /// branch cannot be resolved.
    pub async fn plan(&self, target: &RebaseTarget) -> RebaseResult<RebasePlan> {
        let range = range::resolve(self.store, &target.base.sha, &target.head.sha).await?;

        let new_base_sha = self
            .store
            .resolve_ref(&target.base.branch)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(what) => RebaseError::RangeResolution {
                    base: target.base.branch.clone(),
                    head: target.head.sha.clone(),
                    reason: format!("base branch not found: {what}"),
                },
                other => RebaseError::ObjectStore(other),
            })?;

        Ok(RebasePlan {
            original_base_sha: target.base.sha.clone(),
            original_head_sha: target.head.sha.clone(),
            new_base_sha,
            merge_base: range.merge_base,
            commits: range.commits,
        })
    }

    /// Replay the target's commits onto its base branch and move the head
    /// branch to the result.
    ///
    /// The head branch is written once, after every commit replayed. On
    /// failure it is untouched and the scratch ref stays where the run
    /// stopped.
    ///
    /// # Errors
    /// Returns the first error hit; see [`RebaseError`].
    pub async fn rebase(&self, target: &RebaseTarget) -> RebaseResult<RebaseOutcome> {
        let span = tracing::info_span!(
            "rebase",
            owner = %target.owner,
            repo = %target.repo,
            head = %target.head.branch,
            base = %target.base.branch,
        );

        async {
            let mut phase = Phase::Planning;
            let result = self.run(target, &mut phase).await;
            let stopped_in = phase;
            phase = phase.settle(result.is_ok());

            match &result {
                Ok(outcome) => tracing::info!(
                    phase = %phase,
                    new_head = %outcome.new_head_sha,
                    commits = outcome.rewritten.len(),
                    "rebase finished"
                ),
                Err(e) => tracing::error!(
                    phase = %phase,
                    stopped_in = %stopped_in,
                    error = %e,
                    "rebase failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, target: &RebaseTarget, phase: &mut Phase) -> RebaseResult<RebaseOutcome> {
        let plan = self.plan(target).await?;
        let new_base = self.store.get_commit(&plan.new_base_sha).await?;

        let name = self.options.scratch_name.clone().unwrap_or_else(|| {
            scratch_name(
                &self.options.scratch_prefix,
                &target.head.branch,
                &target.head.sha,
                chrono::Utc::now().timestamp_millis(),
            )
        });
        let scratch = ScratchRef::create(self.store, &name, &plan.new_base_sha).await?;

        tracing::info!(
            commits = plan.commits.len(),
            new_base = %plan.new_base_sha,
            scratch = %name,
            "planned rebase"
        );

        *phase = Phase::Replaying;
        let mut state = ReplayState {
            accumulated_head: new_base,
            pseudo_parent: plan.initial_pseudo_parent().to_string(),
        };
        let mut rewritten = Vec::with_capacity(plan.commits.len());
        for picked in &plan.commits {
            state = pick::replay(self.store, &scratch, state, picked).await?;
            rewritten.push(Rewritten {
                original: picked.sha.clone(),
                replayed: state.accumulated_head.sha.clone(),
            });
        }

        *phase = Phase::Publishing;
        let new_head_sha = state.accumulated_head.sha;
        publish::publish(self.store, &target.head.branch, &new_head_sha).await?;

        *phase = Phase::Succeeded;
        let scratch_deleted = if self.options.delete_scratch {
            scratch.discard().await
        } else {
            false
        };

        Ok(RebaseOutcome {
            head_branch: target.head.branch.clone(),
            old_head_sha: plan.original_head_sha,
            new_head_sha,
            new_base_sha: plan.new_base_sha,
            rewritten,
            scratch_ref: name,
            scratch_deleted,
        })
    }
}
