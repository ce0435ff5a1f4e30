//! Exec service: run a command and report it on the pull request's head.
//!
//! Reporting never hides the command's result: the command's own failure is
//! returned after all reporting is done, ahead of any reporting failure.

use anyhow::{Context, Result};
use prflow_core::Runner;
use prflow_github::{CreateStatus, GitHubApi, StatusState};

use super::checks::{ChecksService, Execution};

/// Commit status settings of an exec run.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub context: String,
    pub description: String,
    pub target_url: Option<String>,
}

impl StatusReport {
    fn pending(&self) -> CreateStatus {
        CreateStatus {
            state: StatusState::Pending,
            context: self.context.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            target_url: self.target_url.clone(),
        }
        .truncated()
    }

    fn finished(&self, execution: &Execution) -> CreateStatus {
        let stdout = execution.stdout.trim_end();
        let description = if self.description.is_empty() {
            stdout.to_string()
        } else {
            format!("{}. {stdout}", self.description)
        };

        CreateStatus {
            state: if execution.succeeded() {
                StatusState::Success
            } else {
                StatusState::Failure
            },
            context: self.context.clone(),
            description: Some(description),
            target_url: self.target_url.clone(),
        }
        .truncated()
    }
}

/// What to run and where to report it.
#[derive(Debug, Clone, Default)]
pub struct ExecRequest {
    /// Program then arguments.
    pub command: Vec<String>,
    pub check_run_name: Option<String>,
    pub status: Option<StatusReport>,
}

/// Service for exec operations with trait-based dependencies.
pub struct ExecService<'a, H: GitHubApi> {
    client: &'a H,
    owner: String,
    repo_name: String,
    runner: Runner,
}

impl<'a, H: GitHubApi> ExecService<'a, H> {
    #[must_use]
    pub const fn new(client: &'a H, owner: String, repo_name: String, runner: Runner) -> Self {
        Self {
            client,
            owner,
            repo_name,
            runner,
        }
    }

    async fn post_status(&self, sha: &str, status: CreateStatus) -> Result<()> {
        let context = status.context.clone();
        let state = status.state;
        let created = self
            .client
            .create_status(&self.owner, &self.repo_name, sha, status)
            .await
            .with_context(|| format!("Failed to create {state:?} status {context:?}"))?;
        tracing::info!(id = created.id, context = %context, ?state, "created commit status");
        Ok(())
    }

    /// Run the request's command for the commit `head_sha` and report it.
    ///
    /// Returns the execution if the command succeeded and was reported.
    /// A failed pending status stops before the command runs. Otherwise
    /// reporting finishes first, then the command's error is returned, or
    /// failing that the final status error.
    pub async fn exec(&self, head_sha: &str, request: &ExecRequest) -> Result<Execution> {
        if let Some(status) = &request.status {
            self.post_status(head_sha, status.pending()).await?;
        }

        let mut execution = Execution::run(&self.runner, &request.command).await?;

        if let Some(name) = &request.check_run_name {
            let checks = ChecksService::new(self.client, self.owner.clone(), self.repo_name.clone());
            let suite = checks.first_suite(head_sha).await?;
            let run = checks.ensure_run(&suite, name).await?;
            checks.complete_run(&run, &execution).await?;
        }

        let reported = match &request.status {
            Some(status) => self.post_status(head_sha, status.finished(&execution)).await,
            None => Ok(()),
        };

        match (execution.error.take(), reported) {
            (Some(e), Err(report)) => {
                tracing::warn!(error = %format!("{report:#}"), "final status not reported");
                Err(e.into())
            }
            (Some(e), Ok(())) => Err(e.into()),
            (None, Err(report)) => Err(report),
            (None, Ok(())) => Ok(execution),
        }
    }
}
