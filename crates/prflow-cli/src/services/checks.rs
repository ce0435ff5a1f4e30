//! Check suites and check runs around command execution.
//!
//! This service encapsulates the business logic for the checks command and
//! the check run reporting of the exec command.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use prflow_core::Runner;
use prflow_github::{
    CheckConclusion, CheckRun, CheckRunOutput, CheckSuite, CreateCheckRun, Event, GitHubApi,
    RunStatus, UpdateCheckRun,
};

/// A finished command as reported to GitHub.
#[derive(Debug)]
pub struct Execution {
    /// Command line, used as the check run title.
    pub title: String,
    pub stdout: String,
    pub fullout: String,
    /// Why the command did not succeed, if it did not.
    pub error: Option<prflow_core::Error>,
}

impl Execution {
    /// Run `command` (program then arguments). A failing or unstartable
    /// command is recorded, not returned.
    pub async fn run(runner: &Runner, command: &[String]) -> Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("No command given");
        };
        let title = prflow_core::runner::command_line(program, args);

        let execution = match runner.run(program, args).await {
            Ok(output) => Self {
                error: output.exit_result().err(),
                title,
                stdout: output.stdout,
                fullout: output.fullout,
            },
            Err(e) => Self {
                title,
                stdout: String::new(),
                fullout: String::new(),
                error: Some(e),
            },
        };

        Ok(execution)
    }

    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// The command's own failure, if any.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn conclusion(&self) -> CheckConclusion {
        if self.succeeded() {
            CheckConclusion::Success
        } else {
            CheckConclusion::Failure
        }
    }

    fn output(&self) -> CheckRunOutput {
        CheckRunOutput {
            title: self.title.clone(),
            summary: format!("```\n{}\n```", self.stdout),
            text: Some(format!("```\n{}\n```", self.fullout)),
        }
    }
}

/// Options of the checks command.
#[derive(Debug, Clone, Default)]
pub struct ChecksOptions {
    /// Runs created on `check_suite` events.
    pub create_runs: Vec<String>,
    /// Run updated with the command's result.
    pub run_name: Option<String>,
    /// Program then arguments.
    pub command: Vec<String>,
}

/// What the checks command did.
#[derive(Debug, PartialEq, Eq)]
pub enum ChecksOutcome {
    /// The named run was completed with a successful command.
    Completed { run: String },
    /// Queued runs were created for a suite.
    CreatedRuns(Vec<String>),
    /// The event kind is not handled.
    Ignored(String),
}

/// Service for check operations with trait-based dependencies.
pub struct ChecksService<'a, H: GitHubApi> {
    client: &'a H,
    owner: String,
    repo_name: String,
}

impl<'a, H: GitHubApi> ChecksService<'a, H> {
    #[must_use]
    pub const fn new(client: &'a H, owner: String, repo_name: String) -> Self {
        Self {
            client,
            owner,
            repo_name,
        }
    }

    /// The first check suite GitHub created for `sha`.
    pub async fn first_suite(&self, sha: &str) -> Result<CheckSuite> {
        let suites = self
            .client
            .list_check_suites(&self.owner, &self.repo_name, sha, None)
            .await
            .context("Failed to list check suites")?;
        suites
            .into_iter()
            .next()
            .with_context(|| format!("No check suite exists for {sha}"))
    }

    /// The suite holding `check_name` for `sha`, creating one if needed.
    ///
    /// When creation is rejected because a suite already exists, the first
    /// existing suite is re-requested and used.
    pub async fn ensure_suite(&self, sha: &str, check_name: &str) -> Result<CheckSuite> {
        let suites = self
            .client
            .list_check_suites(&self.owner, &self.repo_name, sha, Some(check_name))
            .await
            .context("Failed to list check suites")?;

        if suites.len() > 1 {
            bail!(
                "Too many check suites ({}) for {sha} and check {check_name:?}",
                suites.len()
            );
        }
        if let Some(suite) = suites.into_iter().next() {
            return Ok(suite);
        }

        tracing::info!(sha = %sha, "creating check suite");
        match self
            .client
            .create_check_suite(&self.owner, &self.repo_name, sha)
            .await
        {
            Ok(suite) => Ok(suite),
            Err(e) if e.status() == Some(422) => {
                tracing::info!(sha = %sha, "check suite exists, re-requesting it");
                let suite = self.first_suite(sha).await?;
                if let Err(e) = self
                    .client
                    .rerequest_check_suite(&self.owner, &self.repo_name, suite.id)
                    .await
                {
                    tracing::warn!(suite = suite.id, error = %e, "failed to re-request check suite");
                }
                Ok(suite)
            }
            Err(e) => Err(e).context("Failed to create check suite"),
        }
    }

    /// Create a queued run named `name` on `head_sha`.
    pub async fn create_run(&self, head_sha: &str, name: &str) -> Result<CheckRun> {
        tracing::info!(name = %name, sha = %head_sha, "creating check run");
        self.client
            .create_check_run(
                &self.owner,
                &self.repo_name,
                CreateCheckRun {
                    name: name.to_string(),
                    head_sha: head_sha.to_string(),
                    status: RunStatus::Queued,
                    started_at: Some(Utc::now()),
                },
            )
            .await
            .with_context(|| format!("Failed to create check run {name:?}"))
    }

    /// The run named `name` in `suite`, created if missing.
    pub async fn ensure_run(&self, suite: &CheckSuite, name: &str) -> Result<CheckRun> {
        let runs = self
            .client
            .list_check_runs_in_suite(&self.owner, &self.repo_name, suite.id, Some(name))
            .await
            .context("Failed to list check runs")?;

        match runs.into_iter().rfind(|r| r.name == name) {
            Some(run) => Ok(run),
            None => self.create_run(&suite.head_sha, name).await,
        }
    }

    /// Mark `run` completed with the execution's conclusion and output.
    pub async fn complete_run(&self, run: &CheckRun, execution: &Execution) -> Result<()> {
        let update = UpdateCheckRun {
            name: None,
            status: RunStatus::Completed,
            conclusion: Some(execution.conclusion()),
            completed_at: Some(Utc::now()),
            output: Some(execution.output()),
        };

        tracing::info!(run = run.id, name = %run.name, success = execution.succeeded(), "completing check run");
        self.client
            .update_check_run(&self.owner, &self.repo_name, run.id, update)
            .await
            .with_context(|| format!("Failed to update check run {:?}", run.name))?;
        Ok(())
    }

    /// Act on a check-related event.
    pub async fn handle_event(
        &self,
        event: &Event,
        options: &ChecksOptions,
        runner: &Runner,
    ) -> Result<ChecksOutcome> {
        match event {
            Event::PullRequest { pull_request, .. } => {
                let name = required_run_name(options)?;
                let suite = self.ensure_suite(&pull_request.head.sha, name).await?;
                let run = self.ensure_run(&suite, name).await?;
                self.execute_and_complete(&run, options, runner).await
            }
            Event::CheckSuite { check_suite, .. } => {
                for name in &options.create_runs {
                    self.create_run(&check_suite.head_sha, name).await?;
                }
                Ok(ChecksOutcome::CreatedRuns(options.create_runs.clone()))
            }
            Event::CheckRun { check_run, .. } => {
                let name = required_run_name(options)?;
                if check_run.name != name {
                    bail!(
                        "Unexpected run name: expected {name:?}, got {:?}",
                        check_run.name
                    );
                }
                let run = CheckRun {
                    id: check_run.id,
                    name: check_run.name.clone(),
                    head_sha: check_run.head_sha.clone(),
                    status: prflow_github::CheckStatus::InProgress,
                    details_url: None,
                };
                self.execute_and_complete(&run, options, runner).await
            }
            other => {
                tracing::info!(event = other.name(), "event ignored by checks");
                Ok(ChecksOutcome::Ignored(other.name().to_string()))
            }
        }
    }

    async fn execute_and_complete(
        &self,
        run: &CheckRun,
        options: &ChecksOptions,
        runner: &Runner,
    ) -> Result<ChecksOutcome> {
        let execution = Execution::run(runner, &options.command).await?;
        self.complete_run(run, &execution).await?;
        execution.into_result()?;
        Ok(ChecksOutcome::Completed {
            run: run.name.clone(),
        })
    }
}

fn required_run_name(options: &ChecksOptions) -> Result<&str> {
    options
        .run_name
        .as_deref()
        .context("--run is required for pull_request and check_run events")
}
