//! `prflow exec` command - Run a command and report it on the PR's head.

use anyhow::Result;
use prflow_core::Runner;

use crate::commands::{ExecArgs, Globals, utils};
use crate::output;
use crate::services::{ExecRequest, ExecService, StatusReport, pull_request_target};

impl From<&ExecArgs> for ExecRequest {
    fn from(args: &ExecArgs) -> Self {
        Self {
            command: args.command.clone(),
            check_run_name: args.check_run_name.clone().filter(|n| !n.is_empty()),
            status: args
                .status_context
                .clone()
                .filter(|c| !c.is_empty())
                .map(|context| StatusReport {
                    context,
                    description: args.status_description.clone(),
                    target_url: args.status_target_url.clone().filter(|u| !u.is_empty()),
                }),
        }
    }
}

/// Run the exec command.
pub fn run(globals: &Globals, args: &ExecArgs) -> Result<()> {
    let config = utils::load_config(globals)?;
    let event = utils::load_event()?;
    let request = ExecRequest::from(args);

    let rt = utils::runtime()?;
    rt.block_on(async {
        let client = utils::github_client(globals, &config)?;
        let target = pull_request_target(&client, &event).await?;

        let service = ExecService::new(
            &client,
            target.owner.clone(),
            target.repo.clone(),
            Runner::new().echo(true),
        );
        let execution = service
            .exec(&target.pull_request.head.sha, &request)
            .await?;

        output::success(&format!("{} succeeded", execution.title));
        Ok::<_, anyhow::Error>(())
    })
}
