//! `prflow checks` command - Drive check suites and runs from check events.

use anyhow::Result;
use prflow_core::Runner;

use crate::commands::{ChecksArgs, Globals, utils};
use crate::output;
use crate::services::{ChecksOptions, ChecksOutcome, ChecksService};

/// Run the checks command.
pub fn run(globals: &Globals, args: &ChecksArgs) -> Result<()> {
    let config = utils::load_config(globals)?;
    let event = utils::load_event()?;

    let Some(repository) = event.repository().cloned() else {
        output::info(&format!("Nothing to do for '{}' events", event.name()));
        return Ok(());
    };

    let options = ChecksOptions {
        create_runs: args.create_runs.clone(),
        run_name: args.run_name.clone(),
        command: args.command.clone(),
    };

    let rt = utils::runtime()?;
    rt.block_on(async {
        let client = utils::github_client(globals, &config)?;
        let service = ChecksService::new(&client, repository.owner, repository.name);

        match service
            .handle_event(&event, &options, &Runner::new().echo(true))
            .await?
        {
            ChecksOutcome::Completed { run } => {
                output::success(&format!("Check run '{run}' passed"));
            }
            ChecksOutcome::CreatedRuns(names) => {
                output::success(&format!("Created {} check run(s)", names.len()));
                for name in &names {
                    output::detail(&format!("  {name}"));
                }
            }
            ChecksOutcome::Ignored(name) => {
                output::info(&format!("Nothing to do for '{name}' events"));
            }
        }

        Ok::<_, anyhow::Error>(())
    })
}
