//! `prflow rebase` command - Rewrite the PR's head onto its base, remotely.

use anyhow::{Context, Result};
use prflow_core::rebase::{GitHubStore, RebaseOptions, Rebaser};

use crate::commands::{Globals, RebaseArgs, utils};
use crate::output;
use crate::services::pull_request_target;

/// Run the rebase command.
pub fn run(globals: &Globals, args: &RebaseArgs) -> Result<()> {
    let config = utils::load_config(globals)?;
    let event = utils::load_event()?;

    let mut options = RebaseOptions::from(&config.rebase);
    options.scratch_name.clone_from(&args.scratch_ref);
    if args.keep_scratch {
        options.delete_scratch = false;
    }

    let rt = utils::runtime()?;
    rt.block_on(async {
        let client = utils::github_client(globals, &config)?;
        let target = pull_request_target(&client, &event).await?;
        let pr = &target.pull_request;
        let rebase_target = target.rebase_target();

        let store = GitHubStore::new(&client, &target.owner, &target.repo);
        let rebaser = Rebaser::new(&store, options);

        if args.dry_run {
            let plan = rebaser
                .plan(&rebase_target)
                .await
                .with_context(|| format!("Failed to plan rebase of PR #{}", pr.number))?;
            output::plan(&plan, &pr.head.branch);
            return Ok(());
        }

        output::info(&format!(
            "Rebasing PR #{} ({}) onto {}...",
            pr.number, pr.head.branch, pr.base.branch
        ));

        let outcome = rebaser
            .rebase(&rebase_target)
            .await
            .with_context(|| format!("Failed to rebase PR #{}", pr.number))?;

        output::outcome(&outcome);
        output::essential(&outcome.new_head_sha);
        Ok::<_, anyhow::Error>(())
    })
}
