//! `prflow merge` command - Merge the PR once its required statuses pass.

use anyhow::Result;

use crate::commands::{Globals, MergeArgs, utils};
use crate::output;
use crate::services::{MergeDecision, MergeService, pull_request_target};

/// Run the merge command.
pub fn run(globals: &Globals, args: &MergeArgs) -> Result<()> {
    let config = utils::load_config(globals)?;
    let event = utils::load_event()?;

    let rt = utils::runtime()?;
    rt.block_on(async {
        let client = utils::github_client(globals, &config)?;
        let target = pull_request_target(&client, &event).await?;
        let pr = &target.pull_request;

        let service = MergeService::new(&client, target.owner.clone(), target.repo.clone());
        match service.merge(pr, args.method, args.force).await? {
            MergeDecision::Merged(result) => {
                output::success(&format!("Merged PR #{}", pr.number));
                output::essential(&result.sha);
            }
            MergeDecision::Skipped { pending } => {
                output::info(&format!(
                    "Not merging PR #{}: required statuses not passing",
                    pr.number
                ));
                for context in &pending {
                    output::detail(&format!("  {context}"));
                }
            }
        }

        Ok::<_, anyhow::Error>(())
    })
}
