//! `prflow say` command - Comment on the issue or PR of the event.

use anyhow::Result;

use crate::commands::{Globals, SayArgs, utils};
use crate::output;
use crate::services::{issue_target, say};

/// Run the say command.
pub fn run(globals: &Globals, args: &SayArgs) -> Result<()> {
    let config = utils::load_config(globals)?;
    let event = utils::load_event()?;
    let target = issue_target(&event)?;

    let rt = utils::runtime()?;
    rt.block_on(async {
        let client = utils::github_client(globals, &config)?;
        say::comment(&client, &target, &args.body).await?;
        output::success(&format!("Commented on #{}", target.number));
        Ok::<_, anyhow::Error>(())
    })
}
