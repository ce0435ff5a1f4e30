//! `prflow vet` command - Check the PR's labels, milestone and notes.

use anyhow::Result;
use prflow_core::{NoteParser, Vet, VetRules};

use crate::commands::{Globals, VetArgs, utils};
use crate::output;
use crate::services::{VetService, pull_request_target};

impl From<&VetArgs> for VetRules {
    fn from(args: &VetArgs) -> Self {
        Self {
            labels: args.labels.clone(),
            label_patterns: args.label_patterns.clone(),
            milestone: args.milestone.clone().filter(|m| !m.is_empty()),
            milestone_patterns: args.milestone_patterns.clone(),
            any_milestone: args.any_milestone,
            notes: args.notes.clone(),
            require_any: args.require_any,
            require_all: args.require_all,
        }
    }
}

/// Run the vet command.
pub fn run(globals: &Globals, args: &VetArgs) -> Result<()> {
    // Bad patterns fail before any network access.
    let vet = Vet::new(VetRules::from(args), NoteParser::new(&args.note_regex)?)?;

    let config = utils::load_config(globals)?;
    let event = utils::load_event()?;

    let rt = utils::runtime()?;
    rt.block_on(async {
        let client = utils::github_client(globals, &config)?;
        let target = pull_request_target(&client, &event).await?;

        let service = VetService::new(&client, target.owner.clone(), target.repo.clone());
        let message = service.vet(&vet, &target.pull_request).await?;

        output::success(&message);
        Ok::<_, anyhow::Error>(())
    })
}
