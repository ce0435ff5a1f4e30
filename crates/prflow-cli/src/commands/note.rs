//! `prflow note` command - Expand NDJSON records into one record per note.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use prflow_core::note::{self, NoteKeys, NoteParser};

use crate::commands::NoteArgs;

/// Run the note command.
pub fn run(args: &NoteArgs) -> Result<()> {
    let parser = NoteParser::new(&args.note_regex)?;
    let keys = NoteKeys {
        body: args.body_key.clone(),
        kind: args.kind_key.clone(),
        desc: args.desc_key.clone(),
    };

    let stdout = io::stdout().lock();
    let written = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            note::extract(&parser, &keys, BufReader::new(file), stdout)?
        }
        None => note::extract(&parser, &keys, io::stdin().lock(), stdout)?,
    };

    tracing::debug!(records = written, "note command finished");
    Ok(())
}
