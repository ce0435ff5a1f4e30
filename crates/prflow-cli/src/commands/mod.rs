//! CLI command definitions and handlers.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use prflow_github::MergeMethod;

pub mod checks;
pub mod completions;
pub mod exec;
pub mod merge;
pub mod note;
pub mod rebase;
pub mod say;
pub mod utils;
pub mod vet;

/// prflow - pull request automation for GitHub Actions workflows.
///
/// Commands act on the pull request or issue of the event that triggered
/// the workflow (`GITHUB_EVENT_NAME` / `GITHUB_EVENT_PATH`) and
/// authenticate with `GITHUB_TOKEN`.
#[derive(Parser)]
#[command(name = "prflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: $PRFLOW_CONFIG, then .github/prflow.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub API base URL, for GitHub Enterprise.
    #[arg(long, global = true, value_name = "URL")]
    pub github_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every subcommand.
    #[must_use]
    pub fn globals(&self) -> Globals {
        Globals {
            config: self.config.clone(),
            github_base_url: self.github_base_url.clone(),
        }
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub config: Option<PathBuf>,
    pub github_base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebase the pull request's head branch onto its base, server-side.
    Rebase(RebaseArgs),

    /// Merge the pull request once its required statuses pass.
    Merge(MergeArgs),

    /// Check the pull request's labels, milestone and notes.
    Vet(VetArgs),

    /// Expand NDJSON records into one record per note in their body.
    Note(NoteArgs),

    /// Comment on the issue or pull request.
    Say(SayArgs),

    /// Run a command and report it as a commit status and check run.
    Exec(ExecArgs),

    /// Drive check suites and runs from check events.
    Checks(ChecksArgs),

    /// Generate shell completions.
    #[command(alias = "comp")]
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RebaseArgs {
    /// Show the commits that would be replayed without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Exact scratch ref name to use instead of a generated one.
    #[arg(long, value_name = "BRANCH")]
    pub scratch_ref: Option<String>,

    /// Keep the scratch ref after a successful run.
    #[arg(long)]
    pub keep_scratch: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Merge method: merge, squash or rebase.
    #[arg(long, default_value = "merge")]
    pub method: MergeMethod,

    /// Merge even if required statuses are not passing.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct VetArgs {
    /// Required label. Repeatable.
    #[arg(long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Pattern at least one label must match. Repeatable.
    #[arg(long = "label-match", value_name = "REGEX")]
    pub label_patterns: Vec<String>,

    /// Exact milestone title.
    #[arg(long)]
    pub milestone: Option<String>,

    /// Pattern the milestone title must match. Repeatable.
    #[arg(long = "milestone-match", value_name = "REGEX")]
    pub milestone_patterns: Vec<String>,

    /// Require a milestone to be set.
    #[arg(long)]
    pub any_milestone: bool,

    /// Title of a note that must appear in the description. Repeatable.
    #[arg(long = "note", value_name = "TITLE")]
    pub notes: Vec<String>,

    /// Pattern of a note: group 1 is the title, group 2 the body.
    #[arg(long, value_name = "REGEX", default_value = prflow_core::note::DEFAULT_NOTE_PATTERN)]
    pub note_regex: String,

    /// Fail unless at least one criterion passes.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub require_any: bool,

    /// Fail if any criterion fails.
    #[arg(long)]
    pub require_all: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NoteArgs {
    /// NDJSON input file (default: stdin).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Pattern of a note: group 1 is the title, group 2 the body.
    #[arg(long, value_name = "REGEX", default_value = prflow_core::note::DEFAULT_NOTE_PATTERN)]
    pub note_regex: String,

    /// Field holding the text to search.
    #[arg(long, default_value = "body")]
    pub body_key: String,

    /// Field receiving the note title.
    #[arg(long, default_value = "kind")]
    pub kind_key: String,

    /// Field receiving the note body.
    #[arg(long, default_value = "description")]
    pub desc_key: String,
}

#[derive(Args, Debug, Clone)]
pub struct SayArgs {
    /// Comment body.
    #[arg(long)]
    pub body: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExecArgs {
    /// Check run to report the result on.
    #[arg(long, value_name = "NAME")]
    pub check_run_name: Option<String>,

    /// Commit status context; enables status reporting.
    #[arg(long, value_name = "CONTEXT")]
    pub status_context: Option<String>,

    /// Commit status description.
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub status_description: String,

    /// Commit status link target.
    #[arg(long, value_name = "URL")]
    pub status_target_url: Option<String>,

    /// Command to run, after `--`.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ChecksArgs {
    /// Check run created on `check_suite` events. Repeatable.
    #[arg(long = "create-run", value_name = "NAME")]
    pub create_runs: Vec<String>,

    /// Check run updated with the command's result.
    #[arg(long = "run", value_name = "NAME")]
    pub run_name: Option<String>,

    /// Command to run, after `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_vet_require_any_defaults_true() {
        let cli = Cli::try_parse_from(["prflow", "vet"]);
        let Ok(Cli {
            command: Commands::Vet(args),
            ..
        }) = cli
        else {
            panic!("expected vet command");
        };
        assert!(args.require_any);
        assert!(!args.require_all);

        let cli = Cli::try_parse_from(["prflow", "vet", "--require-any", "false"]);
        let Ok(Cli {
            command: Commands::Vet(args),
            ..
        }) = cli
        else {
            panic!("expected vet command");
        };
        assert!(!args.require_any);
    }

    #[test]
    fn test_exec_collects_trailing_command() {
        let cli = Cli::try_parse_from([
            "prflow",
            "exec",
            "--status-context",
            "ci/test",
            "--",
            "make",
            "test",
            "-j4",
        ]);
        let Ok(Cli {
            command: Commands::Exec(args),
            ..
        }) = cli
        else {
            panic!("expected exec command");
        };
        assert_eq!(args.status_context.as_deref(), Some("ci/test"));
        assert_eq!(args.command, vec!["make", "test", "-j4"]);
    }

    #[test]
    fn test_merge_method_parsed() {
        let cli = Cli::try_parse_from(["prflow", "merge", "--method", "squash"]);
        let Ok(Cli {
            command: Commands::Merge(args),
            ..
        }) = cli
        else {
            panic!("expected merge command");
        };
        assert_eq!(args.method, MergeMethod::Squash);
        assert!(Cli::try_parse_from(["prflow", "merge", "--method", "octopus"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "prflow",
            "say",
            "--body",
            "hi",
            "--github-base-url",
            "https://ghe.example.com/api/v3",
            "-q",
        ]);
        let Ok(cli) = cli else {
            panic!("expected parse success");
        };
        assert!(cli.quiet);
        assert_eq!(
            cli.globals().github_base_url.as_deref(),
            Some("https://ghe.example.com/api/v3")
        );
    }
}
