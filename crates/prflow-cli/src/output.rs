//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use prflow_core::rebase::{RebaseOutcome, RebasePlan, short_sha};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Print essential machine-readable output (always prints).
///
/// Use for results that should be available for piping, like new SHAs.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Format a commit for display: dimmed short SHA and its summary line.
#[must_use]
pub fn commit_line(sha: &str, summary: &str) -> String {
    format!("{} {summary}", short_sha(sha).dimmed())
}

/// Format a SHA transition, e.g. `1a2b3c4 → 5d6e7f8`.
#[must_use]
pub fn sha_change(old: &str, new: &str) -> String {
    format!("{} → {}", short_sha(old).dimmed(), short_sha(new).cyan())
}

/// Print what a rebase run would do.
pub fn plan(plan: &RebasePlan, head_branch: &str) {
    if plan.base_unchanged() {
        info(&format!(
            "Base has not moved since {}; {head_branch} would be rewritten in place",
            short_sha(&plan.new_base_sha)
        ));
    } else {
        info(&format!(
            "Would replay {} commit(s) of {head_branch} onto {}",
            plan.commits.len(),
            short_sha(&plan.new_base_sha)
        ));
    }
    for commit in &plan.commits {
        detail(&format!("  {}", commit_line(&commit.sha, commit.summary())));
    }
}

/// Print the result of a rebase run.
pub fn outcome(outcome: &RebaseOutcome) {
    if outcome.is_unchanged() {
        info(&format!("{} is already up to date", outcome.head_branch));
        return;
    }

    for rewritten in &outcome.rewritten {
        detail(&format!(
            "  {}",
            sha_change(&rewritten.original, &rewritten.replayed)
        ));
    }
    success(&format!(
        "Rebased {} onto {} ({})",
        outcome.head_branch,
        short_sha(&outcome.new_base_sha),
        sha_change(&outcome.old_head_sha, &outcome.new_head_sha)
    ));
    if !outcome.scratch_deleted {
        warn(&format!("Scratch ref left in place: {}", outcome.scratch_ref));
    }
}
