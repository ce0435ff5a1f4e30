//! Service layer for business logic with dependency injection.
//!
//! This module contains services that encapsulate business logic and accept
//! trait-based dependencies, enabling testing with mock implementations.

pub mod checks;
pub mod exec;
pub mod merge;
pub mod say;
pub mod target;
pub mod vet;

#[cfg(test)]
pub mod test_mocks;

pub use checks::{ChecksOptions, ChecksOutcome, ChecksService, Execution};
pub use exec::{ExecRequest, ExecService, StatusReport};
pub use merge::{MergeDecision, MergeService};
pub use target::{IssueTarget, PullRequestTarget, issue_target, pull_request_target};
pub use vet::VetService;
