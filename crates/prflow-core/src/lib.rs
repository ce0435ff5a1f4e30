//! # prflow-core
//!
//! Core library for prflow: the remote rebase engine, pull request
//! compliance checks, note extraction, the command runner, and
//! configuration.

pub mod config;
pub mod error;
pub mod note;
pub mod rebase;
pub mod runner;
pub mod traits;
pub mod vet;

pub use config::{Config, GitHubConfig, RebaseConfig};
pub use error::{Error, Result};
pub use note::{Note, NoteKeys, NoteParser};
pub use runner::{CommandOutput, Runner};
pub use traits::{ObjectStore, StoreResult};
pub use vet::{Vet, VetReport, VetRules};
