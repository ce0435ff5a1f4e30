//! Error types for prflow-core.

use crate::rebase::RebaseError;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in prflow-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rebase run failed.
    #[error(transparent)]
    Rebase(#[from] RebaseError),

    /// A pull request did not meet the configured requirements.
    #[error("{0}")]
    VetFailed(String),

    /// An invalid pattern was supplied.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An NDJSON record could not be processed.
    #[error("line {line}: {message}")]
    Record { line: usize, message: String },

    /// A command could not be started.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A command ran and exited unsuccessfully.
    #[error("'{command}' {}", describe_exit(*.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// GitHub API error.
    #[error("github error: {0}")]
    GitHub(#[from] prflow_github::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(
        || "was terminated by a signal".to_string(),
        |c| format!("exited with status {c}"),
    )
}
