//! Error types for prflow-github.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed or token missing.
    #[error("GitHub authentication failed - check GITHUB_TOKEN and GITHUB_TOKEN_TYPE")]
    AuthenticationFailed,

    /// Token not found.
    #[error("no GitHub token found - set GITHUB_TOKEN or run `gh auth login`")]
    NoToken,

    /// API rate limit exceeded.
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// A git reference does not exist.
    #[error("reference not found: {0}")]
    RefNotFound(String),

    /// A git reference already exists.
    #[error("reference already exists: {0}")]
    RefAlreadyExists(String),

    /// The server-side merge could not be completed cleanly.
    #[error("merge conflict merging {head} into {base}")]
    MergeConflict { base: String, head: String },

    /// API error with status code.
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A required environment variable is not set.
    #[error("{0} not set - this command must run inside a GitHub Actions workflow")]
    MissingEnv(&'static str),

    /// The webhook payload does not carry what the caller needs.
    #[error("invalid event payload: {0}")]
    InvalidEvent(String),

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error (e.g., reading the event payload or gh CLI token).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status carried by this error, if it came from an API response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed => Some(401),
            Self::RateLimited => Some(403),
            Self::RefNotFound(_) => Some(404),
            Self::MergeConflict { .. } => Some(409),
            Self::RefAlreadyExists(_) => Some(422),
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}
