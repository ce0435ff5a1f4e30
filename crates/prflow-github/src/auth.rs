//! Authentication handling for GitHub API.

use std::process::Command;

use secrecy::SecretString;

use crate::error::{Error, Result};

/// Authentication method for GitHub API.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Use token from gh CLI.
    GhCli,

    /// Use token from environment variable.
    EnvVar(String),

    /// Use a specific token.
    Token(SecretString),
}

impl Auth {
    /// Create auth from the first available method.
    ///
    /// Tries in order: `GITHUB_TOKEN` env var, gh CLI.
    #[must_use]
    pub fn auto() -> Self {
        if std::env::var("GITHUB_TOKEN").is_ok() {
            Self::EnvVar("GITHUB_TOKEN".into())
        } else {
            Self::GhCli
        }
    }

    /// Resolve the authentication to a token.
    ///
    /// # Errors
    /// Returns error if token cannot be obtained.
    pub fn resolve(&self) -> Result<SecretString> {
        match self {
            Self::GhCli => get_gh_token(),
            Self::EnvVar(var) => match std::env::var(var) {
                Ok(token) if !token.is_empty() => Ok(SecretString::from(token)),
                _ => Err(Error::NoToken),
            },
            Self::Token(t) => Ok(t.clone()),
        }
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::auto()
    }
}

/// Scheme used in the `Authorization` header.
///
/// Installation tokens handed to workflows are sent as `token <value>`;
/// personal access tokens and app JWTs use `Bearer <value>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenType {
    /// `Authorization: token <value>`.
    #[default]
    Token,
    /// `Authorization: Bearer <value>`.
    Bearer,
}

impl TokenType {
    /// Read the scheme from `GITHUB_TOKEN_TYPE`, defaulting to [`TokenType::Token`].
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("GITHUB_TOKEN_TYPE")
            .ok()
            .map_or_else(Self::default, |v| Self::parse(&v))
    }

    /// Parse a scheme name; anything other than `bearer` means `token`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("bearer") {
            Self::Bearer
        } else {
            Self::Token
        }
    }

    /// Header prefix for this scheme.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Bearer => "Bearer",
        }
    }
}

/// Get GitHub token from gh CLI.
fn get_gh_token() -> Result<SecretString> {
    let output = Command::new("gh").args(["auth", "token"]).output()?;

    if !output.status.success() {
        return Err(Error::NoToken);
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if token.is_empty() {
        return Err(Error::NoToken);
    }

    Ok(SecretString::from(token))
}
