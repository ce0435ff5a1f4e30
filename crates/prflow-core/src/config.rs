//! Configuration management for prflow.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Repository-relative location checked when no config path is given.
pub const DEFAULT_CONFIG_PATH: &str = ".github/prflow.toml";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "PRFLOW_CONFIG";

/// prflow configuration, usually loaded from `.github/prflow.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub-specific settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Rebase engine settings.
    #[serde(default)]
    pub rebase: RebaseConfig,
}

impl Config {
    /// Load config from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Pick the config file to use: an explicit path, else `env_path`
    /// (the value of `PRFLOW_CONFIG`), else the default location.
    #[must_use]
    pub fn locate(explicit: Option<&Path>, env_path: Option<&str>) -> PathBuf {
        explicit.map_or_else(
            || {
                env_path
                    .filter(|p| !p.is_empty())
                    .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
            },
            Path::to_path_buf,
        )
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| std::io::Error::other(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// GitHub-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GitHubConfig {
    /// Custom API URL for GitHub Enterprise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Rebase engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebaseConfig {
    /// Prefix of scratch ref names.
    #[serde(default = "default_scratch_prefix")]
    pub scratch_prefix: String,

    /// Delete the scratch ref after a successful run.
    #[serde(default = "default_delete_scratch")]
    pub delete_scratch: bool,
}

impl Default for RebaseConfig {
    fn default() -> Self {
        Self {
            scratch_prefix: default_scratch_prefix(),
            delete_scratch: default_delete_scratch(),
        }
    }
}

fn default_scratch_prefix() -> String {
    "prflow/rebase".into()
}

const fn default_delete_scratch() -> bool {
    true
}
