use anyhow::{Context, Result};
use prflow_core::Config;
use prflow_core::config::CONFIG_ENV;
use prflow_github::{Auth, Event, GitHubClient};

use super::Globals;

/// Load the config file selected by `--config` or `PRFLOW_CONFIG`.
pub fn load_config(globals: &Globals) -> Result<Config> {
    let env_path = std::env::var(CONFIG_ENV).ok();
    let path = Config::locate(globals.config.as_deref(), env_path.as_deref());
    Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}

/// API base URL: the flag, else the config file, else public GitHub.
pub fn api_url<'a>(globals: &'a Globals, config: &'a Config) -> &'a str {
    globals
        .github_base_url
        .as_deref()
        .or(config.github.api_url.as_deref())
        .unwrap_or(GitHubClient::DEFAULT_API_URL)
}

/// Create an authenticated GitHub client.
pub fn github_client(globals: &Globals, config: &Config) -> Result<GitHubClient> {
    let auth = Auth::auto();
    GitHubClient::with_base_url(&auth, api_url(globals, config))
        .context("Failed to create GitHub client")
}

/// Load the event that triggered the current workflow run.
pub fn load_event() -> Result<Event> {
    Event::from_env().context("Failed to load the workflow event")
}

/// Runtime for driving the async services from a synchronous command.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}
