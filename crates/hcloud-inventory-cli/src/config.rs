//! Configuration loading and credential resolution
//!
//! The API token is taken from `HETZNER_CLOUD_KEY` if set. Otherwise it comes
//! from `config.json` in the user's configuration directory, either directly
//! (`token`) or from the output of a helper command (`command`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use hcloud_inventory_client::{ClientOptions, DEFAULT_ENDPOINT};
use hcloud_inventory_exec::{CommandExecutor, CommandLine, ExecError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "HETZNER_CLOUD_KEY";
/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "HCLOUD_INVENTORY_CONFIG";
/// Environment variable overriding the API endpoint
pub const ENDPOINT_ENV: &str = "HCLOUD_ENDPOINT";
/// Config file location relative to the user's configuration directory
pub const CONFIG_FILE: &str = "ansible-hcloud-inventory/config.json";

/// Errors while loading configuration or resolving the token
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No platform configuration directory could be determined
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    /// Config file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Neither `command` nor `token` is set
    #[error("no API token: set HETZNER_CLOUD_KEY or `token`/`command` in {}", .path.display())]
    MissingToken { path: PathBuf },

    /// Token command failed
    #[error("token command failed: {0}")]
    Command(#[from] ExecError),
}

/// Contents of `config.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Command whose stdout is the API token, split on whitespace
    #[serde(default)]
    pub command: Option<String>,
    /// API token
    #[serde(default)]
    pub token: Option<String>,
    /// API base URL
    #[serde(default)]
    pub endpoint: Option<String>,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Token command timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub command_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the API token from this config
    ///
    /// `command` wins over `token`. Command output is used verbatim.
    ///
    /// # Errors
    /// Returns an error if the command fails or no token is configured.
    pub async fn credentials(
        &self,
        path: &Path,
        executor: &dyn CommandExecutor,
    ) -> Result<Credentials, ConfigError> {
        if let Some(command) = self.command.as_deref().filter(|c| !c.is_empty()) {
            let cmd = CommandLine::parse(command)?;
            info!(
                program = %cmd.program(),
                executor = executor.executor_type(),
                "fetching API token from command"
            );
            let token = executor
                .stdout_of(&cmd, Duration::from_secs(self.command_timeout_secs))
                .await?;
            return Ok(Credentials::new(token, TokenSource::Command));
        }

        match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => Ok(Credentials::new(token, TokenSource::ConfigFile)),
            None => Err(ConfigError::MissingToken {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Where the token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    ConfigFile,
    Command,
}

/// Resolved API credentials
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub source: TokenSource,
}

impl Credentials {
    pub fn new(token: impl Into<String>, source: TokenSource) -> Self {
        Self {
            token: token.into(),
            source,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Everything needed to talk to the API
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub client: ClientOptions,
}

/// Path of the config file, honouring `HCLOUD_INVENTORY_CONFIG`
///
/// # Errors
/// Returns an error if no configuration directory exists for this platform.
pub fn config_path(env: &dyn Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = env(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Resolve token and client settings
///
/// The config file is only read when `HETZNER_CLOUD_KEY` is unset or empty.
/// `HCLOUD_ENDPOINT` overrides the endpoint from the config file.
///
/// # Errors
/// Returns an error if the config file is needed but unusable, or if the
/// token command fails.
#[instrument(skip_all)]
pub async fn resolve(
    env: &dyn Fn(&str) -> Option<String>,
    executor: &dyn CommandExecutor,
) -> Result<Settings, ConfigError> {
    let endpoint_override = env(ENDPOINT_ENV).filter(|e| !e.is_empty());

    if let Some(token) = env(TOKEN_ENV).filter(|t| !t.is_empty()) {
        debug!("using API token from {TOKEN_ENV}");
        return Ok(Settings {
            credentials: Credentials::new(token, TokenSource::Environment),
            client: ClientOptions {
                endpoint: endpoint_override.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                ..ClientOptions::default()
            },
        });
    }

    let path = config_path(env)?;
    debug!(path = %path.display(), "loading config file");
    let config = Config::load(&path)?;
    let credentials = config.credentials(&path, executor).await?;

    Ok(Settings {
        credentials,
        client: ClientOptions {
            endpoint: endpoint_override
                .or(config.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: Duration::from_secs(config.timeout_secs),
        },
    })
}
