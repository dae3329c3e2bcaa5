//! Layered configuration for the admin client.
//!
//! Values are resolved file → environment → CLI, each layer overriding the
//! previous one.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! timeout_secs = 10
//!
//! [auth]
//! username = "admin"
//! password = "admin"
//!
//! [list]
//! page_size = 20
//!
//! [logging]
//! format = "json"
//! filter = "facility_admin=debug"
//! ```
//!
//! # Environment
//!
//! | Variable                    | Overrides          |
//! |-----------------------------|--------------------|
//! | `FACILITY_ADMIN_API_URL`    | `api.base_url`     |
//! | `E2E_USERNAME`              | `auth.username`    |
//! | `E2E_PASSWORD`              | `auth.password`    |
//! | `FACILITY_ADMIN_PAGE_SIZE`  | `list.page_size`   |
//! | `FACILITY_ADMIN_LOG`        | `logging.filter`   |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = "facility-admin.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_credential")]
    pub username: String,
    #[serde(default = "default_credential")]
    pub password: String,
}

fn default_credential() -> String {
    "admin".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_credential(),
            password: default_credential(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    20
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directive; `None` means the built-in default.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Command-line overrides, the last configuration layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub verbose: bool,
    pub json_logs: bool,
}

/// Effective configuration after all layers are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the first layer was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
    #[serde(skip)]
    pub verbose: bool,
}

impl AdminConfig {
    /// Resolve the full configuration: file, process environment, then CLI.
    pub fn resolve(
        dir: &Path,
        explicit: Option<&Path>,
        cli: &CliOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load(dir, explicit)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Read the file layer. An explicit path must exist; the default
    /// `facility-admin.toml` in `dir` is optional.
    pub fn load(dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (dir.join(CONFIG_FILE_NAME), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut config: AdminConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.source = Some(path);
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FACILITY_ADMIN_API_URL") {
            self.api.base_url = url;
        }
        if let Some(username) = lookup("E2E_USERNAME") {
            self.auth.username = username;
        }
        if let Some(password) = lookup("E2E_PASSWORD") {
            self.auth.password = password;
        }
        if let Some(size) = lookup("FACILITY_ADMIN_PAGE_SIZE") {
            self.list.page_size = size.parse().map_err(|_| ConfigError::InvalidValue {
                key: "FACILITY_ADMIN_PAGE_SIZE".to_string(),
                message: format!("'{}' is not a page size", size),
            })?;
        }
        if let Some(filter) = lookup("FACILITY_ADMIN_LOG") {
            self.logging.filter = Some(filter);
        }
        Ok(())
    }

    pub fn apply_cli(&mut self, cli: &CliOverrides) {
        if let Some(url) = &cli.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(username) = &cli.username {
            self.auth.username = username.clone();
        }
        if let Some(password) = &cli.password {
            self.auth.password = password.clone();
        }
        if cli.json_logs {
            self.logging.format = LogFormat::Json;
        }
        self.verbose = cli.verbose;
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.list.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "list.page_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.timeout_secs)
    }

    pub fn masked_password(&self) -> String {
        "*".repeat(self.auth.password.chars().count().min(8))
    }
}
