//! Configuration structures for the document service and output.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MortgageError, Result};

/// Default document service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.veryfi.com/api/v8/partner/documents/";

/// Category hints sent with every submission.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["mortgage", "financial", "bank statement"];

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageConfig {
    /// Document service configuration.
    pub service: ServiceConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Document service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Endpoint that accepts document submissions.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Category hints passed to the service.
    pub categories: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,

    /// Append loan analysis to text output.
    pub analyze: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            analyze: false,
        }
    }
}

impl MortgageConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mortgage")
        .join("config.json")
}

/// Credentials for the document service.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("username", &self.username)
            .field("api_key", &"***")
            .finish()
    }
}

impl Credentials {
    pub const CLIENT_ID_VAR: &'static str = "VERYFI_CLIENT_ID";
    pub const CLIENT_SECRET_VAR: &'static str = "VERYFI_CLIENT_SECRET";
    pub const USERNAME_VAR: &'static str = "VERYFI_USERNAME";
    pub const API_KEY_VAR: &'static str = "VERYFI_API_KEY";

    /// Load credentials from the environment, reading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    ///
    /// Blank values count as missing. The error names every missing variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut get = |name: &'static str| match lookup(name).filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => {
                missing.push(name);
                String::new()
            }
        };

        let credentials = Self {
            client_id: get(Self::CLIENT_ID_VAR),
            client_secret: get(Self::CLIENT_SECRET_VAR),
            username: get(Self::USERNAME_VAR),
            api_key: get(Self::API_KEY_VAR),
        };

        if !missing.is_empty() {
            return Err(MortgageError::Config(format!(
                "missing document service credentials: {}. Set them in the environment or a .env file",
                missing.join(", ")
            )));
        }

        Ok(credentials)
    }

    /// Value of the `AUTHORIZATION` header.
    pub fn authorization(&self) -> String {
        format!("apikey {}:{}", self.username, self.api_key)
    }
}
