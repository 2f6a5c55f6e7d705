//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Which endpoint base the process talks to, fixed at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Backend running locally alongside the client
    #[default]
    Local,
    /// Deployed backend reached via `remote_base_url`
    Remote,
}

/// Configuration for parley
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deployment mode (local or remote)
    pub mode: DeployMode,
    /// Base URL of the deployed backend, used in remote mode
    pub remote_base_url: Option<String>,
    /// Developer (system) prompt override
    pub developer_prompt: Option<String>,
    /// Model override forwarded with each exchange
    pub model: Option<String>,
    /// Credential (alternative to the environment variable)
    pub api_key: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parley")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for PARLEY_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("PARLEY_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        Config::default().save()?;
        Ok(path)
    }

    /// Endpoint base for the configured mode.
    ///
    /// `None` means remote mode without a configured origin — the caller
    /// reports that as a startup error.
    pub fn base_url(&self) -> Option<String> {
        match self.mode {
            DeployMode::Local => Some(parley_api::client::LOCAL_BASE_URL.to_string()),
            DeployMode::Remote => self.remote_base_url.clone(),
        }
    }

    /// Credential lookup: config first, then environment
    pub fn get_api_key(&self) -> Option<String> {
        if self.api_key.is_some() {
            return self.api_key.clone();
        }
        std::env::var("PARLEY_API_KEY").ok()
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# parley configuration file
# Place at ~/.config/parley/config.toml (Linux/Mac) or %APPDATA%\parley\config.toml (Windows)

# Deployment mode: "local" talks to http://localhost:8000/api,
# "remote" talks to remote_base_url
mode = "local"

# Base URL of the deployed backend (remote mode only)
# remote_base_url = "https://chat.example.com/api"

# Developer (system) prompt sent with every exchange
# developer_prompt = "You are a helpful assistant."

# Model forwarded with each exchange (server default when unset)
# model = "gpt-4.1-mini"

# Credential (optional - the PARLEY_API_KEY environment variable is
# recommended instead for security)
# api_key = "sk-..."
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_mode_uses_fixed_base() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url().as_deref(), Some("http://localhost:8000/api"));
    }

    #[test]
    fn test_remote_mode_requires_origin() {
        let cfg = Config {
            mode: DeployMode::Remote,
            ..Default::default()
        };
        assert_eq!(cfg.base_url(), None);

        let cfg = Config {
            mode: DeployMode::Remote,
            remote_base_url: Some("https://chat.example.com/api".into()),
            ..Default::default()
        };
        assert_eq!(
            cfg.base_url().as_deref(),
            Some("https://chat.example.com/api")
        );
    }

    #[test]
    fn test_mode_parses_from_toml() {
        let cfg: Config = toml::from_str(r#"mode = "remote""#).unwrap();
        assert_eq!(cfg.mode, DeployMode::Remote);

        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.mode, DeployMode::Local);
    }
}
