//! Configuration module for feedgrid
//!
//! Settings come from `~/.config/feedgrid/config.toml`; feed credentials and
//! the auth URL may be overridden through environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_GRAPH_BASE_URL;
use crate::error::FeedError;
use crate::feed::FeedCredentials;
use crate::paths;
use crate::theme::Theme;

/// Environment variables for the account ID, first match wins
const ACCOUNT_ID_VARS: &[&str] = &["FEEDGRID_ACCOUNT_ID", "INSTAGRAM_USER_ID"];
/// Environment variables for the access token, first match wins
const ACCESS_TOKEN_VARS: &[&str] = &["FEEDGRID_ACCESS_TOKEN", "INSTAGRAM_ACCESS_TOKEN"];
/// Environment variable for the auth API base URL
const AUTH_URL_VARS: &[&str] = &["FEEDGRID_AUTH_URL"];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme
    #[serde(default)]
    pub theme: Theme,

    /// Upstream account ID whose media is shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Access token for the Graph API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Graph API base URL
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,

    /// Auth API base URL (enables the login/signup screens)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,

    /// Detail requests in flight per load (1 = strictly sequential)
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Allow handing posts to the system share/open handler
    #[serde(default = "default_true")]
    pub share_enabled: bool,

    /// Render the full-size image in the detail overlay
    #[serde(default = "default_true")]
    pub show_images: bool,
}

fn default_graph_base_url() -> String {
    DEFAULT_GRAPH_BASE_URL.to_string()
}

fn default_detail_concurrency() -> usize {
    1
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            account_id: None,
            access_token: None,
            graph_base_url: default_graph_base_url(),
            auth_url: None,
            detail_concurrency: default_detail_concurrency(),
            request_timeout_secs: default_request_timeout(),
            share_enabled: default_true(),
            show_images: default_true(),
        }
    }
}

/// Settings the async worker needs to talk to the Graph API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Graph API base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Detail concurrency (always >= 1)
    pub concurrency: usize,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific path (no environment overrides)
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .find(|v| !v.trim().is_empty())
        };

        if let Some(id) = first(ACCOUNT_ID_VARS) {
            self.account_id = Some(id);
        }
        if let Some(token) = first(ACCESS_TOKEN_VARS) {
            self.access_token = Some(token);
        }
        if let Some(url) = first(AUTH_URL_VARS) {
            self.auth_url = Some(url);
        }
    }

    /// Feed credentials, or `ConfigMissing` naming the absent setting
    pub fn feed_credentials(&self) -> Result<FeedCredentials, FeedError> {
        let credentials = FeedCredentials::new(
            self.account_id.as_deref().unwrap_or_default().trim(),
            self.access_token.as_deref().unwrap_or_default().trim(),
        );
        credentials.check()?;
        Ok(credentials)
    }

    /// Settings for Graph API requests
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.graph_base_url.clone(),
            timeout: self.request_timeout(),
            concurrency: self.detail_concurrency.max(1),
        }
    }

    /// HTTP request timeout
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Auth API base URL, if authentication is enabled
    pub fn auth_url(&self) -> Option<&str> {
        self.auth_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Persist the chosen theme without writing environment overrides to disk
    pub fn persist_theme(theme: Theme) -> Result<()> {
        let path = Self::default_path()?;
        let mut on_disk = Self::load_from(&path)?;
        if on_disk.theme == theme {
            return Ok(());
        }
        on_disk.theme = theme;
        on_disk.save_to(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.graph_base_url, DEFAULT_GRAPH_BASE_URL);
        assert_eq!(config.detail_concurrency, 1);
        assert!(config.share_enabled);
        assert!(config.auth_url().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
account_id = "17841400000"
access_token = "IGQV"
detail_concurrency = 4
auth_url = "http://localhost:3000/api"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let creds = config.feed_credentials().unwrap();
        assert_eq!(creds.account_id, "17841400000");
        assert_eq!(config.fetch_settings().concurrency, 4);
        assert_eq!(config.auth_url(), Some("http://localhost:3000/api"));
    }

    #[test]
    fn test_missing_credentials() {
        let config = Config::default();
        assert_eq!(
            config.feed_credentials().unwrap_err(),
            FeedError::ConfigMissing("account_id")
        );

        let config = Config {
            account_id: Some("1".into()),
            ..Config::default()
        };
        assert_eq!(
            config.feed_credentials().unwrap_err(),
            FeedError::ConfigMissing("access_token")
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("INSTAGRAM_USER_ID", "legacy-id"),
            ("FEEDGRID_ACCESS_TOKEN", "tok"),
            ("INSTAGRAM_ACCESS_TOKEN", "ignored"),
            ("FEEDGRID_AUTH_URL", "  "),
        ]);

        let mut config = Config::default();
        config.apply_env_with(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.account_id.as_deref(), Some("legacy-id"));
        assert_eq!(config.access_token.as_deref(), Some("tok"));
        assert!(config.auth_url.is_none());
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let config = Config {
            detail_concurrency: 0,
            ..Config::default()
        };
        assert_eq!(config.fetch_settings().concurrency, 1);
    }

    #[test]
    fn test_save_roundtrip_keeps_theme() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            theme: Theme::default().next(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, config.theme);
        assert!(loaded.access_token.is_none());
    }
}
