//
//  gerrit-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module holds the construction parameters of a
//! [`Connection`](crate::api::Connection) and an optional TOML file that
//! stores them for named servers.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/gerrit-client/config.toml`
//! - **macOS**: `~/Library/Application Support/gerrit-client/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\gerrit-client\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [servers.review]
//! url = "https://review.example.com"
//! auth_method = "digest"
//!
//! [servers.staging]
//! url = "https://review-staging.example.com/"
//! auth_id = "ci-bot"
//! auth_pw = "http-password"
//! ```
//!
//! Servers without `auth_id`/`auth_pw` fall back to `~/.netrc`.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::common::{GerritError, Result};

/// Parameters recognized when constructing a connection.
///
/// # Fields
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `url` | required | Base URL of the Gerrit server |
/// | `auth_type` | `"http"` | Authentication type, only `http` is implemented |
/// | `auth_id` | none | Explicit username |
/// | `auth_pw` | none | Explicit HTTP password |
/// | `auth_method` | `"basic"` | `basic` or `digest` |
///
/// Selectors stay strings so that an unsupported value is reported by
/// [`Connection::new`](crate::api::Connection::new) rather than rejected at
/// deserialization time.
///
/// # Example
///
/// ```rust
/// use gerrit_client::config::ConnectionOptions;
///
/// let options = ConnectionOptions::new("https://review.example.com/")
///     .with_credentials("jdoe", "secret")
///     .with_auth_method("digest");
/// assert_eq!(options.auth_method.as_deref(), Some("digest"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// Base URL of the Gerrit server.
    pub url: String,

    /// Authentication type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,

    /// Explicit username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_id: Option<String>,

    /// Explicit HTTP password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_pw: Option<String>,

    /// Authentication method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,
}

impl ConnectionOptions {
    /// Options for `url` with every other field unset.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets explicit credentials.
    pub fn with_credentials(mut self, id: impl Into<String>, pw: impl Into<String>) -> Self {
        self.auth_id = Some(id.into());
        self.auth_pw = Some(pw.into());
        self
    }

    /// Sets the authentication method (`basic` or `digest`).
    pub fn with_auth_method(mut self, method: impl Into<String>) -> Self {
        self.auth_method = Some(method.into());
        self
    }
}

/// Named server definitions persisted as TOML.
///
/// # Example
///
/// ```rust
/// use gerrit_client::config::Config;
///
/// let config: Config = toml::from_str(r#"
///     [servers.review]
///     url = "https://review.example.com"
/// "#).unwrap();
/// assert_eq!(config.server("review").unwrap().url, "https://review.example.com");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server name to connection options.
    #[serde(default)]
    pub servers: HashMap<String, ConnectionOptions>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// Returns the default (empty) configuration when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or the default if it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            toml::from_str(&content).map_err(|err| {
                GerritError::Config(format!("{}: {}", path.display(), err))
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|err| GerritError::Config(err.to_string()))?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "gerrit-client").ok_or_else(|| {
            GerritError::Config("Could not determine config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the options of the server called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GerritError::Config`] if no such server is defined.
    pub fn server(&self, name: &str) -> Result<&ConnectionOptions> {
        self.servers
            .get(name)
            .ok_or_else(|| GerritError::Config(format!("No server named '{}' configured", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.servers.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.servers.insert(
            "review".to_string(),
            ConnectionOptions::new("https://review.example.com").with_auth_method("digest"),
        );
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let options = loaded.server("review").unwrap();
        assert_eq!(options.url, "https://review.example.com");
        assert_eq!(options.auth_method.as_deref(), Some("digest"));
        assert!(options.auth_id.is_none());
    }

    #[test]
    fn test_unknown_server() {
        let config = Config::default();
        assert!(matches!(config.server("nope"), Err(GerritError::Config(_))));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "servers = 3").unwrap();

        match Config::load_from(&path) {
            Err(GerritError::Config(message)) => assert!(message.contains("config.toml")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
