//
//  gerrit-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level file operations used by [`Config`](super::Config): reading the
//! raw TOML text and writing it back, creating parent directories as needed.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use gerrit_client::config::{config_exists, read_config_file, write_config_file};
//!
//! let path = Path::new("/tmp/gerrit-client/config.toml");
//! if !config_exists(path) {
//!     write_config_file(path, "[servers.review]\nurl = \"https://review.example.com\"\n")?;
//! }
//! let content = read_config_file(path)?;
//! # Ok::<(), gerrit_client::GerritError>(())
//! ```

use std::path::Path;

use crate::api::common::Result;

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// Returns [`GerritError::Io`](crate::GerritError::Io) if the file cannot be
/// read or is not valid UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Writes content to a configuration file, creating parent directories.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Checks whether a configuration file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.exists()
}
