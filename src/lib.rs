//
//  gerrit-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit Client Library
//!
//! An asynchronous client for the Gerrit Code Review REST API.
//!
//! ## Overview
//!
//! A [`Connection`] holds the base URL, default headers and the
//! authentication strategy of one server. Resource facades borrow it and
//! translate domain operations (create a project, list a group's members,
//! review a revision) into REST calls, interpreting the status codes of
//! each operation.
//!
//! ## Features
//!
//! - **Credential Resolution**: explicit `auth_id`/`auth_pw`, or `~/.netrc`
//! - **HTTP Basic and Digest**: Digest is answered on the server's challenge
//! - **Projects**: create, fetch
//! - **Changes**: revision commit, review
//! - **Groups**: list, create, field projection, members, included groups
//! - **Named Servers**: optional TOML configuration
//!
//! ## Module Structure
//!
//! - [`api`]: Connection, request core and resource facades
//! - [`auth`]: Credentials, `.netrc` lookup and Digest authentication
//! - [`config`]: Connection options and the configuration file
//! - [`util`]: Path segment encoding and argument checks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gerrit_client::{Connection, ConnectionOptions};
//!
//! # async fn example() -> gerrit_client::Result<()> {
//! let gerrit = Connection::new(&ConnectionOptions::new("https://review.example.com"))?;
//!
//! let created = gerrit
//!     .create_group("Release Managers", Some(&serde_json::json!({"visible_to_all": true})))
//!     .await?;
//! println!("{:?}", created.and_then(|group| group.get("id").cloned()));
//!
//! let group = gerrit.get_group("Release Managers")?;
//! group.include(&["Administrators"]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime
//!
//! Every operation is an `async fn` built on `reqwest`, so callers drive it
//! from a Tokio runtime (for example `#[tokio::main]`, or
//! `Runtime::block_on` in synchronous code). The crate never spawns tasks
//! and sets no timeout; wrap calls in `tokio::time::timeout` where needed.
//!
//! ## Logging
//!
//! Every request is reported through `tracing` at `debug` level with its
//! method, URL and status. Install a subscriber in the application to see
//! them.

/// Connection, request core and resource facades.
pub mod api;

/// Authentication and credential management.
///
/// - Explicit credentials or `.netrc` lookup by host
/// - HTTP Basic and Digest strategies
pub mod auth;

/// Connection options and configuration file management.
pub mod config;

/// Utility functions and helpers.
pub mod util;

pub use api::{Connection, GerritError, Method, Result};
pub use config::{Config, ConnectionOptions};

/// Library version, derived from Cargo.toml at compile time.
///
/// Sent in the `User-Agent` header as `gerrit-client/<VERSION>`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
