//
//  gerrit-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the request core and resource facades for Gerrit's
//! REST API.
//!
//! ## Architecture
//!
//! - [`client`]: [`Connection`] with authentication and request handling
//! - [`common`]: Errors, raw responses and status interpretation tables
//! - [`projects`]: Project creation and lookup
//! - [`changes`]: Revision commit and review
//! - [`groups`]: Group listing, creation, members and included groups
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gerrit_client::api::Connection;
//! use gerrit_client::config::ConnectionOptions;
//!
//! # async fn example() -> gerrit_client::Result<()> {
//! let gerrit = Connection::new(
//!     &ConnectionOptions::new("https://review.example.com").with_auth_method("digest"),
//! )?;
//!
//! let project = gerrit.create_project("tools/gerrit-client", None).await?;
//! let info = project.info().await?;
//! println!("{} (parent: {:?})", info.id, info.parent);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Facades interpret status codes through the tables in [`common`]:
//!
//! - `NotFound`: 404 on reads
//! - `AlreadyExists`: 409 on creates
//! - `Unhandled`: any status the operation has no entry for, with the body

/// Connection and HTTP request core.
pub mod client;

/// Shared error, response and status types.
pub mod common;

pub mod changes;
pub mod groups;
pub mod projects;

pub use changes::{CommitInfo, Revision};
pub use client::{Connection, Method};
pub use common::{GerritError, RawResponse, Result};
pub use groups::{AccountInfo, Group, GroupInfo, GroupRecord, Groups};
pub use projects::{Project, ProjectInfo};
