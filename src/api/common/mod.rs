//
//  gerrit-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Gerrit REST API
//!
//! This module provides the types shared by the request core and every
//! resource facade: the error taxonomy, the raw response value returned by
//! [`Connection::call`](crate::api::Connection::call), and the JSON decoding
//! helper that understands Gerrit's response framing.
//!
//! # Overview
//!
//! - [`GerritError`] - Unified error type for all operations
//! - [`RawResponse`] - Status code and body of a single HTTP exchange
//! - [`decode_json`] - JSON decoding with the `)]}'` prefix stripped
//! - Status tables (re-exported from the [`status`] submodule)
//!
//! # Example
//!
//! ```rust
//! use gerrit_client::api::common::{GerritError, RawResponse, READ};
//!
//! let response = RawResponse::new(404, "Not found: Administrators");
//! match READ.interpret(&response) {
//!     Err(GerritError::NotFound(body)) => assert_eq!(body, "Not found: Administrators"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use serde::de::DeserializeOwned;
use thiserror::Error;

mod status;

pub use status::*;

/// Prefix Gerrit puts in front of every JSON response body to defeat
/// cross-site script inclusion.
pub const XSSI_PREFIX: &str = ")]}'";

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GerritError>;

/// Unified error type for all Gerrit client operations.
///
/// # Variants
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `CredentialsNotFound` | No netrc entry for the host, or partial explicit credentials |
/// | `NotImplemented` | Unsupported auth type, auth method or digest challenge |
/// | `AlreadyExists` | A create-style operation answered 409 |
/// | `NotFound` | A read/list operation answered 404 |
/// | `Unhandled` | Any status the operation does not expect |
/// | `InvalidArgument` | Local validation failed, before any network call |
/// | `UnsupportedMethod` | An HTTP verb outside GET/PUT/POST/DELETE was requested |
///
/// The remaining variants wrap the transport, JSON, configuration and I/O
/// layers.
///
/// # Notes
///
/// - Nothing is retried; every error reaches the caller as soon as it occurs
/// - Variants produced from an HTTP response keep the raw body text, see
///   [`GerritError::body`]
#[derive(Error, Debug)]
pub enum GerritError {
    /// Credential resolution failed.
    #[error("Credentials not found: {0}")]
    CredentialsNotFound(String),

    /// The requested authentication type or method is not supported.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// The resource a create-style operation targeted already exists.
    ///
    /// # Parameters
    ///
    /// - `0` - Raw response body returned by the server
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The requested resource was not found (HTTP 404 on a read).
    ///
    /// # Parameters
    ///
    /// - `0` - Raw response body returned by the server
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The server answered with a status the operation does not handle.
    #[error("Unhandled response ({status}): {body}")]
    Unhandled {
        /// The HTTP status code
        status: u16,
        /// Raw response body returned by the server
        body: String,
    },

    /// A required argument was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP verb is not one of GET, PUT, POST or DELETE.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The server URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as supplied
        url: String,
        /// Why parsing failed
        reason: String,
    },

    /// The response body is not valid UTF-8.
    #[error("Response body is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A JSON body could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration or credential file could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error while reading or writing local files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GerritError {
    /// Returns the raw response body carried by response-derived errors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gerrit_client::api::common::GerritError;
    ///
    /// let err = GerritError::AlreadyExists("group exists".to_string());
    /// assert_eq!(err.body(), Some("group exists"));
    /// assert_eq!(GerritError::InvalidArgument("x".into()).body(), None);
    /// ```
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::AlreadyExists(body) | Self::NotFound(body) => Some(body),
            Self::Unhandled { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// The status code and body of a single HTTP exchange.
///
/// Returned unmodified by the request core; interpreting the status is the
/// job of the facade method that issued the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from a status code and body bytes.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`GerritError::Decode`] if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    /// Decodes the body as UTF-8 and then as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        decode_json(&self.text()?)
    }
}

/// Parses a Gerrit JSON response body.
///
/// Gerrit prefixes JSON output with [`XSSI_PREFIX`] followed by a newline.
/// The prefix is removed when present; bodies without it are parsed as-is.
///
/// # Example
///
/// ```rust
/// use gerrit_client::api::common::decode_json;
/// use serde_json::Value;
///
/// let value: Value = decode_json(")]}'\n{\"id\": \"g1\"}").unwrap();
/// assert_eq!(value["id"], "g1");
/// ```
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let json = text.strip_prefix(XSSI_PREFIX).unwrap_or(text);
    Ok(serde_json::from_str(json.trim_start())?)
}
