//
//  gerrit-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module turns the authentication-related [`ConnectionOptions`] into the
//! single [`AuthStrategy`] a [`Connection`](crate::api::Connection) uses for
//! its whole lifetime.
//!
//! ## Supported Authentication
//!
//! - **Type** `http` (the default and the only type implemented)
//! - **Method** `basic` (default): HTTP Basic credentials sent with every request
//! - **Method** `digest`: HTTP Digest, answering the server's challenge
//!
//! ## Module Structure
//!
//! - [`credentials`]: Credential resolution from explicit values or a store
//! - [`netrc`]: `.netrc` backed credential store
//! - [`digest`]: Digest challenge parsing and response computation
//!
//! ## Example
//!
//! ```rust
//! use gerrit_client::auth::{authenticate, AuthStrategy, MemoryStore};
//! use gerrit_client::config::ConnectionOptions;
//!
//! let options = ConnectionOptions::new("https://review.example.com")
//!     .with_credentials("jdoe", "secret")
//!     .with_auth_method("digest");
//!
//! let strategy = authenticate(&options, "review.example.com", &MemoryStore::new()).unwrap();
//! assert!(matches!(strategy, AuthStrategy::Digest(_)));
//! ```

pub mod credentials;
pub mod digest;
pub mod netrc;

pub use credentials::*;
pub use digest::DigestChallenge;
pub use netrc::{DefaultNetrc, NetrcStore};

use std::fmt;
use std::str::FromStr;

use reqwest::RequestBuilder;

use crate::api::common::{GerritError, Result};
use crate::config::ConnectionOptions;

/// An identity/secret pair.
///
/// The `Debug` implementation redacts the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    id: String,
    secret: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    /// The identity (username).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The secret (HTTP password).
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// The authentication strategy a connection applies to its requests.
///
/// # Variants
///
/// - `None`: anonymous access, no `Authorization` header
/// - `Basic`: HTTP Basic credentials, sent preemptively
/// - `Digest`: HTTP Digest credentials, sent in answer to a `401` challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Anonymous access.
    None,
    /// HTTP Basic authentication.
    Basic(Credentials),
    /// HTTP Digest authentication.
    Digest(Credentials),
}

impl AuthStrategy {
    /// Applies the strategy to an outgoing request.
    ///
    /// Only Basic adds a header up front. Digest needs the server's nonce, so
    /// the request core sends the request bare and answers the challenge.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic(credentials) => {
                request.basic_auth(credentials.id(), Some(credentials.secret()))
            }
            Self::None | Self::Digest(_) => request,
        }
    }

    /// The credentials carried by the strategy, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::None => None,
            Self::Basic(credentials) | Self::Digest(credentials) => Some(credentials),
        }
    }
}

/// Authentication type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    /// HTTP authentication.
    #[default]
    Http,
}

impl FromStr for AuthType {
    type Err = GerritError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "http" => Ok(Self::Http),
            other => Err(GerritError::NotImplemented(format!(
                "Authorization type '{}' is not implemented",
                other
            ))),
        }
    }
}

/// HTTP authentication method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// HTTP Basic.
    #[default]
    Basic,
    /// HTTP Digest.
    Digest,
}

impl FromStr for AuthMethod {
    type Err = GerritError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(Self::Basic),
            "digest" => Ok(Self::Digest),
            other => Err(GerritError::NotImplemented(format!(
                "Authorization method '{}' for auth_type 'http' is not implemented",
                other
            ))),
        }
    }
}

impl AuthMethod {
    /// Wraps resolved credentials in the matching strategy.
    pub fn strategy(self, credentials: Credentials) -> AuthStrategy {
        match self {
            Self::Basic => AuthStrategy::Basic(credentials),
            Self::Digest => AuthStrategy::Digest(credentials),
        }
    }
}

/// Builds the authentication strategy for a connection.
///
/// The auth type is checked first, then credentials are resolved (see
/// [`resolve_credentials`]), then the method is selected.
///
/// # Errors
///
/// - [`GerritError::NotImplemented`] for an unknown `auth_type` or `auth_method`
/// - [`GerritError::CredentialsNotFound`] if credentials cannot be resolved
pub fn authenticate(
    options: &ConnectionOptions,
    host: &str,
    store: &dyn CredentialStore,
) -> Result<AuthStrategy> {
    let auth_type = match options.auth_type.as_deref() {
        Some(value) => value.parse()?,
        None => AuthType::default(),
    };

    match auth_type {
        AuthType::Http => {
            let credentials = resolve_credentials(
                options.auth_id.as_deref(),
                options.auth_pw.as_deref(),
                host,
                store,
            )?;

            let method = match options.auth_method.as_deref() {
                Some(value) => value.parse()?,
                None => AuthMethod::default(),
            };

            Ok(method.strategy(credentials))
        }
    }
}
