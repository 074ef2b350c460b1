//
//  gerrit-client
//  auth/credentials.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Credential Resolution
//!
//! Credentials come either from the caller, as an explicit identity and
//! secret, or from a host-keyed [`CredentialStore`] such as a `.netrc` file.
//! Partial explicit credentials are rejected rather than completed from the
//! store.

use std::collections::HashMap;

use super::Credentials;
use crate::api::common::{GerritError, Result};

/// A host-keyed credential lookup.
///
/// Implemented by [`NetrcStore`](super::NetrcStore) and [`MemoryStore`].
pub trait CredentialStore {
    /// Returns the credentials stored for `host`, if any.
    fn lookup(&self, host: &str) -> Option<Credentials>;
}

/// An in-memory credential store.
///
/// # Example
///
/// ```rust
/// use gerrit_client::auth::{CredentialStore, MemoryStore};
///
/// let store = MemoryStore::new().with_entry("review.example.com", "jdoe", "secret");
/// assert_eq!(store.lookup("review.example.com").unwrap().id(), "jdoe");
/// assert!(store.lookup("other.example.com").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Credentials>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry for `host`, replacing any previous one.
    pub fn with_entry(
        mut self,
        host: impl Into<String>,
        id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.entries.insert(host.into(), Credentials::new(id, secret));
        self
    }
}

impl CredentialStore for MemoryStore {
    fn lookup(&self, host: &str) -> Option<Credentials> {
        self.entries.get(host).cloned()
    }
}

/// Resolves the credential pair for a connection to `host`.
///
/// # Rules
///
/// | `auth_id` | `auth_pw` | Result |
/// |-----------|-----------|--------|
/// | given | given | used verbatim, store not consulted |
/// | absent | absent | store entry for `host` |
/// | one of them | | `CredentialsNotFound` |
///
/// # Errors
///
/// Returns [`GerritError::CredentialsNotFound`] when the store has no entry for
/// `host` or only one explicit value was supplied.
pub fn resolve_credentials(
    auth_id: Option<&str>,
    auth_pw: Option<&str>,
    host: &str,
    store: &dyn CredentialStore,
) -> Result<Credentials> {
    match (auth_id, auth_pw) {
        (Some(id), Some(secret)) => Ok(Credentials::new(id, secret)),
        (None, None) => store.lookup(host).ok_or_else(|| {
            GerritError::CredentialsNotFound(format!("No credentials for {} found in .netrc", host))
        }),
        _ => Err(GerritError::CredentialsNotFound(
            "Supply both auth_id and auth_pw or neither".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "review.example.com";

    fn store() -> MemoryStore {
        MemoryStore::new().with_entry(HOST, "netrc-user", "netrc-pw")
    }

    #[test]
    fn test_explicit_credentials_win_over_store() {
        let credentials = resolve_credentials(Some("jdoe"), Some("pw"), HOST, &store()).unwrap();
        assert_eq!(credentials, Credentials::new("jdoe", "pw"));
    }

    #[test]
    fn test_store_used_when_nothing_supplied() {
        let credentials = resolve_credentials(None, None, HOST, &store()).unwrap();
        assert_eq!(credentials, Credentials::new("netrc-user", "netrc-pw"));
    }

    #[test]
    fn test_missing_store_entry() {
        let result = resolve_credentials(None, None, "elsewhere.example.com", &store());
        match result {
            Err(GerritError::CredentialsNotFound(message)) => {
                assert!(message.contains("elsewhere.example.com"))
            }
            other => panic!("expected CredentialsNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_credentials_rejected() {
        for (id, pw) in [(Some("jdoe"), None), (None, Some("pw"))] {
            let result = resolve_credentials(id, pw, HOST, &store());
            assert!(matches!(result, Err(GerritError::CredentialsNotFound(_))));
        }
    }
}
