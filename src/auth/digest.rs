//
//  gerrit-client
//  auth/digest.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Digest Authentication
//!
//! Gerrit releases before 2.14 protect the authenticated `/a/` REST
//! endpoints with HTTP Digest. This module parses the
//! `WWW-Authenticate: Digest ...` header and computes the matching
//! `Authorization` value (RFC 7616, `qop=auth` or legacy RFC 2069 mode).
//!
//! Supported algorithms: `MD5`, `MD5-sess`, `SHA-256`, `SHA-256-sess`.

use std::collections::HashMap;

use md5::Md5;
use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::Credentials;
use crate::api::common::{GerritError, Result};

/// Matches `key=value` and `key="quoted value"` challenge parameters.
static PARAM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z][A-Za-z0-9_-]*)\s*=\s*(?:"((?:[^"\\]|\\.)*)"|([^\s,]+))"#).unwrap()
});

/// Nonce count; every challenge is answered exactly once.
const NONCE_COUNT: &str = "00000001";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Md5,
    Md5Sess,
    Sha256,
    Sha256Sess,
}

impl Algorithm {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "MD5" => Ok(Self::Md5),
            "MD5-SESS" => Ok(Self::Md5Sess),
            "SHA-256" => Ok(Self::Sha256),
            "SHA-256-SESS" => Ok(Self::Sha256Sess),
            _ => Err(GerritError::NotImplemented(format!(
                "Digest algorithm '{}' is not implemented",
                value
            ))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Md5Sess => "MD5-sess",
            Self::Sha256 => "SHA-256",
            Self::Sha256Sess => "SHA-256-sess",
        }
    }

    fn is_session(self) -> bool {
        matches!(self, Self::Md5Sess | Self::Sha256Sess)
    }

    fn hash(self, data: &str) -> String {
        match self {
            Self::Md5 | Self::Md5Sess => format!("{:x}", Md5::digest(data.as_bytes())),
            Self::Sha256 | Self::Sha256Sess => format!("{:x}", Sha256::digest(data.as_bytes())),
        }
    }
}

/// A parsed `WWW-Authenticate: Digest` challenge.
///
/// # Example
///
/// ```rust
/// use gerrit_client::auth::{Credentials, DigestChallenge};
///
/// let challenge = DigestChallenge::parse(
///     r#"Digest realm="Gerrit Code Review", nonce="abc", qop="auth""#,
/// ).unwrap();
/// let header = challenge.authorization(&Credentials::new("jdoe", "pw"), "GET", "/a/groups/");
/// assert!(header.starts_with("Digest username=\"jdoe\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChallenge {
    realm: String,
    nonce: String,
    opaque: Option<String>,
    algorithm: Algorithm,
    qop_auth: bool,
}

impl DigestChallenge {
    /// Parses the value of a `WWW-Authenticate` header.
    ///
    /// # Errors
    ///
    /// [`GerritError::NotImplemented`] if the challenge cannot be answered:
    /// the scheme is not Digest, `realm` or `nonce` is missing, the algorithm
    /// is unsupported, or only `qop=auth-int` is offered.
    pub fn parse(header: &str) -> Result<Self> {
        let header = header.trim();
        let params = match header.split_once(char::is_whitespace) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("digest") => rest,
            _ => {
                return Err(GerritError::NotImplemented(format!(
                    "Authentication challenge '{}' is not implemented",
                    header
                )))
            }
        };

        let mut values: HashMap<String, String> = HashMap::new();
        for captures in PARAM_PATTERN.captures_iter(params) {
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .map(|m| m.as_str().replace("\\\"", "\""))
                .unwrap_or_default();
            values.insert(captures[1].to_ascii_lowercase(), value);
        }

        let required = |key: &str| {
            values.get(key).cloned().ok_or_else(|| {
                GerritError::NotImplemented(format!(
                    "Digest challenge without '{}' is not implemented",
                    key
                ))
            })
        };

        let realm = required("realm")?;
        let nonce = required("nonce")?;
        let algorithm = match values.get("algorithm") {
            Some(value) => Algorithm::parse(value)?,
            None => Algorithm::Md5,
        };

        let qop_auth = match values.get("qop") {
            None => false,
            Some(qop) if qop.split(',').any(|q| q.trim() == "auth") => true,
            Some(qop) => {
                return Err(GerritError::NotImplemented(format!(
                    "Digest qop '{}' is not implemented",
                    qop
                )))
            }
        };

        Ok(Self {
            realm,
            nonce,
            opaque: values.get("opaque").cloned(),
            algorithm,
            qop_auth,
        })
    }

    /// The protection realm announced by the server.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Computes the `Authorization` header value for one request.
    ///
    /// `uri` is the request target (path and query) exactly as sent.
    pub fn authorization(&self, credentials: &Credentials, method: &str, uri: &str) -> String {
        let mut bytes = [0u8; 8];
        rand::rng().fill_bytes(&mut bytes);
        let cnonce: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        self.authorization_with_cnonce(credentials, method, uri, &cnonce)
    }

    fn authorization_with_cnonce(
        &self,
        credentials: &Credentials,
        method: &str,
        uri: &str,
        cnonce: &str,
    ) -> String {
        let algorithm = self.algorithm;

        let mut ha1 = algorithm.hash(&format!(
            "{}:{}:{}",
            credentials.id(),
            self.realm,
            credentials.secret()
        ));
        if algorithm.is_session() {
            ha1 = algorithm.hash(&format!("{}:{}:{}", ha1, self.nonce, cnonce));
        }
        let ha2 = algorithm.hash(&format!("{}:{}", method, uri));

        let response = if self.qop_auth {
            algorithm.hash(&format!(
                "{}:{}:{}:{}:auth:{}",
                ha1, self.nonce, NONCE_COUNT, cnonce, ha2
            ))
        } else {
            algorithm.hash(&format!("{}:{}:{}", ha1, self.nonce, ha2))
        };

        let mut header = format!(
            "Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"{}\", algorithm={}, response=\"{}\"",
            credentials.id(),
            self.realm,
            self.nonce,
            uri,
            algorithm.name(),
            response
        );
        if let Some(opaque) = &self.opaque {
            header.push_str(&format!(", opaque=\"{}\"", opaque));
        }
        if self.qop_auth {
            header.push_str(&format!(", qop=auth, nc={}, cnonce=\"{}\"", NONCE_COUNT, cnonce));
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RFC_CHALLENGE: &str = r#"Digest realm="testrealm@host.com", qop="auth,auth-int", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", opaque="5ccc069c403ebaf9f0171e9517f40e41""#;

    #[test]
    fn test_parse_rfc_challenge() {
        let challenge = DigestChallenge::parse(RFC_CHALLENGE).unwrap();
        assert_eq!(challenge.realm(), "testrealm@host.com");
        assert_eq!(challenge.nonce, "dcd98b7102dd2f0e8b11d0f600bfb0c093");
        assert_eq!(challenge.opaque.as_deref(), Some("5ccc069c403ebaf9f0171e9517f40e41"));
        assert_eq!(challenge.algorithm, Algorithm::Md5);
        assert!(challenge.qop_auth);
    }

    #[test]
    fn test_rfc2617_reference_response() {
        let challenge = DigestChallenge::parse(RFC_CHALLENGE).unwrap();
        let credentials = Credentials::new("Mufasa", "Circle Of Life");
        let header =
            challenge.authorization_with_cnonce(&credentials, "GET", "/dir/index.html", "0a4f113b");

        assert!(header.contains("response=\"6629fae49393a05397450978507c4ef1\""));
        assert!(header.contains("nc=00000001"));
        assert!(header.contains("cnonce=\"0a4f113b\""));
        assert!(header.contains("opaque=\"5ccc069c403ebaf9f0171e9517f40e41\""));
    }

    #[test]
    fn test_legacy_mode_without_qop() {
        let challenge = DigestChallenge::parse(r#"Digest realm="r", nonce="n""#).unwrap();
        let credentials = Credentials::new("u", "p");
        let header = challenge.authorization_with_cnonce(&credentials, "GET", "/", "c");

        let ha1 = Algorithm::Md5.hash("u:r:p");
        let ha2 = Algorithm::Md5.hash("GET:/");
        let expected = Algorithm::Md5.hash(&format!("{}:n:{}", ha1, ha2));
        assert!(header.contains(&format!("response=\"{}\"", expected)));
        assert!(!header.contains("qop="));
    }

    #[test]
    fn test_sha256_algorithm_is_echoed() {
        let challenge =
            DigestChallenge::parse(r#"Digest realm="r", nonce="n", algorithm=SHA-256, qop="auth""#)
                .unwrap();
        let header = challenge.authorization(&Credentials::new("u", "p"), "PUT", "/a/groups/x");
        assert!(header.contains("algorithm=SHA-256"));
    }

    #[test]
    fn test_non_digest_scheme_rejected() {
        let result = DigestChallenge::parse(r#"Basic realm="Gerrit Code Review""#);
        assert!(matches!(result, Err(GerritError::NotImplemented(_))));
    }

    #[test]
    fn test_auth_int_only_rejected() {
        let result = DigestChallenge::parse(r#"Digest realm="r", nonce="n", qop="auth-int""#);
        assert!(matches!(result, Err(GerritError::NotImplemented(_))));
    }

    #[test]
    fn test_missing_nonce_rejected() {
        match DigestChallenge::parse(r#"Digest realm="r""#) {
            Err(GerritError::NotImplemented(message)) => assert!(message.contains("nonce")),
            other => panic!("expected NotImplemented, got {other:?}"),
        }
    }
}
