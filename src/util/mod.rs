//
//  gerrit-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Helpers shared by the resource facades.
//!
//! ## Categories
//!
//! - **Path Utilities**: [`encode_segment`]
//! - **Validation Utilities**: [`require_name`]
//!
//! ## Example
//!
//! ```rust
//! use gerrit_client::util::encode_segment;
//!
//! assert_eq!(encode_segment("platform/build"), "platform%2Fbuild");
//! assert_eq!(encode_segment("Release Managers"), "Release+Managers");
//! ```

use url::form_urlencoded;

use crate::api::common::{GerritError, Result};

/// Percent-encodes one path segment of a Gerrit endpoint.
///
/// Uses `application/x-www-form-urlencoded` rules: `/` becomes `%2F` (so
/// nested project names stay one segment) and spaces become `+`, which
/// Gerrit decodes back to spaces in resource identifiers.
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

/// Rejects an empty identifier before any request is built.
///
/// # Errors
///
/// Returns [`GerritError::InvalidArgument`] naming `what` when `value` is empty.
///
/// # Example
///
/// ```rust
/// use gerrit_client::util::require_name;
///
/// assert!(require_name("Group name", "Administrators").is_ok());
/// assert!(require_name("Group name", "").is_err());
/// ```
pub fn require_name(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GerritError::InvalidArgument(format!("{} required", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("All-Projects"), "All-Projects");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("x y"), "x+y");
        assert_eq!(encode_segment("c++"), "c%2B%2B");
    }

    #[test]
    fn test_require_name() {
        match require_name("Project name", "") {
            Err(GerritError::InvalidArgument(message)) => {
                assert_eq!(message, "Project name required")
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}
