//
//  gerrit-client
//  api/common/status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Status Tables for Gerrit Responses
//!
//! Every facade operation knows which HTTP status codes mean success for it
//! and which map to a typed failure. Rather than comparing status codes inline,
//! each operation names one of the tables below and lets [`StatusTable::interpret`]
//! turn the response into a body or a [`GerritError`].
//!
//! # Tables
//!
//! | Table | 200 | 201 | 404 | 409 |
//! |-------|-----|-----|-----|-----|
//! | [`CREATE`] | - | Success | - | AlreadyExists |
//! | [`READ`] | Success | - | NotFound | - |
//! | [`APPLY`] | Success | Success | - | - |
//!
//! Any status absent from a table becomes [`GerritError::Unhandled`].

use super::{GerritError, RawResponse, Result};

/// What a status code means for a particular operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation succeeded.
    Success,
    /// The resource does not exist.
    NotFound,
    /// The resource to create already exists.
    AlreadyExists,
}

/// A per-operation mapping from status code to [`Outcome`].
#[derive(Debug, Clone, Copy)]
pub struct StatusTable {
    entries: &'static [(u16, Outcome)],
}

/// Create-style operations (`PUT /a/projects/{name}`, `PUT /a/groups/{name}`).
pub const CREATE: StatusTable = StatusTable::new(&[
    (201, Outcome::Success),
    (409, Outcome::AlreadyExists),
]);

/// Read and list operations.
pub const READ: StatusTable = StatusTable::new(&[
    (200, Outcome::Success),
    (404, Outcome::NotFound),
]);

/// Idempotent additions such as including groups, where re-applying an
/// existing relation answers 200 instead of 201.
pub const APPLY: StatusTable = StatusTable::new(&[
    (200, Outcome::Success),
    (201, Outcome::Success),
]);

impl StatusTable {
    /// Creates a table from `(status, outcome)` pairs.
    pub const fn new(entries: &'static [(u16, Outcome)]) -> Self {
        Self { entries }
    }

    /// Looks up the outcome for `status`, `None` if the table has no entry.
    pub fn outcome(&self, status: u16) -> Option<Outcome> {
        self.entries
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, outcome)| *outcome)
    }

    /// Decodes the response body and maps the status to a result.
    ///
    /// # Returns
    ///
    /// The body text when the status means success.
    ///
    /// # Errors
    ///
    /// - [`GerritError::NotFound`] / [`GerritError::AlreadyExists`] per the table
    /// - [`GerritError::Unhandled`] for any status the table does not list
    /// - [`GerritError::Decode`] if the body is not UTF-8
    pub fn interpret(&self, response: &RawResponse) -> Result<String> {
        let body = response.text()?;
        match self.outcome(response.status()) {
            Some(Outcome::Success) => Ok(body),
            Some(Outcome::NotFound) => Err(GerritError::NotFound(body)),
            Some(Outcome::AlreadyExists) => Err(GerritError::AlreadyExists(body)),
            None => Err(GerritError::Unhandled {
                status: response.status(),
                body,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table() {
        assert_eq!(CREATE.outcome(201), Some(Outcome::Success));
        assert_eq!(CREATE.outcome(409), Some(Outcome::AlreadyExists));
        assert_eq!(CREATE.outcome(200), None);
        assert_eq!(CREATE.outcome(404), None);
    }

    #[test]
    fn test_read_table() {
        assert_eq!(READ.outcome(200), Some(Outcome::Success));
        assert_eq!(READ.outcome(404), Some(Outcome::NotFound));
        assert_eq!(READ.outcome(201), None);
    }

    #[test]
    fn test_apply_accepts_both_success_codes() {
        assert_eq!(APPLY.outcome(200), Some(Outcome::Success));
        assert_eq!(APPLY.outcome(201), Some(Outcome::Success));
        assert_eq!(APPLY.outcome(409), None);
    }

    #[test]
    fn test_interpret_success_returns_body() {
        let response = RawResponse::new(201, "created");
        assert_eq!(CREATE.interpret(&response).unwrap(), "created");
    }

    #[test]
    fn test_interpret_conflict() {
        let response = RawResponse::new(409, "Project already exists");
        match CREATE.interpret(&response) {
            Err(GerritError::AlreadyExists(body)) => assert_eq!(body, "Project already exists"),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
    }

    #[test]
    fn test_interpret_unlisted_status() {
        let response = RawResponse::new(500, "boom");
        match CREATE.interpret(&response) {
            Err(GerritError::Unhandled { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Unhandled, got {other:?}"),
        }
    }
}
