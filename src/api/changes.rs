//
//  gerrit-client
//  api/changes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit Change Revision API
//!
//! A [`Revision`] names one patch set of a change. The change id may be any
//! identifier Gerrit accepts (`project~branch~Change-Id`, a Change-Id, or a
//! numeric change number); the revision id is a commit SHA, a patch set
//! number, or `current`.
//!
//! ```text
//! GET  /a/changes/{change}/revisions/{revision}/commit
//! POST /a/changes/{change}/revisions/{revision}/review
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{Connection, Method};
use super::common::{decode_json, Result, READ};
use crate::util::{encode_segment, require_name};

/// Revision id Gerrit resolves to the latest patch set.
pub const CURRENT_REVISION: &str = "current";

/// Author or committer of a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitPerson {
    pub name: String,
    pub email: String,
    /// Timestamp in Gerrit's `yyyy-mm-dd hh:mm:ss.fffffffff` format.
    pub date: String,
    /// Offset from UTC in minutes.
    #[serde(default)]
    pub tz: Option<i32>,
}

/// A parent commit reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentCommit {
    pub commit: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Commit metadata of a revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit SHA; only set when requested through a commit-level endpoint.
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub parents: Vec<ParentCommit>,
    pub author: GitPerson,
    pub committer: GitPerson,
    pub subject: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// One revision (patch set) of a change.
#[derive(Debug, Clone)]
pub struct Revision<'a> {
    conn: &'a Connection,
    change_id: String,
    revision_id: String,
}

impl<'a> Revision<'a> {
    pub(crate) fn new(
        conn: &'a Connection,
        change_id: &str,
        revision_id: Option<&str>,
    ) -> Result<Self> {
        require_name("Change id", change_id)?;
        Ok(Self {
            conn,
            change_id: change_id.to_string(),
            revision_id: revision_id.unwrap_or(CURRENT_REVISION).to_string(),
        })
    }

    pub fn change_id(&self) -> &str {
        &self.change_id
    }

    pub fn revision_id(&self) -> &str {
        &self.revision_id
    }

    fn endpoint(&self, view: &str) -> String {
        format!(
            "/a/changes/{}/revisions/{}/{}",
            encode_segment(&self.change_id),
            encode_segment(&self.revision_id),
            view
        )
    }

    /// Fetches the commit of this revision.
    ///
    /// # Errors
    ///
    /// [`GerritError::NotFound`](super::GerritError::NotFound) if the change
    /// or revision does not exist.
    pub async fn commit(&self) -> Result<CommitInfo> {
        let response = self
            .conn
            .call(Method::Get, &self.endpoint("commit"), None, None)
            .await?;
        let body = READ.interpret(&response)?;
        decode_json(&body)
    }

    /// Posts a `ReviewInput` (message, labels, comments) on this revision.
    ///
    /// Returns the server's `ReviewResult`.
    pub async fn review(&self, input: &Value) -> Result<Value> {
        let response = self
            .conn
            .call(Method::Post, &self.endpoint("review"), Some(input), None)
            .await?;
        let body = READ.interpret(&response)?;
        decode_json(&body)
    }
}
