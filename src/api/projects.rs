//
//  gerrit-client
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit Project API
//!
//! ```text
//! PUT /a/projects/{name}
//! GET /a/projects/{name}
//! ```
//!
//! Project names may contain `/` (`platform/build`); they are encoded as a
//! single path segment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::{Connection, Method};
use super::common::{decode_json, Result, CREATE, READ};
use crate::util::{encode_segment, require_name};

/// Project description returned by `GET /a/projects/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// URL encoded project name.
    pub id: String,

    /// Project name; omitted by some list endpoints.
    #[serde(default)]
    pub name: Option<String>,

    /// Name of the parent project.
    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// `ACTIVE`, `READ_ONLY` or `HIDDEN`.
    #[serde(default)]
    pub state: Option<String>,
}

/// One project, identified by name.
#[derive(Debug, Clone)]
pub struct Project<'a> {
    conn: &'a Connection,
    name: String,
}

impl<'a> Project<'a> {
    pub(crate) fn new(conn: &'a Connection, name: &str) -> Result<Self> {
        require_name("Project name", name)?;
        Ok(Self {
            conn,
            name: name.to_string(),
        })
    }

    /// Creates the project `name` and returns its facade.
    ///
    /// `options` is sent as the `ProjectInput` body (`{}` when `None`).
    ///
    /// # Errors
    ///
    /// - [`GerritError::InvalidArgument`](super::GerritError::InvalidArgument) if `name` is empty
    /// - [`GerritError::AlreadyExists`](super::GerritError::AlreadyExists) on 409
    /// - [`GerritError::Unhandled`](super::GerritError::Unhandled) on any status other than 201
    pub async fn create(
        conn: &'a Connection,
        name: &str,
        options: Option<&Value>,
    ) -> Result<Project<'a>> {
        let project = Self::new(conn, name)?;

        let empty = Value::Object(Map::new());
        let response = conn
            .call(Method::Put, &project.endpoint(), Some(options.unwrap_or(&empty)), None)
            .await?;
        CREATE.interpret(&response)?;

        Ok(project)
    }

    /// The project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self) -> String {
        format!("/a/projects/{}", encode_segment(&self.name))
    }

    /// Fetches the project description.
    pub async fn info(&self) -> Result<ProjectInfo> {
        let response = self.conn.call(Method::Get, &self.endpoint(), None, None).await?;
        let body = READ.interpret(&response)?;
        decode_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;
    use crate::config::ConnectionOptions;

    #[test]
    fn test_nested_name_is_one_segment() {
        let conn = Connection::with_store(
            &ConnectionOptions::new("https://review.example.com").with_credentials("u", "p"),
            &MemoryStore::new(),
        )
        .unwrap();
        let project = conn.get_project("platform/build").unwrap();
        assert_eq!(project.endpoint(), "/a/projects/platform%2Fbuild");
    }

    #[test]
    fn test_project_info_deserialization() {
        let info: ProjectInfo = serde_json::from_str(
            r#"{"id": "plugins%2Freplication", "name": "plugins/replication", "parent": "Public-Plugins", "state": "ACTIVE"}"#,
        )
        .unwrap();
        assert_eq!(info.name.as_deref(), Some("plugins/replication"));
        assert_eq!(info.parent.as_deref(), Some("Public-Plugins"));
        assert!(info.description.is_none());
    }
}
