//
//  gerrit-client
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit Group API
//!
//! Facades for the `/a/groups/` endpoints:
//!
//! - [`Groups`]: the collection (list, field-projected get, create)
//! - [`Group`]: one named group and its `members` / `groups` sub-collections
//!
//! ## Endpoints
//!
//! ```text
//! GET  /a/groups/
//! PUT  /a/groups/{name}
//! GET  /a/groups/{id}/members/
//! GET  /a/groups/{id}/groups/
//! GET  /a/groups/{id}/groups/{included}
//! POST /a/groups/{name}/groups
//! ```
//!
//! Sub-collections are addressed by group id rather than name, so member
//! and include reads first fetch the listing to resolve the id.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gerrit_client::api::Connection;
//! use gerrit_client::config::ConnectionOptions;
//!
//! # async fn example() -> gerrit_client::Result<()> {
//! let gerrit = Connection::new(&ConnectionOptions::new("https://review.example.com"))?;
//!
//! let group = gerrit.get_group("Release Managers")?;
//! if let Some(members) = group.members().await? {
//!     for member in members {
//!         println!("{}", member.name.unwrap_or_default());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::client::{Connection, Method};
use super::common::{decode_json, GerritError, Result, APPLY, CREATE, READ};
use crate::util::{encode_segment, require_name};

/// A group entry of the listing, kept as raw JSON for field projection.
pub type GroupRecord = Map<String, Value>;

/// A group as returned by the included-groups sub-collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// URL encoded group UUID.
    pub id: String,

    /// Group name; absent when the group is not visible to the caller.
    #[serde(default)]
    pub name: Option<String>,

    /// URL of the group page, for external groups.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Numeric id of an internal group.
    #[serde(default)]
    pub group_id: Option<u64>,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub created_on: Option<String>,
}

/// A group member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Numeric account id.
    #[serde(rename = "_account_id", default)]
    pub account_id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

/// The group collection.
#[derive(Debug, Clone, Copy)]
pub struct Groups<'a> {
    conn: &'a Connection,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Lists every group visible to the caller, keyed by name.
    ///
    /// # Errors
    ///
    /// - [`GerritError::NotFound`] on 404
    /// - [`GerritError::Unhandled`] on any other non-200 status
    pub async fn list(&self) -> Result<BTreeMap<String, GroupRecord>> {
        let response = self.conn.call(Method::Get, "/a/groups/", None, None).await?;
        let body = READ.interpret(&response)?;
        decode_json(&body)
    }

    /// Returns the listing record of `name`.
    ///
    /// With `fields`, the record is reduced to exactly those keys. The result
    /// is `None` when the group is not listed, when `fields` is empty, or
    /// when any requested field is missing from the record.
    pub async fn get(&self, name: &str, fields: Option<&[&str]>) -> Result<Option<GroupRecord>> {
        let mut groups = self.list().await?;
        let Some(record) = groups.remove(name) else {
            return Ok(None);
        };

        Ok(match fields {
            None => Some(record),
            Some(fields) => select_fields(&record, fields),
        })
    }

    /// Creates the group `name`.
    ///
    /// `options` is sent as the `GroupInput` body (`{}` when `None`).
    ///
    /// # Returns
    ///
    /// The listing record of the new group, as [`get`](Self::get) returns it.
    ///
    /// # Errors
    ///
    /// - [`GerritError::InvalidArgument`] if `name` is empty
    /// - [`GerritError::AlreadyExists`] on 409
    /// - [`GerritError::Unhandled`] on any status other than 201
    pub async fn create(&self, name: &str, options: Option<&Value>) -> Result<Option<GroupRecord>> {
        require_name("Group name", name)?;

        let endpoint = format!("/a/groups/{}", encode_segment(name));
        let empty = Value::Object(Map::new());
        let response = self
            .conn
            .call(Method::Put, &endpoint, Some(options.unwrap_or(&empty)), None)
            .await?;
        CREATE.interpret(&response)?;

        self.get(name, None).await
    }

    /// Resolves the id of `name` from the listing.
    async fn resolve_id(&self, name: &str) -> Result<Option<String>> {
        let record = self.get(name, Some(&["id"])).await?;
        Ok(record.and_then(|r| r.get("id").and_then(Value::as_str).map(str::to_string)))
    }
}

/// Projects `record` onto `fields`; `None` unless every field is present.
fn select_fields(record: &GroupRecord, fields: &[&str]) -> Option<GroupRecord> {
    if fields.is_empty() {
        return None;
    }
    fields
        .iter()
        .map(|field| record.get(*field).map(|value| (field.to_string(), value.clone())))
        .collect()
}

/// One group, identified by name.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    conn: &'a Connection,
    name: String,
}

impl<'a> Group<'a> {
    pub(crate) fn new(conn: &'a Connection, name: &str) -> Result<Self> {
        require_name("Group name", name)?;
        Ok(Self {
            conn,
            name: name.to_string(),
        })
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The listing record of this group; see [`Groups::get`].
    pub async fn info(&self, fields: Option<&[&str]>) -> Result<Option<GroupRecord>> {
        Groups::new(self.conn).get(&self.name, fields).await
    }

    /// Direct members of the group, `None` if the group is not listed.
    pub async fn members(&self) -> Result<Option<Vec<AccountInfo>>> {
        self.sub_collection("members").await
    }

    /// Groups included in this group, `None` if the group is not listed.
    ///
    /// # Errors
    ///
    /// [`GerritError::NotFound`] if either the id lookup or the
    /// sub-collection read answers 404. A failed lookup never reaches the
    /// sub-collection.
    pub async fn included_groups(&self) -> Result<Option<Vec<GroupInfo>>> {
        self.sub_collection("groups").await
    }

    async fn sub_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Option<T>> {
        let Some(id) = Groups::new(self.conn).resolve_id(&self.name).await? else {
            return Ok(None);
        };

        // The listing already returns ids URL encoded.
        let endpoint = format!("/a/groups/{}/{}/", id, collection);
        let response = self.conn.call(Method::Get, &endpoint, None, None).await?;
        let body = READ.interpret(&response)?;
        Ok(Some(decode_json(&body)?))
    }

    /// Adds `groups` (names or ids) as included groups.
    ///
    /// # Returns
    ///
    /// `false` without contacting the server if `groups` is empty, `true`
    /// once the server accepted the inclusion (201, or 200 when already
    /// included).
    ///
    /// # Errors
    ///
    /// [`GerritError::Unhandled`] for any other status.
    pub async fn include(&self, groups: &[&str]) -> Result<bool> {
        if groups.is_empty() {
            return Ok(false);
        }

        let endpoint = format!("/a/groups/{}/groups", encode_segment(&self.name));
        let payload = json!({ "groups": groups });
        let response = self
            .conn
            .call(Method::Post, &endpoint, Some(&payload), None)
            .await?;
        APPLY.interpret(&response)?;
        Ok(true)
    }

    /// Checks whether `group` is directly included in this group.
    ///
    /// `None` if this group is not listed.
    pub async fn includes(&self, group: &str) -> Result<Option<bool>> {
        require_name("Included group name", group)?;
        let Some(id) = Groups::new(self.conn).resolve_id(&self.name).await? else {
            return Ok(None);
        };

        let endpoint = format!("/a/groups/{}/groups/{}", id, encode_segment(group));
        let response = self.conn.call(Method::Get, &endpoint, None, None).await?;
        match READ.interpret(&response) {
            Ok(_) => Ok(Some(true)),
            Err(GerritError::NotFound(_)) => Ok(Some(false)),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GroupRecord {
        match json!({"id": "g1", "description": "x", "group_id": 7}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_select_single_field() {
        let selected = select_fields(&record(), &["id"]).unwrap();
        assert_eq!(Value::Object(selected), json!({"id": "g1"}));
    }

    #[test]
    fn test_select_missing_field_gives_none() {
        assert!(select_fields(&record(), &["id", "owner"]).is_none());
    }

    #[test]
    fn test_select_no_fields_gives_none() {
        assert!(select_fields(&record(), &[]).is_none());
    }

    #[test]
    fn test_account_info_deserialization() {
        let account: AccountInfo = serde_json::from_value(json!({
            "_account_id": 1000096,
            "name": "John Doe",
            "email": "john.doe@example.com",
            "username": "john"
        }))
        .unwrap();
        assert_eq!(account.account_id, Some(1000096));
        assert_eq!(account.username.as_deref(), Some("john"));
    }
}
