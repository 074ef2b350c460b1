//
//  gerrit-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit Connection and Request Core
//!
//! This module provides [`Connection`], the object every resource facade
//! borrows to reach the server. A connection resolves its credentials and
//! authentication strategy once, at construction, and then performs one
//! HTTP exchange per [`Connection::call`].
//!
//! ## Features
//!
//! - Base URL normalisation (trailing slashes removed)
//! - Default `content-type: application/json` header
//! - Basic authentication, or Digest answered on the server's challenge
//! - Raw status and body handed back to the caller for interpretation
//!
//! There is no timeout, retry or backoff: a call resolves when the server
//! answers or the transport fails.

use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, trace};

use super::changes::Revision;
use super::common::{GerritError, RawResponse, Result};
use super::groups::{Group, GroupRecord, Groups};
use super::projects::Project;
use crate::auth::{authenticate, AuthStrategy, CredentialStore, DefaultNetrc, DigestChallenge};
use crate::config::{Config, ConnectionOptions};

/// The HTTP verbs the request core supports.
///
/// String verbs parse case-insensitively; anything outside the four
/// variants fails before a request is built.
///
/// # Example
///
/// ```rust
/// use gerrit_client::api::Method;
///
/// assert_eq!("put".parse::<Method>().unwrap(), Method::Put);
/// assert!("patch".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl Method {
    /// The verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a JSON payload is sent with this verb.
    pub fn accepts_body(self) -> bool {
        matches!(self, Self::Put | Self::Post)
    }
}

impl FromStr for Method {
    type Err = GerritError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "put" => Ok(Self::Put),
            "post" => Ok(Self::Post),
            "delete" => Ok(Self::Delete),
            _ => Err(GerritError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A connection to one Gerrit server.
///
/// Immutable after construction. Facades returned by [`Connection::groups`],
/// [`Connection::get_project`] and friends borrow it, so a single connection
/// serves any number of facades.
///
/// # Example
///
/// ```rust,no_run
/// use gerrit_client::api::Connection;
/// use gerrit_client::config::ConnectionOptions;
///
/// # async fn example() -> gerrit_client::Result<()> {
/// let options = ConnectionOptions::new("https://review.example.com")
///     .with_credentials("jdoe", "http-password");
/// let gerrit = Connection::new(&options)?;
///
/// let groups = gerrit.groups().list().await?;
/// println!("{} groups visible", groups.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Connection {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without trailing slash
    url: String,
    /// Host part of the base URL, used as the credential store key
    host: String,
    /// Headers sent when the caller supplies none
    headers: HeaderMap,
    /// Strategy resolved at construction
    auth: AuthStrategy,
}

impl Connection {
    /// Creates a connection, falling back to `~/.netrc` for credentials.
    ///
    /// The file is read only when neither `auth_id` nor `auth_pw` is given.
    ///
    /// # Errors
    ///
    /// - [`GerritError::InvalidUrl`] if `options.url` has no host
    /// - [`GerritError::NotImplemented`] for an unsupported auth type or method
    /// - [`GerritError::CredentialsNotFound`] if credentials cannot be resolved
    pub fn new(options: &ConnectionOptions) -> Result<Self> {
        Self::with_store(options, &DefaultNetrc::new())
    }

    /// Creates a connection that consults `store` when no explicit
    /// credentials are given.
    pub fn with_store(options: &ConnectionOptions, store: &dyn CredentialStore) -> Result<Self> {
        let (url, host) = parse_base_url(&options.url)?;
        let auth = authenticate(options, &host, store)?;
        Self::build(url, host, auth)
    }

    /// Creates an unauthenticated connection.
    ///
    /// Gerrit serves anonymous requests on paths without the `/a/` prefix;
    /// the facades in this crate use authenticated paths.
    pub fn anonymous(url: &str) -> Result<Self> {
        let (url, host) = parse_base_url(url)?;
        Self::build(url, host, AuthStrategy::None)
    }

    /// Creates a connection for a server named in the configuration file.
    pub fn from_config(config: &Config, server: &str) -> Result<Self> {
        Self::new(config.server(server)?)
    }

    fn build(url: String, host: String, auth: AuthStrategy) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("gerrit-client/{}", crate::VERSION))
                .build()?,
            url,
            host,
            headers,
            auth,
        })
    }

    /// The base URL, without trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The server host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The authentication strategy resolved at construction.
    pub fn auth(&self) -> &AuthStrategy {
        &self.auth
    }

    /// Headers sent when [`call`](Self::call) is given none.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Sends one request and returns the raw response.
    ///
    /// # Parameters
    ///
    /// * `method` - The HTTP verb
    /// * `endpoint` - Path appended verbatim to the base URL; the caller
    ///   percent-encodes identifiers
    /// * `payload` - JSON body, sent for PUT and POST only
    /// * `headers` - Replaces the default headers when given
    ///
    /// # Returns
    ///
    /// The status code and body, uninterpreted. With Digest authentication
    /// a `401` challenge is answered once and the second response returned.
    ///
    /// # Errors
    ///
    /// - [`GerritError::Network`] if the transport fails
    /// - [`GerritError::NotImplemented`] if a Digest challenge cannot be answered
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
        headers: Option<HeaderMap>,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.url, endpoint);
        let headers = headers.unwrap_or_else(|| self.headers.clone());
        let body = if method.accepts_body() { payload } else { None };

        let mut response = self
            .auth
            .apply_to_request(self.request(method, &url, &headers, body))
            .send()
            .await?;

        if let AuthStrategy::Digest(credentials) = &self.auth {
            let challenge = match digest_challenge(&response) {
                Some(header) => Some(DigestChallenge::parse(header)?),
                None => None,
            };
            if let Some(challenge) = challenge {
                trace!(realm = challenge.realm(), "answering digest challenge");
                let authorization =
                    challenge.authorization(credentials, method.as_str(), &request_target(&url)?);
                response = self
                    .request(method, &url, &headers, body)
                    .header(AUTHORIZATION, authorization)
                    .send()
                    .await?;
            }
        }

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(%method, %url, status, "gerrit request");

        Ok(RawResponse::new(status, bytes.to_vec()))
    }

    fn request(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> RequestBuilder {
        let mut request = self.http.request(method.into(), url).headers(headers.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    /// The project facade for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GerritError::InvalidArgument`] if `name` is empty.
    pub fn get_project(&self, name: &str) -> Result<Project<'_>> {
        Project::new(self, name)
    }

    /// Creates a project; see [`Project::create`].
    pub async fn create_project(&self, name: &str, options: Option<&Value>) -> Result<Project<'_>> {
        Project::create(self, name, options).await
    }

    /// The revision facade for a change; `revision_id` defaults to `current`.
    pub fn get_revision(&self, change_id: &str, revision_id: Option<&str>) -> Result<Revision<'_>> {
        Revision::new(self, change_id, revision_id)
    }

    /// The group collection facade.
    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    /// The facade for the group called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GerritError::InvalidArgument`] if `name` is empty.
    pub fn get_group(&self, name: &str) -> Result<Group<'_>> {
        Group::new(self, name)
    }

    /// Creates a group; see [`Groups::create`].
    pub async fn create_group(
        &self,
        name: &str,
        options: Option<&Value>,
    ) -> Result<Option<GroupRecord>> {
        self.groups().create(name, options).await
    }
}

/// Strips trailing slashes and extracts the host used for credential lookup.
fn parse_base_url(url: &str) -> Result<(String, String)> {
    let trimmed = url.trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| GerritError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    let host = parsed.host_str().ok_or_else(|| GerritError::InvalidUrl {
        url: url.to_string(),
        reason: "missing host".to_string(),
    })?;
    Ok((trimmed.to_string(), host.to_string()))
}

/// The Digest challenge of a `401` response, if it carries one.
fn digest_challenge(response: &Response) -> Option<&str> {
    if response.status() != StatusCode::UNAUTHORIZED {
        return None;
    }
    response
        .headers()
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| {
            value
                .trim_start()
                .get(..6)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
        })
}

/// Path and query of `url`, as used in the Digest `uri` parameter.
fn request_target(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|err| GerritError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    Ok(match parsed.query() {
        Some(query) => format!("{}?{}", parsed.path(), query),
        None => parsed.path().to_string(),
    })
}
