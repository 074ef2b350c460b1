//
//  gerrit-client
//  auth/netrc.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Netrc Credential Store
//!
//! Reads HTTP credentials from a `.netrc` file, keyed by machine name:
//!
//! ```text
//! machine review.example.com
//!   login jdoe
//!   password http-password-from-settings
//! ```
//!
//! Supported tokens are `machine`, `default`, `login` (or `user`),
//! `password`, `account` and `macdef`. Macro bodies are skipped up to the
//! next blank line, and `#` starts a comment when it appears where a keyword
//! is expected. Values containing whitespace are written in double quotes,
//! with `\` escaping the next character:
//!
//! ```text
//! machine review.example.com login jdoe password "correct horse \"battery\""
//! ```

use std::collections::HashMap;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use directories::BaseDirs;
use once_cell::sync::OnceCell;
use tracing::warn;

use super::{CredentialStore, Credentials};
use crate::api::common::{GerritError, Result};

/// One `machine` or `default` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NetrcEntry {
    login: Option<String>,
    password: Option<String>,
    account: Option<String>,
}

impl NetrcEntry {
    fn credentials(&self) -> Credentials {
        let id = self
            .login
            .as_deref()
            .or(self.account.as_deref())
            .unwrap_or_default();
        Credentials::new(id, self.password.as_deref().unwrap_or_default())
    }
}

/// What the parser expects the next token to be.
#[derive(Clone, Copy)]
enum Expect {
    Keyword,
    MachineName,
    Login,
    Password,
    Account,
    MacroName,
}

/// A token of one netrc line.
struct Token {
    text: String,
    quoted: bool,
}

/// Splits a line into tokens on demand, so that a comment is never scanned.
struct Tokens<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().peekable(),
        }
    }

    fn quoted(&mut self) -> std::result::Result<Token, &'static str> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(Token { text, quoted: true }),
                Some('\\') => match self.chars.next() {
                    Some(escaped) => text.push(escaped),
                    None => return Err("unterminated quoted token"),
                },
                Some(c) => text.push(c),
                None => return Err("unterminated quoted token"),
            }
        }
    }

    fn bare(&mut self) -> Token {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                break;
            }
            self.chars.next();
            if c == '\\' {
                if let Some(escaped) = self.chars.next() {
                    text.push(escaped);
                }
            } else {
                text.push(c);
            }
        }
        Token {
            text,
            quoted: false,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = std::result::Result<Token, &'static str>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
        match self.chars.peek()? {
            '"' => {
                self.chars.next();
                Some(self.quoted())
            }
            _ => Some(Ok(self.bare())),
        }
    }
}

/// Credential store backed by a parsed `.netrc` file.
///
/// # Example
///
/// ```rust
/// use gerrit_client::auth::{CredentialStore, NetrcStore};
///
/// let store = NetrcStore::parse("machine review.example.com login jdoe password s3cret").unwrap();
/// let credentials = store.lookup("review.example.com").unwrap();
/// assert_eq!(credentials.id(), "jdoe");
/// assert_eq!(credentials.secret(), "s3cret");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetrcStore {
    machines: HashMap<String, NetrcEntry>,
    default: Option<NetrcEntry>,
}

impl NetrcStore {
    /// Path of the user's `.netrc` file, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(".netrc"))
    }

    /// Loads `~/.netrc`.
    ///
    /// A missing, unreadable or malformed file yields an empty store, so a
    /// lookup then fails with `CredentialsNotFound` at resolution time.
    pub fn from_default_location() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|err| {
            warn!("Ignoring {}: {}", path.display(), err);
            Self::default()
        })
    }

    /// Reads and parses the netrc file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses netrc content.
    ///
    /// # Errors
    ///
    /// Returns [`GerritError::Config`] for unknown keywords, a value keyword
    /// outside a `machine`/`default` block, or a keyword missing its value.
    pub fn parse(content: &str) -> Result<Self> {
        let mut store = Self::default();
        // (machine name, entry); `None` as the name marks the default block.
        let mut current: Option<(Option<String>, NetrcEntry)> = None;
        let mut expect = Expect::Keyword;
        let mut in_macro = false;

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;

            if in_macro {
                if line.trim().is_empty() {
                    in_macro = false;
                }
                continue;
            }

            for token in Tokens::new(line) {
                let Token { text, quoted } = token.map_err(|reason| {
                    GerritError::Config(format!("netrc line {}: {}", line_no, reason))
                })?;
                let token = text.as_str();

                expect = match expect {
                    Expect::Keyword => {
                        if !quoted && token.starts_with('#') {
                            break;
                        }
                        match token {
                            "machine" => {
                                store.finish(current.take());
                                Expect::MachineName
                            }
                            "default" => {
                                store.finish(current.take());
                                current = Some((None, NetrcEntry::default()));
                                Expect::Keyword
                            }
                            "login" | "user" => Expect::Login,
                            "password" => Expect::Password,
                            "account" => Expect::Account,
                            "macdef" => Expect::MacroName,
                            other => {
                                return Err(GerritError::Config(format!(
                                    "netrc line {}: unexpected token '{}'",
                                    line_no, other
                                )))
                            }
                        }
                    }
                    Expect::MachineName => {
                        current = Some((Some(token.to_string()), NetrcEntry::default()));
                        Expect::Keyword
                    }
                    Expect::Login => {
                        entry_mut(&mut current, line_no)?.login = Some(token.to_string());
                        Expect::Keyword
                    }
                    Expect::Password => {
                        entry_mut(&mut current, line_no)?.password = Some(token.to_string());
                        Expect::Keyword
                    }
                    Expect::Account => {
                        entry_mut(&mut current, line_no)?.account = Some(token.to_string());
                        Expect::Keyword
                    }
                    Expect::MacroName => {
                        in_macro = true;
                        Expect::Keyword
                    }
                };

                if in_macro {
                    break;
                }
            }
        }

        if !matches!(expect, Expect::Keyword) {
            return Err(GerritError::Config(
                "netrc ends with a keyword missing its value".to_string(),
            ));
        }

        store.finish(current);
        Ok(store)
    }

    fn finish(&mut self, block: Option<(Option<String>, NetrcEntry)>) {
        match block {
            Some((Some(machine), entry)) => {
                self.machines.insert(machine, entry);
            }
            Some((None, entry)) => self.default = Some(entry),
            None => {}
        }
    }
}

fn entry_mut(
    current: &mut Option<(Option<String>, NetrcEntry)>,
    line_no: usize,
) -> Result<&mut NetrcEntry> {
    current.as_mut().map(|(_, entry)| entry).ok_or_else(|| {
        GerritError::Config(format!(
            "netrc line {}: value outside a machine or default block",
            line_no
        ))
    })
}

impl CredentialStore for NetrcStore {
    fn lookup(&self, host: &str) -> Option<Credentials> {
        self.machines
            .get(host)
            .or(self.default.as_ref())
            .map(NetrcEntry::credentials)
    }
}

/// The user's `~/.netrc`, read on the first lookup.
///
/// Used by [`Connection::new`](crate::api::Connection::new): connections
/// with explicit credentials never touch the file.
#[derive(Debug, Default)]
pub struct DefaultNetrc {
    store: OnceCell<NetrcStore>,
}

impl DefaultNetrc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the file has been read.
    pub fn is_loaded(&self) -> bool {
        self.store.get().is_some()
    }
}

impl CredentialStore for DefaultNetrc {
    fn lookup(&self, host: &str) -> Option<Credentials> {
        self.store
            .get_or_init(NetrcStore::from_default_location)
            .lookup(host)
    }
}
