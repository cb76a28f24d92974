//! Core value types shared across the resolution pipeline.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::ResolveError;

/// A Steam application identifier.
///
/// Parsing accepts decimal digits only, so once an `AppId` exists no
/// further input validation is needed anywhere in the pipeline.
///
/// # Example
///
/// ```
/// use depotkey_core::AppId;
///
/// let id: AppId = "730".parse().unwrap();
/// assert_eq!(id.as_str(), "730");
/// assert!("73O".parse::<AppId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    /// The decimal string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AppId {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(ResolveError::InvalidAppId(s.to_string()))
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque commit hash identifying one fetchable snapshot of a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    /// Wrap a commit hash returned by the reference lookup.
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// The raw hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One (depot id, decryption key) pair extracted from a VDF payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepotKey {
    /// Depot (sub-application) identifier.
    pub depot_id: String,
    /// Hex decryption key as published. Never the all-zero placeholder.
    pub key: String,
}

/// Terminal outcome of a resolution run. The two variants are mutually
/// exclusive: a run either extracts keys or falls back to a raw branch
/// snapshot, never both.
#[derive(Debug)]
pub enum Resolution {
    /// Keys aggregated from the first source that had candidate files.
    /// May be empty when every key in those files was a placeholder.
    Keys(Vec<DepotKey>),
    /// Raw zipball snapshot from a Branch-tier source that had no
    /// candidate files.
    Archive(Bytes),
}
