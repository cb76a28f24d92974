//! Static source catalog: which repositories are searched, and in what
//! order.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;

/// Catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("catalog.toml");

/// A validated GitHub repository reference in `owner/name` format.
///
/// # Example
///
/// ```
/// use depotkey_core::RepoId;
///
/// let repo = RepoId::new("ManifestHub/ManifestHub").unwrap();
/// assert_eq!(repo.owner(), "ManifestHub");
/// assert_eq!(repo.name(), "ManifestHub");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct RepoId(String);

impl RepoId {
    /// Create a new `RepoId`, validating the `owner/name` format.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidRepo`] if `s` is not in
    /// `owner/name` format or if either component is empty.
    pub fn new(s: &str) -> Result<Self, CatalogError> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self(s.to_string()))
            }
            _ => Err(CatalogError::InvalidRepo(s.to_string())),
        }
    }

    /// Get the owner part.
    pub fn owner(&self) -> &str {
        self.0.split('/').next().unwrap_or("")
    }

    /// Get the repository name part.
    pub fn name(&self) -> &str {
        self.0.split('/').nth(1).unwrap_or("")
    }

    /// Return the raw `owner/name` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RepoId {
    type Error = CatalogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access classification of a source. Only sets scan priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    /// Sources publishing usable (decrypted) keys.
    Decrypted,
    /// Sources whose keys may still be encrypted.
    Encrypted,
    /// Dump repositories only useful as raw branch snapshots.
    Branch,
}

impl AccessTier {
    /// Fixed scan order: decrypted sources are most likely to carry
    /// usable keys, branch dumps are the last resort.
    pub const PRIORITY: [AccessTier; 3] = [Self::Decrypted, Self::Encrypted, Self::Branch];

    /// Lowercase tier label, matching the catalog file syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decrypted => "decrypted",
            Self::Encrypted => "encrypted",
            Self::Branch => "branch",
        }
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One cataloged repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    /// Repository in `owner/name` form.
    pub repo: RepoId,
    /// Priority classification.
    pub tier: AccessTier,
}

/// Immutable, ordered set of sources. Loaded once at startup; nothing
/// mutates it for the life of the process.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    sources: Vec<Source>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    sources: Vec<Source>,
}

impl SourceCatalog {
    /// The catalog embedded at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the embedded catalog file is malformed; that is a
    /// build defect, not a runtime condition.
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_CATALOG).expect("embedded catalog must parse")
    }

    /// Load a catalog from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Ok(Self {
            sources: file.sources,
        })
    }

    /// Number of cataloged sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True if the catalog has no sources at all.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// All sources in declaration order, ignoring tiers.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    /// Sources of one tier, in declaration order.
    pub fn tier(&self, tier: AccessTier) -> impl Iterator<Item = &Source> {
        self.sources.iter().filter(move |s| s.tier == tier)
    }

    /// All sources in scan order: tier priority first, declaration
    /// order within a tier.
    pub fn in_priority_order(&self) -> impl Iterator<Item = &Source> {
        AccessTier::PRIORITY
            .iter()
            .flat_map(move |tier| self.tier(*tier))
    }
}
