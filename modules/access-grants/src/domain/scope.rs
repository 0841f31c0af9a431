//! The scope catalog: the closed set of capabilities a grant can carry.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A granular capability that can be delegated over one pet.
///
/// Scopes are atomic: a grant holds a set of them and an operation requires
/// exactly one. The wire form is the lowercase `area:action` string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Scope {
    /// Read the pet's profile.
    #[serde(rename = "pet:read")]
    PetRead,
    /// Edit the pet's profile.
    #[serde(rename = "pet:edit_profile")]
    PetEditProfile,
    /// Read the pet's clinical timeline.
    #[serde(rename = "events:read")]
    EventsRead,
    /// Record new clinical events.
    #[serde(rename = "events:create")]
    EventsCreate,
    /// Void existing clinical events.
    #[serde(rename = "events:void")]
    EventsVoid,
    /// Attach files or other resources to the history.
    #[serde(rename = "attachments:add")]
    AttachmentsAdd,
}

impl Scope {
    /// Every scope in the catalog.
    pub const ALL: [Scope; 6] = [
        Scope::PetRead,
        Scope::PetEditProfile,
        Scope::EventsRead,
        Scope::EventsCreate,
        Scope::EventsVoid,
        Scope::AttachmentsAdd,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::PetRead => "pet:read",
            Scope::PetEditProfile => "pet:edit_profile",
            Scope::EventsRead => "events:read",
            Scope::EventsCreate => "events:create",
            Scope::EventsVoid => "events:void",
            Scope::AttachmentsAdd => "attachments:add",
        }
    }

    /// Whether `raw` names a scope in the catalog.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<Scope>().is_ok()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a caller-supplied scope string is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scope '{0}'")]
pub struct ScopeParseError(pub String);

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pet:read" => Ok(Scope::PetRead),
            "pet:edit_profile" => Ok(Scope::PetEditProfile),
            "events:read" => Ok(Scope::EventsRead),
            "events:create" => Ok(Scope::EventsCreate),
            "events:void" => Ok(Scope::EventsVoid),
            "attachments:add" => Ok(Scope::AttachmentsAdd),
            other => Err(ScopeParseError(other.to_owned())),
        }
    }
}

/// A set of scopes held by one grant.
///
/// Uniqueness is enforced and ordering is canonical, so two sets built from
/// differently ordered input compare equal and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<Scope>);

impl ScopeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw scope strings into a set, strictly: any string that is not
    /// in the catalog fails the whole call. Surrounding whitespace is
    /// tolerated and blank entries are skipped.
    pub fn parse_strict<I, S>(raw: I) -> Result<Self, ScopeParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scopes = BTreeSet::new();
        for item in raw {
            let trimmed = item.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            scopes.insert(trimmed.parse::<Scope>()?);
        }
        Ok(Self(scopes))
    }

    #[must_use]
    pub fn contains(&self, scope: Scope) -> bool {
        self.0.contains(&scope)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Scope> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
