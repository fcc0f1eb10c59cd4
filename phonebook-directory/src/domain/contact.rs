//! Contact entity and its identifier.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier assigned by the repository when a contact is created.
///
/// Backed by a random UUID, so an id is never handed out twice, even after
/// the contact it addressed has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(Uuid);

/// Raised when a string cannot address any contact by construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed id: {0}")]
pub struct MalformedContactId(pub String);

impl ContactId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Raw key bytes used by the store.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Rebuild an identifier from store key bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MalformedContactId> {
        Uuid::from_slice(bytes)
            .map(Self)
            .map_err(|_| MalformedContactId(format!("{bytes:02x?}")))
    }
}

impl FromStr for ContactId {
    type Err = MalformedContactId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| MalformedContactId(s.to_string()))
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

// Serialized as the hyphenated string form.
impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ContactId::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A stored phonebook entry.
///
/// Serializes to the wire shape `{id, name, number, date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Assign an id and creation time to a validated draft.
    pub fn create(draft: ContactDraft) -> Self {
        Self {
            id: ContactId::generate(),
            name: draft.name,
            number: draft.number,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Replace `name` and `number`; `id` and `created_at` are kept.
    pub fn replace_details(&mut self, draft: ContactDraft) {
        self.name = draft.name;
        self.number = draft.number;
    }

    /// Key under which the name is unique.
    pub fn name_key(&self) -> String {
        fold_name(&self.name)
    }
}

/// Case-folds a name for uniqueness comparisons.
///
/// Uses Unicode default lowercasing, independent of any locale.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Candidate `name`/`number` pair that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub number: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Request body for create and update, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl ContactInput {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}
