//! Contact persistence contract.

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactDraft, MalformedContactId};

/// Failures a contact store may report.
///
/// Variants carry the offending id or name, or for `StoreUnavailable` the
/// operator-facing cause. None of them carry contact data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("contact not found: {0}")]
    NotFound(String),
    #[error("malformed id: {0}")]
    MalformedIdentifier(String),
    #[error("name already taken: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<MalformedContactId> for RepositoryError {
    fn from(err: MalformedContactId) -> Self {
        RepositoryError::MalformedIdentifier(err.0)
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Abstract interface for the contact store.
///
/// The single source of truth for existing contacts. Implementations must
/// enforce case-insensitive name uniqueness atomically inside `create` and
/// `update_by_id`; callers may look names up beforehand, but that lookup can
/// race with concurrent writers and is never authoritative.
///
/// Ids are taken as strings; an implementation rejects a structurally invalid
/// id with `MalformedIdentifier` before touching the store.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// All stored contacts, stable within one call.
    async fn list_all(&self) -> RepositoryResult<Vec<Contact>>;

    /// Fetch one contact.
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Contact>;

    /// Look a contact up by name, ignoring letter case.
    async fn find_by_name_case_insensitive(&self, name: &str) -> RepositoryResult<Option<Contact>>;

    /// Assign id and creation time, then persist.
    async fn create(&self, draft: ContactDraft) -> RepositoryResult<Contact>;

    /// Replace `name` and `number`, keeping id and creation time.
    async fn update_by_id(&self, id: &str, draft: ContactDraft) -> RepositoryResult<Contact>;

    /// Remove a contact in one atomic step.
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()>;

    /// Number of stored contacts.
    async fn count(&self) -> RepositoryResult<usize>;

    /// Flush pending writes to durable storage.
    async fn flush(&self) -> RepositoryResult<()>;
}
