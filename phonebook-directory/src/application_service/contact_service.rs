use crate::domain::contact::{Contact, ContactInput};
use crate::domain::validation::{validate, ValidationErrors};
use crate::port::contact_repository::{ContactRepository, RepositoryError};

/// Every way a contact request can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Field-level problems with the submitted contact.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The id cannot address any contact.
    #[error("malformed id: {0}")]
    MalformedIdentifier(String),
    /// Another contact already uses this name (ignoring case).
    #[error("name already taken: {0}")]
    Conflict(String),
    #[error("contact not found: {0}")]
    NotFound(String),
    /// The store failed; the cause is for operators only.
    #[error("contact store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<RepositoryError> for DirectoryError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(id) => DirectoryError::NotFound(id),
            RepositoryError::MalformedIdentifier(id) => DirectoryError::MalformedIdentifier(id),
            RepositoryError::Conflict(name) => DirectoryError::Conflict(name),
            RepositoryError::StoreUnavailable(cause) => DirectoryError::StoreUnavailable(cause),
        }
    }
}

/// Request orchestration for the contact resource.
///
/// Create and update run the validator before the repository is called at
/// all. Repository failures are surfaced as they are, never retried here.
/// Holds no state between requests beyond the repository handle.
pub struct ContactService<R> {
    repository: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn list(&self) -> Result<Vec<Contact>, DirectoryError> {
        Ok(self.repository.list_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Contact, DirectoryError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn create(&self, input: ContactInput) -> Result<Contact, DirectoryError> {
        let draft = validate(&input)?;

        // Cheap early answer for the common case; the store decides races.
        if let Some(existing) = self
            .repository
            .find_by_name_case_insensitive(&draft.name)
            .await?
        {
            tracing::debug!(name = %draft.name, existing = %existing.id, "duplicate name rejected");
            return Err(DirectoryError::Conflict(draft.name));
        }

        let contact = self.repository.create(draft).await?;
        tracing::info!(id = %contact.id, name = %contact.name, "contact created");
        Ok(contact)
    }

    pub async fn update(&self, id: &str, input: ContactInput) -> Result<Contact, DirectoryError> {
        let draft = validate(&input)?;

        let contact = self.repository.update_by_id(id, draft).await?;
        tracing::info!(id = %contact.id, name = %contact.name, "contact updated");
        Ok(contact)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DirectoryError> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(id, "contact deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, DirectoryError> {
        Ok(self.repository.count().await?)
    }
}
