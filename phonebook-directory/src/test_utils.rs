//! Test utilities and in-process implementations of the contact port.
//!
//! These let the application and presentation layers be exercised without a
//! sled database on disk.

use crate::domain::contact::{fold_name, Contact, ContactDraft, ContactId};
use crate::port::contact_repository::{ContactRepository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

// ============================================================================
// InMemoryContactRepository
// ============================================================================

#[derive(Default)]
struct Contacts {
    by_id: HashMap<ContactId, Contact>,
    by_name: HashMap<String, ContactId>,
}

/// In-memory implementation of ContactRepository.
///
/// A single lock guards both maps, so the name check and the insert are
/// atomic just like the sled transaction.
#[derive(Clone, Default)]
pub struct InMemoryContactRepository {
    inner: Arc<Mutex<Contacts>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository, bypassing validation.
    pub async fn with_contacts(drafts: Vec<ContactDraft>) -> RepositoryResult<Self> {
        let repo = Self::new();
        for draft in drafts {
            repo.create(draft).await?;
        }
        Ok(repo)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Contact>> {
        Ok(self.inner.lock().await.by_id.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Contact> {
        let id: ContactId = id.parse()?;
        self.inner
            .lock()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn find_by_name_case_insensitive(&self, name: &str) -> RepositoryResult<Option<Contact>> {
        let guard = self.inner.lock().await;
        Ok(guard
            .by_name
            .get(&fold_name(name))
            .and_then(|id| guard.by_id.get(id))
            .cloned())
    }

    async fn create(&self, draft: ContactDraft) -> RepositoryResult<Contact> {
        let contact = Contact::create(draft);
        let mut guard = self.inner.lock().await;
        let key = contact.name_key();
        if guard.by_name.contains_key(&key) {
            return Err(RepositoryError::Conflict(contact.name));
        }
        guard.by_name.insert(key, contact.id);
        guard.by_id.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update_by_id(&self, id: &str, draft: ContactDraft) -> RepositoryResult<Contact> {
        let id: ContactId = id.parse()?;
        let mut guard = self.inner.lock().await;
        let Some(existing) = guard.by_id.get(&id) else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };

        let mut contact = existing.clone();
        let old_key = contact.name_key();
        contact.replace_details(draft);
        let new_key = contact.name_key();

        if new_key != old_key {
            if guard.by_name.contains_key(&new_key) {
                return Err(RepositoryError::Conflict(contact.name));
            }
            guard.by_name.remove(&old_key);
            guard.by_name.insert(new_key, id);
        }
        guard.by_id.insert(id, contact.clone());
        Ok(contact)
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        let id: ContactId = id.parse()?;
        let mut guard = self.inner.lock().await;
        let contact = guard
            .by_id
            .remove(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        guard.by_name.remove(&contact.name_key());
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.len().await)
    }

    async fn flush(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

// ============================================================================
// UnavailableContactRepository
// ============================================================================

/// Repository whose every call fails with `StoreUnavailable`.
///
/// Counts calls so tests can assert that none were made.
#[derive(Clone, Default)]
pub struct UnavailableContactRepository {
    calls: Arc<AtomicUsize>,
}

impl UnavailableContactRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> RepositoryResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::StoreUnavailable(
            "connection refused (127.0.0.1:27017)".to_string(),
        ))
    }
}

#[async_trait]
impl ContactRepository for UnavailableContactRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Contact>> {
        self.fail()
    }

    async fn find_by_id(&self, _id: &str) -> RepositoryResult<Contact> {
        self.fail()
    }

    async fn find_by_name_case_insensitive(&self, _name: &str) -> RepositoryResult<Option<Contact>> {
        self.fail()
    }

    async fn create(&self, _draft: ContactDraft) -> RepositoryResult<Contact> {
        self.fail()
    }

    async fn update_by_id(&self, _id: &str, _draft: ContactDraft) -> RepositoryResult<Contact> {
        self.fail()
    }

    async fn delete_by_id(&self, _id: &str) -> RepositoryResult<()> {
        self.fail()
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.fail()
    }

    async fn flush(&self) -> RepositoryResult<()> {
        self.fail()
    }
}

// ============================================================================
// StalledContactRepository
// ============================================================================

/// Repository whose calls never complete.
#[derive(Clone, Default)]
pub struct StalledContactRepository;

#[async_trait]
impl ContactRepository for StalledContactRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Contact>> {
        std::future::pending().await
    }

    async fn find_by_id(&self, _id: &str) -> RepositoryResult<Contact> {
        std::future::pending().await
    }

    async fn find_by_name_case_insensitive(&self, _name: &str) -> RepositoryResult<Option<Contact>> {
        std::future::pending().await
    }

    async fn create(&self, _draft: ContactDraft) -> RepositoryResult<Contact> {
        std::future::pending().await
    }

    async fn update_by_id(&self, _id: &str, _draft: ContactDraft) -> RepositoryResult<Contact> {
        std::future::pending().await
    }

    async fn delete_by_id(&self, _id: &str) -> RepositoryResult<()> {
        std::future::pending().await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        std::future::pending().await
    }

    async fn flush(&self) -> RepositoryResult<()> {
        std::future::pending().await
    }
}
