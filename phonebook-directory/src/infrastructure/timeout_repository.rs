//! Deadline decorator for contact repositories.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactDraft};
use crate::port::contact_repository::{ContactRepository, RepositoryError, RepositoryResult};

/// Bounds every call on the wrapped repository by a fixed deadline.
///
/// A call that does not finish in time is dropped and reported as
/// `StoreUnavailable`, so a stalled store never hangs a request. No retries.
pub struct TimeoutContactRepository<R> {
    inner: R,
    deadline: Duration,
}

impl<R> TimeoutContactRepository<R> {
    pub fn new(inner: R, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> RepositoryResult<T>
    where
        F: Future<Output = RepositoryResult<T>> + Send,
    {
        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    deadline_ms = self.deadline.as_millis() as u64,
                    "contact store call timed out"
                );
                Err(RepositoryError::StoreUnavailable(format!(
                    "{operation} timed out after {:?}",
                    self.deadline
                )))
            }
        }
    }
}

#[async_trait]
impl<R: ContactRepository> ContactRepository for TimeoutContactRepository<R> {
    async fn list_all(&self) -> RepositoryResult<Vec<Contact>> {
        self.bounded("list_all", self.inner.list_all()).await
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Contact> {
        self.bounded("find_by_id", self.inner.find_by_id(id)).await
    }

    async fn find_by_name_case_insensitive(&self, name: &str) -> RepositoryResult<Option<Contact>> {
        self.bounded(
            "find_by_name",
            self.inner.find_by_name_case_insensitive(name),
        )
        .await
    }

    async fn create(&self, draft: ContactDraft) -> RepositoryResult<Contact> {
        self.bounded("create", self.inner.create(draft)).await
    }

    async fn update_by_id(&self, id: &str, draft: ContactDraft) -> RepositoryResult<Contact> {
        self.bounded("update_by_id", self.inner.update_by_id(id, draft))
            .await
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        self.bounded("delete_by_id", self.inner.delete_by_id(id)).await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.bounded("count", self.inner.count()).await
    }

    async fn flush(&self) -> RepositoryResult<()> {
        self.bounded("flush", self.inner.flush()).await
    }
}
