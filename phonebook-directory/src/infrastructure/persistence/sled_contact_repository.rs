//! Sled-based contact repository implementation.

use crate::domain::contact::{fold_name, Contact, ContactDraft, ContactId};
use crate::port::contact_repository::{ContactRepository, RepositoryError, RepositoryResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionError,
    TransactionResult,
};
use sled::{Db, Transactional, Tree};
use std::path::Path;

const CONTACT_TREE_NAME: &str = "contacts";
const NAME_INDEX_TREE_NAME: &str = "contact_names";

/// Sled-based implementation of ContactRepository.
///
/// Contacts are stored as JSON keyed by id. A second tree maps each
/// case-folded name to the owning id; every write touches both trees inside
/// one sled transaction, which makes that index the uniqueness constraint.
#[derive(Clone)]
pub struct SledContactRepository {
    db: Db,
    contacts: Tree,
    names: Tree,
}

impl SledContactRepository {
    /// Open or create a sled database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref()).context("Failed to open sled database")?;
        Self::with_db(db)
    }

    /// Open with an existing sled database instance.
    pub fn with_db(db: Db) -> Result<Self> {
        let contacts = db
            .open_tree(CONTACT_TREE_NAME)
            .context("Failed to open contacts tree")?;
        let names = db
            .open_tree(NAME_INDEX_TREE_NAME)
            .context("Failed to open contact name index")?;
        Ok(Self {
            db,
            contacts,
            names,
        })
    }

    /// Run a blocking sled operation off the async executor.
    async fn run_blocking<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&SledContactRepository) -> RepositoryResult<T> + Send + 'static,
    {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || f(&repo))
            .await
            .map_err(|e| {
                RepositoryError::StoreUnavailable(format!("{operation} task failed: {e}"))
            })?
    }

    fn get_contact(&self, id: &ContactId) -> RepositoryResult<Option<Contact>> {
        self.contacts
            .get(id.as_bytes())
            .map_err(store_error)?
            .map(|bytes| decode(&bytes))
            .transpose()
    }
}

fn store_error(err: sled::Error) -> RepositoryError {
    RepositoryError::StoreUnavailable(err.to_string())
}

fn encode(contact: &Contact) -> RepositoryResult<Vec<u8>> {
    serde_json::to_vec(contact).map_err(|e| {
        RepositoryError::StoreUnavailable(format!("Failed to serialize contact: {e}"))
    })
}

fn decode(bytes: &[u8]) -> RepositoryResult<Contact> {
    serde_json::from_slice(bytes).map_err(|e| {
        RepositoryError::StoreUnavailable(format!("Failed to deserialize contact: {e}"))
    })
}

fn abort<T>(err: RepositoryError) -> ConflictableTransactionResult<T, RepositoryError> {
    Err(ConflictableTransactionError::Abort(err))
}

fn finish<T>(result: TransactionResult<T, RepositoryError>) -> RepositoryResult<T> {
    result.map_err(|e| match e {
        TransactionError::Abort(err) => err,
        TransactionError::Storage(err) => store_error(err),
    })
}

#[async_trait]
impl ContactRepository for SledContactRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Contact>> {
        self.run_blocking("list_all", |repo| {
            let mut contacts = Vec::new();
            for entry in repo.contacts.iter() {
                let (_, bytes) = entry.map_err(store_error)?;
                contacts.push(decode(&bytes)?);
            }
            Ok(contacts)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Contact> {
        let id: ContactId = id.parse()?;
        self.run_blocking("find_by_id", move |repo| {
            repo.get_contact(&id)?
                .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
        })
        .await
    }

    async fn find_by_name_case_insensitive(&self, name: &str) -> RepositoryResult<Option<Contact>> {
        let key = fold_name(name);
        self.run_blocking("find_by_name", move |repo| {
            let Some(id_bytes) = repo.names.get(key.as_bytes()).map_err(store_error)? else {
                return Ok(None);
            };
            let id = ContactId::from_bytes(&id_bytes).map_err(|e| {
                RepositoryError::StoreUnavailable(format!("Corrupt name index entry: {e}"))
            })?;
            repo.get_contact(&id)
        })
        .await
    }

    async fn create(&self, draft: ContactDraft) -> RepositoryResult<Contact> {
        let contact = Contact::create(draft);
        self.run_blocking("create", move |repo| {
            let key = contact.name_key();
            let value = encode(&contact)?;

            let result = (&repo.contacts, &repo.names).transaction(
                |(contacts, names)| -> ConflictableTransactionResult<(), RepositoryError> {
                    if names.get(key.as_bytes())?.is_some() {
                        return abort(RepositoryError::Conflict(contact.name.clone()));
                    }
                    names.insert(key.as_bytes(), contact.id.as_bytes())?;
                    contacts.insert(contact.id.as_bytes(), value.as_slice())?;
                    Ok(())
                },
            );
            finish(result)?;

            tracing::debug!(id = %contact.id, "contact persisted");
            Ok(contact)
        })
        .await
    }

    async fn update_by_id(&self, id: &str, draft: ContactDraft) -> RepositoryResult<Contact> {
        let id: ContactId = id.parse()?;
        self.run_blocking("update_by_id", move |repo| {
            let result = (&repo.contacts, &repo.names).transaction(
                |(contacts, names)| -> ConflictableTransactionResult<Contact, RepositoryError> {
                    let Some(bytes) = contacts.get(id.as_bytes())? else {
                        return abort(RepositoryError::NotFound(id.to_string()));
                    };
                    let mut contact = decode(&bytes).map_err(ConflictableTransactionError::Abort)?;

                    let old_key = contact.name_key();
                    contact.replace_details(draft.clone());
                    let new_key = contact.name_key();

                    if new_key != old_key {
                        if names.get(new_key.as_bytes())?.is_some() {
                            return abort(RepositoryError::Conflict(contact.name.clone()));
                        }
                        names.remove(old_key.as_bytes())?;
                        names.insert(new_key.as_bytes(), id.as_bytes())?;
                    }

                    let value = encode(&contact).map_err(ConflictableTransactionError::Abort)?;
                    contacts.insert(id.as_bytes(), value)?;
                    Ok(contact)
                },
            );
            finish(result)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        let id: ContactId = id.parse()?;
        self.run_blocking("delete_by_id", move |repo| {
            let result = (&repo.contacts, &repo.names).transaction(
                |(contacts, names)| -> ConflictableTransactionResult<(), RepositoryError> {
                    let Some(bytes) = contacts.remove(id.as_bytes())? else {
                        return abort(RepositoryError::NotFound(id.to_string()));
                    };
                    let contact = decode(&bytes).map_err(ConflictableTransactionError::Abort)?;
                    names.remove(contact.name_key().as_bytes())?;
                    Ok(())
                },
            );
            finish(result)
        })
        .await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.run_blocking("count", |repo| Ok(repo.contacts.len()))
            .await
    }

    async fn flush(&self) -> RepositoryResult<()> {
        self.db.flush_async().await.map_err(store_error)?;
        Ok(())
    }
}
