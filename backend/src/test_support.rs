//! In-memory store doubles shared by unit and integration tests.
//!
//! Each fake keeps its state behind a `Mutex` and can be told to fail every
//! subsequent call with a given port error, which lets tests stop the write
//! pipeline at any store and inspect what the earlier stores kept.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CacheError, DocumentStoreError, PublishError, UserCacheKey, UserDocumentStore,
    UserEventPublisher, UserIndexCache, UserPersistenceError, UserRepository,
};
use crate::domain::{NewUser, User, UserId, UserService};

fn lock<'a, T>(mutex: &'a Mutex<T>, label: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("{label} mutex poisoned"),
    }
}

/// Relational store double assigning sequential identifiers from 1.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<BTreeMap<UserId, User>>,
    next_id: Mutex<i64>,
    failure: Mutex<Option<UserPersistenceError>>,
}

impl InMemoryUserRepository {
    /// Seed a row directly, bypassing identifier assignment.
    pub fn seed(&self, user: User) {
        let mut next_id = lock(&self.next_id, "repository id");
        *next_id = (*next_id).max(user.id().get());
        lock(&self.rows, "repository").insert(user.id(), user);
    }

    /// Fail every later call with `error`.
    pub fn fail_with(&self, error: UserPersistenceError) {
        *lock(&self.failure, "repository failure") = Some(error);
    }

    /// Snapshot of the stored rows in id order.
    pub fn users(&self) -> Vec<User> {
        lock(&self.rows, "repository").values().cloned().collect()
    }

    fn check(&self) -> Result<(), UserPersistenceError> {
        match lock(&self.failure, "repository failure").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.check()?;
        let id = {
            let mut next_id = lock(&self.next_id, "repository id");
            *next_id += 1;
            UserId::new(*next_id)
        };
        let stored = user.clone().into_user(id);
        lock(&self.rows, "repository").insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.check()?;
        Ok(self.users())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        Ok(lock(&self.rows, "repository").get(&id).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.check()?;
        lock(&self.rows, "repository").insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        self.check()?;
        Ok(lock(&self.rows, "repository").remove(&id).is_some())
    }
}

/// Document store double keeping mirror documents in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<Vec<User>>,
    failure: Mutex<Option<DocumentStoreError>>,
}

impl InMemoryDocumentStore {
    /// Fail every later call with `error`.
    pub fn fail_with(&self, error: DocumentStoreError) {
        *lock(&self.failure, "document failure") = Some(error);
    }

    /// Snapshot of the stored documents.
    pub fn documents(&self) -> Vec<User> {
        lock(&self.documents, "documents").clone()
    }

    fn check(&self) -> Result<(), DocumentStoreError> {
        match lock(&self.failure, "document failure").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserDocumentStore for InMemoryDocumentStore {
    async fn insert_one(&self, user: &User) -> Result<(), DocumentStoreError> {
        self.check()?;
        lock(&self.documents, "documents").push(user.clone());
        Ok(())
    }

    async fn update_one(&self, user: &User) -> Result<u64, DocumentStoreError> {
        self.check()?;
        let mut documents = lock(&self.documents, "documents");
        match documents.iter_mut().find(|doc| doc.id() == user.id()) {
            Some(doc) => {
                *doc = user.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: UserId) -> Result<u64, DocumentStoreError> {
        self.check()?;
        let mut documents = lock(&self.documents, "documents");
        match documents.iter().position(|doc| doc.id() == id) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Cache double backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryUserCache {
    entries: Mutex<HashMap<String, UserId>>,
    failure: Mutex<Option<CacheError>>,
}

impl InMemoryUserCache {
    /// Seed an entry directly.
    pub fn seed(&self, key: &str, value: UserId) {
        lock(&self.entries, "cache").insert(key.to_owned(), value);
    }

    /// Fail every later call with `error`.
    pub fn fail_with(&self, error: CacheError) {
        *lock(&self.failure, "cache failure") = Some(error);
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<UserId> {
        lock(&self.entries, "cache").get(key).copied()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        lock(&self.entries, "cache").len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), CacheError> {
        match lock(&self.failure, "cache failure").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserIndexCache for InMemoryUserCache {
    async fn set(&self, key: &UserCacheKey, value: UserId) -> Result<(), CacheError> {
        self.check()?;
        lock(&self.entries, "cache").insert(key.as_str().to_owned(), value);
        Ok(())
    }

    async fn del(&self, key: &UserCacheKey) -> Result<(), CacheError> {
        self.check()?;
        lock(&self.entries, "cache").remove(key.as_str());
        Ok(())
    }
}

/// Publisher double recording `(queue, payload)` pairs.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    messages: Mutex<Vec<(String, String)>>,
    failure: Mutex<Option<PublishError>>,
}

impl RecordingEventPublisher {
    /// Fail every later call with `error`.
    pub fn fail_with(&self, error: PublishError) {
        *lock(&self.failure, "publisher failure") = Some(error);
    }

    /// Messages published so far.
    pub fn messages(&self) -> Vec<(String, String)> {
        lock(&self.messages, "publisher").clone()
    }
}

#[async_trait]
impl UserEventPublisher for RecordingEventPublisher {
    async fn publish(&self, queue: &str, payload: &str) -> Result<(), PublishError> {
        if let Some(error) = lock(&self.failure, "publisher failure").clone() {
            return Err(error);
        }
        lock(&self.messages, "publisher").push((queue.to_owned(), payload.to_owned()));
        Ok(())
    }
}

/// Service type wired over the in-memory doubles.
pub type InMemoryUserService = UserService<
    InMemoryUserRepository,
    InMemoryDocumentStore,
    InMemoryUserCache,
    RecordingEventPublisher,
>;

/// Shared handles onto one set of in-memory stores.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStores {
    pub users: Arc<InMemoryUserRepository>,
    pub documents: Arc<InMemoryDocumentStore>,
    pub cache: Arc<InMemoryUserCache>,
    pub events: Arc<RecordingEventPublisher>,
}

impl InMemoryStores {
    /// Build a service writing to these stores.
    pub fn service(&self) -> InMemoryUserService {
        UserService::new(
            Arc::clone(&self.users),
            Arc::clone(&self.documents),
            Arc::clone(&self.cache),
            Arc::clone(&self.events),
        )
    }
}
