//! User use-case orchestration across the four backing stores.
//!
//! Every mutation runs as a linear pipeline: decode, validate, then write to
//! each store in a fixed order. The first failure ends the pipeline and is
//! returned as-is. Stores written before the failure keep their data; the
//! error details list them under `completed` so callers can see how far the
//! write got.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CacheError, DocumentStoreError, PublishError, USER_CREATED_QUEUE, UserCacheKey,
    UserDocumentStore, UserEventPublisher, UserIndexCache, UserManagement, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, NAME_MAX_LENGTH, NAME_MIN_LENGTH, User, UserId, UserPayload, validate_email,
    validate_name_length,
};

/// Backing store touched by a use-case step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Store {
    /// Relational system of record.
    Relational,
    /// Document-store mirror.
    Document,
    /// Email index cache.
    Cache,
    /// Notification queue.
    Queue,
}

trait FailureCause: fmt::Display {
    fn kind(&self) -> &'static str;
}

macro_rules! impl_failure_cause {
    ($($error:ty),* $(,)?) => {
        $(
            impl FailureCause for $error {
                fn kind(&self) -> &'static str {
                    <$error>::kind(self)
                }
            }
        )*
    };
}

impl_failure_cause!(
    UserPersistenceError,
    DocumentStoreError,
    CacheError,
    PublishError
);

/// Tracks which stores an operation has already written.
struct Propagation {
    operation: &'static str,
    user_id: Option<UserId>,
    completed: Vec<Store>,
}

impl Propagation {
    fn new(operation: &'static str) -> Self {
        Self {
            operation,
            user_id: None,
            completed: Vec::new(),
        }
    }

    fn for_user(operation: &'static str, user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::new(operation)
        }
    }

    fn record(&mut self, store: Store) {
        self.completed.push(store);
    }

    fn failure(&self, store: Store, message: &str, cause: &dyn FailureCause) -> Error {
        if self.completed.is_empty() {
            debug!(
                operation = self.operation,
                user_id = ?self.user_id.map(UserId::get),
                failed_store = ?store,
                error_kind = cause.kind(),
                error = %cause,
                "user operation failed before any store was written"
            );
        } else {
            warn!(
                operation = self.operation,
                user_id = ?self.user_id.map(UserId::get),
                failed_store = ?store,
                completed = ?self.completed,
                error_kind = cause.kind(),
                error = %cause,
                "user propagation stopped after partial write"
            );
        }

        Error::store_failure(message).with_details(json!({
            "store": store,
            "completed": self.completed,
            "cause": cause.to_string(),
        }))
    }
}

fn not_found() -> Error {
    Error::not_found("user not found")
}

/// Check email then name, in that order, so a payload failing both reports
/// the email problem.
fn validate_fields(name: &str, email: &str) -> Result<(), Error> {
    if !validate_email(email) {
        return Err(
            Error::bad_request("invalid email format").with_details(json!({
                "field": "email",
                "code": "invalid_email",
            })),
        );
    }
    if !validate_name_length(name) {
        return Err(
            Error::bad_request("name length out of range").with_details(json!({
                "field": "name",
                "code": "name_length",
                "min": NAME_MIN_LENGTH,
                "max": NAME_MAX_LENGTH,
            })),
        );
    }
    Ok(())
}

/// User use-case service implementing [`UserManagement`].
///
/// Holds shared handles to the four store adapters. It keeps no
/// request-scoped state, so one instance serves concurrent requests.
pub struct UserService<R, D, C, P> {
    users: Arc<R>,
    documents: Arc<D>,
    cache: Arc<C>,
    events: Arc<P>,
}

impl<R, D, C, P> Clone for UserService<R, D, C, P> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            documents: Arc::clone(&self.documents),
            cache: Arc::clone(&self.cache),
            events: Arc::clone(&self.events),
        }
    }
}

impl<R, D, C, P> UserService<R, D, C, P> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<R>, documents: Arc<D>, cache: Arc<C>, events: Arc<P>) -> Self {
        Self {
            users,
            documents,
            cache,
            events,
        }
    }
}

impl<R, D, C, P> UserService<R, D, C, P>
where
    R: UserRepository,
    D: UserDocumentStore,
    C: UserIndexCache,
    P: UserEventPublisher,
{
    /// Resolve a path identifier to an existing row.
    ///
    /// Unparseable identifiers cannot match a row, so they report not found.
    async fn load_existing(&self, raw_id: &str, operation: &'static str) -> Result<User, Error> {
        let Ok(id) = raw_id.parse::<UserId>() else {
            debug!(operation, raw_id, "user id is not an integer");
            return Err(not_found());
        };

        self.users
            .find_by_id(id)
            .await
            .map_err(|err| {
                Propagation::for_user(operation, id).failure(
                    Store::Relational,
                    "failed to retrieve user",
                    &err,
                )
            })?
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl<R, D, C, P> UserManagement for UserService<R, D, C, P>
where
    R: UserRepository,
    D: UserDocumentStore,
    C: UserIndexCache,
    P: UserEventPublisher,
{
    async fn create(&self, payload: UserPayload) -> Result<User, Error> {
        let new_user = payload.decode()?.into_new_user();
        validate_fields(new_user.name(), new_user.email())?;

        let mut propagation = Propagation::new("create");
        let user = self.users.insert(&new_user).await.map_err(|err| {
            propagation.failure(Store::Relational, "failed to create user", &err)
        })?;
        propagation.user_id = Some(user.id());
        propagation.record(Store::Relational);

        self.documents.insert_one(&user).await.map_err(|err| {
            propagation.failure(
                Store::Document,
                "failed to store user in document store",
                &err,
            )
        })?;
        propagation.record(Store::Document);

        self.cache
            .set(&UserCacheKey::for_email(user.email()), user.id())
            .await
            .map_err(|err| {
                propagation.failure(Store::Cache, "failed to index user in cache", &err)
            })?;
        propagation.record(Store::Cache);

        self.events
            .publish(USER_CREATED_QUEUE, user.email())
            .await
            .map_err(|err| {
                propagation.failure(Store::Queue, "failed to publish user created event", &err)
            })?;

        info!(user_id = user.id().get(), "user created");
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.users.find_all().await.map_err(|err| {
            Propagation::new("list").failure(Store::Relational, "failed to retrieve users", &err)
        })
    }

    async fn get(&self, id: &str) -> Result<User, Error> {
        self.load_existing(id, "get").await
    }

    async fn update(&self, id: &str, payload: UserPayload) -> Result<User, Error> {
        let existing = self.load_existing(id, "update").await?;
        let updated = payload.decode()?.apply_to(existing);
        validate_fields(updated.name(), updated.email())?;

        let mut propagation = Propagation::for_user("update", updated.id());
        self.users.save(&updated).await.map_err(|err| {
            propagation.failure(Store::Relational, "failed to update user", &err)
        })?;
        propagation.record(Store::Relational);

        let matched = self.documents.update_one(&updated).await.map_err(|err| {
            propagation.failure(
                Store::Document,
                "failed to update user in document store",
                &err,
            )
        })?;
        if matched == 0 {
            warn!(
                user_id = updated.id().get(),
                "no mirrored document matched user id during update"
            );
        }

        info!(user_id = updated.id().get(), "user updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        let id: UserId = id.parse().map_err(|_| {
            Error::bad_request("invalid user id").with_details(json!({
                "field": "id",
                "code": "invalid_user_id",
            }))
        })?;

        let mut propagation = Propagation::for_user("delete", id);
        match self.users.delete(id).await {
            Ok(true) => propagation.record(Store::Relational),
            Ok(false) => return Err(not_found()),
            Err(err) => {
                warn!(
                    user_id = id.get(),
                    error_kind = err.kind(),
                    error = %err,
                    "relational delete failed; reporting user as not found"
                );
                return Err(not_found());
            }
        }

        self.documents.delete_one(id).await.map_err(|err| {
            propagation.failure(
                Store::Document,
                "failed to delete user from document store",
                &err,
            )
        })?;
        propagation.record(Store::Document);

        // Removes the id-keyed entry; the email-keyed entry written on
        // create is left in place.
        self.cache
            .del(&UserCacheKey::for_id(id))
            .await
            .map_err(|err| {
                propagation.failure(Store::Cache, "failed to delete user cache entry", &err)
            })?;

        info!(user_id = id.get(), "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
