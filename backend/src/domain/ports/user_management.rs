//! Driving port for the user CRUD use-cases.
//!
//! Inbound adapters depend on this trait only; identifiers arrive as the raw
//! path segment because each operation applies its own parse policy.

use async_trait::async_trait;

use crate::domain::{Error, User, UserPayload};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// Validate and create a user, propagating it to every store.
    async fn create(&self, payload: UserPayload) -> Result<User, Error>;

    /// List all users from the system of record.
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// Fetch a single user.
    async fn get(&self, id: &str) -> Result<User, Error>;

    /// Overwrite a user's fields from `payload`.
    async fn update(&self, id: &str, payload: UserPayload) -> Result<User, Error>;

    /// Remove a user from the relational store, document store and cache.
    async fn delete(&self, id: &str) -> Result<(), Error>;
}
