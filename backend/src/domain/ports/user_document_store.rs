//! Port for the denormalised document-store mirror of users.
//!
//! Documents are addressed by the numeric `id` field copied from the
//! relational row, never by the store's native document identifier.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the document store adapter.
    pub enum DocumentStoreError {
        /// Store is unreachable or the client could not be built.
        Connection { message: String } => "document store connection failed: {message}",
        /// The store rejected the command.
        Operation { message: String } => "document store operation failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDocumentStore: Send + Sync {
    /// Insert a mirror document for `user`.
    async fn insert_one(&self, user: &User) -> Result<(), DocumentStoreError>;

    /// Set `name` and `email` on the document whose `id` field matches.
    ///
    /// Returns the number of matched documents; zero is not an error.
    async fn update_one(&self, user: &User) -> Result<u64, DocumentStoreError>;

    /// Delete the document whose `id` field matches, returning the number
    /// of removed documents.
    async fn delete_one(&self, id: UserId) -> Result<u64, DocumentStoreError>;
}
