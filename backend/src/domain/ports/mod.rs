//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe the four backing stores; each exposes a typed error
//! so adapters map their failures into predictable variants. The driving
//! port [`UserManagement`] is what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod user_document_store;
mod user_event_publisher;
mod user_index_cache;
mod user_management;
mod user_repository;

#[cfg(test)]
pub use user_document_store::MockUserDocumentStore;
pub use user_document_store::{DocumentStoreError, UserDocumentStore};
#[cfg(test)]
pub use user_event_publisher::MockUserEventPublisher;
pub use user_event_publisher::{PublishError, USER_CREATED_QUEUE, UserEventPublisher};
#[cfg(test)]
pub use user_index_cache::MockUserIndexCache;
pub use user_index_cache::{CacheError, UserCacheKey, UserIndexCache};
#[cfg(test)]
pub use user_management::MockUserManagement;
pub use user_management::UserManagement;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
