//! Port for the key-value cache indexing users.
use std::fmt;

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

/// Cache key written or removed by the user use-cases.
///
/// Creation indexes users by email while deletion removes the key derived
/// from the numeric id; the two constructors keep that asymmetry visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserCacheKey(String);

impl UserCacheKey {
    /// Key under which a created user's id is stored.
    pub fn for_email(email: &str) -> Self {
        Self(email.to_owned())
    }

    /// Key removed when a user is deleted: the decimal form of the id.
    pub fn for_id(id: UserId) -> Self {
        Self(id.to_string())
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for UserCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum CacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "user cache backend failure: {message}",
        /// The command was rejected.
        Command { message: String } => "user cache command failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserIndexCache: Send + Sync {
    /// Store `value` under `key` without expiry.
    async fn set(&self, key: &UserCacheKey, value: UserId) -> Result<(), CacheError>;

    /// Remove `key`; removing an absent key succeeds.
    async fn del(&self, key: &UserCacheKey) -> Result<(), CacheError>;
}
