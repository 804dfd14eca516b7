//! User data model and request payload decoding.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Error;

/// Relational-store identifier, assigned on insert and never client supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// Application user as stored in the relational system of record.
///
/// `name` and `email` are validated by the use-case layer before every
/// write; rows read back from storage are returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Build a user from its stored components.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email; also the cache key and queue payload on creation.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Fields of a user that have not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Build an unsaved user.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Attach the identifier assigned by the relational store.
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.email)
    }
}

/// Decoded request body for create and update.
///
/// Absent fields leave the target untouched; an `id` in the body is
/// ignored because identifiers are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserChanges {
    /// New display name. `nama` is accepted for older clients.
    #[serde(default, alias = "nama", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserChanges {
    /// Apply the changes to a blank user, defaulting missing fields to empty
    /// strings so that validation reports them.
    pub fn into_new_user(self) -> NewUser {
        NewUser::new(self.name.unwrap_or_default(), self.email.unwrap_or_default())
    }

    /// Overwrite the fields of `existing` that are present in this payload.
    pub fn apply_to(self, existing: User) -> User {
        let User { id, name, email } = existing;
        User {
            id,
            name: self.name.unwrap_or(name),
            email: self.email.unwrap_or(email),
        }
    }
}

/// Raw JSON request body as received by an inbound adapter.
///
/// Decoding is deferred to the use-case layer so that existence checks on
/// update run before body validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPayload(Vec<u8>);

impl UserPayload {
    /// Wrap a raw body.
    pub fn from_bytes(body: impl Into<Vec<u8>>) -> Self {
        Self(body.into())
    }

    /// Decode the body into [`UserChanges`].
    ///
    /// # Errors
    /// Returns [`super::ErrorCode::BadRequest`] carrying the decoder message
    /// when the body is not a JSON object of the expected shape.
    pub fn decode(&self) -> Result<UserChanges, Error> {
        // Read an object first: struct decoding alone also accepts arrays.
        let object: Map<String, Value> = serde_json::from_slice(&self.0).map_err(bad_body)?;
        serde_json::from_value(Value::Object(object)).map_err(bad_body)
    }
}

fn bad_body(err: serde_json::Error) -> Error {
    Error::bad_request(err.to_string())
}
