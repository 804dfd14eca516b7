//! Domain primitives, validation and the user use-case service.
//!
//! Purpose: define the user entity and its request payload, the field
//! predicates applied before any write, the ports each backing store
//! implements, and the service that sequences writes across them.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): stored user identity.
//! - UserService: orchestrates the relational, document, cache and queue
//!   writes behind [`ports::UserManagement`].

pub mod error;
pub mod ports;
pub mod user;
mod user_service;
mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{NewUser, User, UserChanges, UserId, UserPayload};
pub use self::user_service::{Store, UserService};
pub use self::validation::{
    NAME_MAX_LENGTH, NAME_MIN_LENGTH, validate_email, validate_name_length,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use userhub::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("user not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
