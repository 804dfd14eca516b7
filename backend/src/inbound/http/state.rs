//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserManagement;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserManagement>,
}

impl HttpState {
    /// Wrap the user use-cases for handler injection.
    pub fn new(users: Arc<dyn UserManagement>) -> Self {
        Self { users }
    }
}
