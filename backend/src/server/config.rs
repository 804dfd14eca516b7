//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use userhub::domain::ports::UserManagement;

/// Everything the HTTP server needs once the stores are connected.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserManagement>,
}

impl ServerConfig {
    /// Construct a server configuration around a connected user service.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, users: Arc<dyn UserManagement>) -> Self {
        Self { bind_addr, users }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
