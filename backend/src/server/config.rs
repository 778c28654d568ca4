//! HTTP server configuration object.

use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allow_any_origin: bool,
}

impl ServerConfig {
    /// Construct a configuration bound to `bind_addr` with permissive CORS.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            allow_any_origin: true,
        }
    }

    /// Toggle the `Access-Control-Allow-Origin: *` response header.
    #[must_use]
    pub fn with_allow_any_origin(mut self, allow_any_origin: bool) -> Self {
        self.allow_any_origin = allow_any_origin;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
