//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use forum_backend::inbound::http::session_config::SessionSettings;
use forum_backend::outbound::persistence::DbPool;

/// Cookie attributes shared by every worker's session middleware.
#[derive(Clone)]
pub(crate) struct SessionCookie {
    pub(crate) key: Key,
    pub(crate) secure: bool,
    pub(crate) same_site: SameSite,
}

impl From<SessionSettings> for SessionCookie {
    fn from(settings: SessionSettings) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = settings;
        Self {
            key,
            secure: cookie_secure,
            same_site,
        }
    }
}

/// Everything [`super::create_server`] needs to build the app.
pub struct ServerConfig {
    pub(crate) cookie: SessionCookie,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Combine validated session settings with the bind address and pool.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            cookie: session.into(),
            bind_addr,
            db_pool,
        }
    }
}
