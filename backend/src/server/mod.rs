//! Server construction and middleware wiring.
//!
//! The forum API lives under `/api/v1` behind the cookie session; health
//! checks and the debug-only Swagger UI sit outside it so they work without a
//! session.

mod config;
mod state_builders;

use config::SessionCookie;
pub use config::ServerConfig;
use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use forum_backend::Trace;
#[cfg(debug_assertions)]
use forum_backend::doc::ApiDoc;
use forum_backend::inbound::http::configure_api;
use forum_backend::inbound::http::health::{HealthState, live, ready};
use forum_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const SESSION_COOKIE_NAME: &str = "session";
const SESSION_TTL_DAYS: i64 = 14;

fn session_middleware(cookie: SessionCookie) -> SessionMiddleware<CookieSessionStore> {
    let SessionCookie {
        key,
        secure,
        same_site,
    } = cookie;
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::days(SESSION_TTL_DAYS)),
        )
        .build()
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let forum_api = web::scope("/api/v1")
        .wrap(session_middleware(cookie))
        .configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(forum_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the forum server and mark it ready.
///
/// Every worker shares one [`HttpState`] built from the configured pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        cookie,
        bind_addr,
        db_pool,
    } = config;
    let http_state = build_http_state(&db_pool);
    let worker_health = health_state.clone();
    let secure_cookies = cookie.secure;

    let server = HttpServer::new(move || {
        build_app(worker_health.clone(), http_state.clone(), cookie.clone())
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, secure_cookies, "forum server bound");
    health_state.mark_ready();
    Ok(server)
}
