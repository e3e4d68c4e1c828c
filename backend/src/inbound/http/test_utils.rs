//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};

use crate::domain::ports::{
    MockAccountsCommand, MockCommentsCommand, MockCommentsQuery, MockPostsCommand,
    MockPostsQuery, MockSearchQuery, MockTopicsCommand, MockTopicsQuery, MockUsersQuery,
};
use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const LOGIN_PATH: &str = "/__test/login";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// One mock per driving port. Configure the ones a test needs; calls to the
/// rest panic.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountsCommand,
    pub users: MockUsersQuery,
    pub topics: MockTopicsCommand,
    pub topics_query: MockTopicsQuery,
    pub posts: MockPostsCommand,
    pub posts_query: MockPostsQuery,
    pub comments: MockCommentsCommand,
    pub comments_query: MockCommentsQuery,
    pub search: MockSearchQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            accounts: Arc::new(self.accounts),
            users: Arc::new(self.users),
            topics: Arc::new(self.topics),
            topics_query: Arc::new(self.topics_query),
            posts: Arc::new(self.posts),
            posts_query: Arc::new(self.posts_query),
            comments: Arc::new(self.comments),
            comments_query: Arc::new(self.comments_query),
            search: Arc::new(self.search),
        }
    }
}

async fn test_login(session: SessionContext, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let user_id: UserId = parse_id(path.into_inner(), FieldName::new("id"))?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// The full `/api/v1` surface over `ports`, plus a route that signs a user in
/// without touching the accounts port.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .route(&format!("{LOGIN_PATH}/{{id}}"), web::post().to(test_login))
        .service(web::scope("/api/v1").configure(super::configure_api))
}

/// Sign in as `user_id` and return the session cookie.
pub async fn login_as(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    user_id: i64,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri(&format!("{LOGIN_PATH}/{user_id}"))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "test login failed");
    session_cookie(&response)
}

pub fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}
