//! Users API handlers.
//!
//! ```text
//! POST /api/v1/users/register {"username":"ada_lovelace"}
//! POST /api/v1/users/login {"username":"ada_lovelace"}
//! POST /api/v1/users/logout
//! GET /api/v1/users/me
//! GET /api/v1/users/{id}
//! ```
//!
//! The forum identifies people by username alone. Registering or logging in
//! stores the user id in the session cookie.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User, UserId, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_id, username_error};

/// Body for `POST /users/register` and `POST /users/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UsernameRequest {
    #[schema(example = "ada_lovelace")]
    pub username: Option<String>,
}

impl TryFrom<UsernameRequest> for Username {
    type Error = Error;

    fn try_from(value: UsernameRequest) -> Result<Self, Self::Error> {
        let raw = value
            .username
            .ok_or_else(|| missing_field_error(FieldName::new("username")))?;
        Username::new(raw).map_err(|err| username_error(&err))
    }
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = UsernameRequest,
    responses(
        (status = 201, description = "Registered", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid username", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UsernameRequest>,
) -> ApiResult<HttpResponse> {
    let username = Username::try_from(payload.into_inner())?;
    let user = state.accounts.register(username).await?;
    session.persist_user(user.id)?;
    Ok(HttpResponse::Created().json(user))
}

/// Sign in with an existing username.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = UsernameRequest,
    responses(
        (status = 200, description = "Signed in", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid username", body = Error),
        (status = 404, description = "Unknown username", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UsernameRequest>,
) -> ApiResult<web::Json<User>> {
    let username = Username::try_from(payload.into_inner())?;
    let user = state.accounts.login(username).await?;
    session.persist_user(user.id)?;
    Ok(web::Json(user))
}

/// End the session. Succeeds without a session too.
#[utoipa::path(
    post,
    path = "/api/v1/users/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/users/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "User no longer exists", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.users.get_user(user_id).await?;
    Ok(web::Json(user))
}

/// Look up a user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id: UserId = parse_id(path.into_inner(), FieldName::new("id"))?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(user))
}
