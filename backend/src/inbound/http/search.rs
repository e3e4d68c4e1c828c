//! Search handler.
//!
//! ```text
//! GET /api/v1/search?q=rust
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, SearchResults, SearchTerm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, content_error, missing_field_error};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring matched against titles and bodies.
    pub q: Option<String>,
}

/// Posts and topics matching `q`, newest first, at most 50 of each.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matches", body = SearchResults),
        (status = 400, description = "Missing or blank query", body = Error)
    ),
    tags = ["search"],
    operation_id = "search",
    security((), ("SessionCookie" = []))
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<SearchResults>> {
    let viewer = session.user_id()?;
    let raw = params
        .into_inner()
        .q
        .ok_or_else(|| missing_field_error(FieldName::new("q")))?;
    let term = SearchTerm::new(&raw).map_err(content_error)?;
    Ok(web::Json(state.search.search(viewer, term).await?))
}
