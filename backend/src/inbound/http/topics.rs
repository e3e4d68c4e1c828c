//! Topic handlers.
//!
//! ```text
//! GET /api/v1/topics?limit=20&offset=0
//! POST /api/v1/topics {"title":"Rust","description":"All things Rust"}
//! GET /api/v1/topics/{id}
//! PUT /api/v1/topics/{id}
//! DELETE /api/v1/topics/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateTopicRequest, DeleteTopicRequest, UpdateTopicRequest};
use crate::domain::{Error, Topic, TopicDraft, TopicId, TopicSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::PageQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, content_error, missing_field_error, parse_id};

/// Body for creating or replacing a topic.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TopicRequest {
    #[schema(example = "Rust")]
    pub title: Option<String>,
    #[schema(example = "Ownership, lifetimes, and everything in between")]
    pub description: Option<String>,
}

impl TryFrom<TopicRequest> for TopicDraft {
    type Error = Error;

    fn try_from(value: TopicRequest) -> Result<Self, Self::Error> {
        let title = value
            .title
            .ok_or_else(|| missing_field_error(FieldName::new("title")))?;
        let description = value
            .description
            .ok_or_else(|| missing_field_error(FieldName::new("description")))?;
        TopicDraft::new(&title, &description).map_err(content_error)
    }
}

fn topic_id(path: web::Path<i64>) -> Result<TopicId, Error> {
    parse_id(path.into_inner(), FieldName::new("id"))
}

/// List topics newest first with post counts.
#[utoipa::path(
    get,
    path = "/api/v1/topics",
    params(PageQuery),
    responses(
        (status = 200, description = "Topics", body = [TopicSummary]),
        (status = 400, description = "Invalid paging parameters", body = Error)
    ),
    tags = ["topics"],
    operation_id = "listTopics",
    security([])
)]
#[get("/topics")]
pub async fn list_topics(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<TopicSummary>>> {
    let page = query.page()?;
    let topics = state.topics_query.list_topics(page).await?;
    Ok(web::Json(topics))
}

/// Create a topic owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/topics",
    request_body = TopicRequest,
    responses(
        (status = 201, description = "Created", body = Topic),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["topics"],
    operation_id = "createTopic"
)]
#[post("/topics")]
pub async fn create_topic(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TopicRequest>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let draft = TopicDraft::try_from(payload.into_inner())?;
    let topic = state
        .topics
        .create_topic(CreateTopicRequest { requester, draft })
        .await?;
    Ok(HttpResponse::Created().json(topic))
}

/// Fetch one topic with its post count.
#[utoipa::path(
    get,
    path = "/api/v1/topics/{id}",
    params(("id" = i64, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Topic", body = TopicSummary),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["topics"],
    operation_id = "getTopic",
    security([])
)]
#[get("/topics/{id}")]
pub async fn get_topic(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TopicSummary>> {
    let id = topic_id(path)?;
    Ok(web::Json(state.topics_query.get_topic(id).await?))
}

/// Replace a topic's title and description. Owner only.
#[utoipa::path(
    put,
    path = "/api/v1/topics/{id}",
    params(("id" = i64, Path, description = "Topic id")),
    request_body = TopicRequest,
    responses(
        (status = 200, description = "Updated", body = Topic),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["topics"],
    operation_id = "updateTopic"
)]
#[put("/topics/{id}")]
pub async fn update_topic(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<TopicRequest>,
) -> ApiResult<web::Json<Topic>> {
    let requester = session.require_user_id()?;
    let topic_id = topic_id(path)?;
    let draft = TopicDraft::try_from(payload.into_inner())?;
    let topic = state
        .topics
        .update_topic(UpdateTopicRequest {
            requester,
            topic_id,
            draft,
        })
        .await?;
    Ok(web::Json(topic))
}

/// Delete a topic with all of its posts. Owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/topics/{id}",
    params(("id" = i64, Path, description = "Topic id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["topics"],
    operation_id = "deleteTopic"
)]
#[delete("/topics/{id}")]
pub async fn delete_topic(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let topic_id = topic_id(path)?;
    state
        .topics
        .delete_topic(DeleteTopicRequest {
            requester,
            topic_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{MockPorts, login_as, test_app, user_id};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::DateTime;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn topic(raw_id: i64, owner: UserId) -> Topic {
        Topic {
            id: TopicId::new(raw_id).expect("valid id"),
            title: "Rust".to_owned(),
            description: "All things Rust".to_owned(),
            created_by: owner,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).expect("timestamp"),
        }
    }

    #[actix_web::test]
    async fn create_requires_a_session() {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/topics")
                .set_json(json!({ "title": "Rust", "description": "All things Rust" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_passes_the_session_user_as_owner() {
        let mut ports = MockPorts::default();
        ports
            .topics
            .expect_create_topic()
            .withf(|request| {
                request.requester == user_id(4)
                    && request.draft.title() == "Rust"
                    && request.draft.description() == "All things Rust"
            })
            .times(1)
            .return_once(|request| Ok(topic(1, request.requester)));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = login_as(&app, 4).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/topics")
                .cookie(cookie)
                .set_json(json!({ "title": " Rust ", "description": "All things Rust" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["created_by"], 4);
    }

    #[rstest]
    #[case::missing_title(json!({ "description": "d" }), "title", "missing_field")]
    #[case::blank_description(json!({ "title": "t", "description": " " }), "description", "empty_field")]
    #[actix_web::test]
    async fn create_validates_the_draft(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        let cookie = login_as(&app, 4).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/topics")
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], code);
    }

    #[actix_web::test]
    async fn list_forwards_paging_parameters() {
        let mut ports = MockPorts::default();
        ports
            .topics_query
            .expect_list_topics()
            .withf(|page| page.is_some_and(|p| p.limit() == 5 && p.offset() == 10))
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/topics?limit=5&offset=10")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn list_without_parameters_is_unpaged() {
        let mut ports = MockPorts::default();
        ports
            .topics_query
            .expect_list_topics()
            .withf(Option::is_none)
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/topics").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[case::zero("/api/v1/topics?limit=0")]
    #[case::too_many("/api/v1/topics?limit=101")]
    #[case::negative("/api/v1/topics?offset=-1")]
    #[actix_web::test]
    async fn list_rejects_invalid_paging(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_by_non_owner_is_forbidden() {
        let mut ports = MockPorts::default();
        ports
            .topics
            .expect_update_topic()
            .withf(|request| request.requester == user_id(8) && request.topic_id.get() == 1)
            .times(1)
            .return_once(|_| Err(Error::forbidden("not authorised to edit this topic")));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = login_as(&app, 8).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/topics/1")
                .cookie(cookie)
                .set_json(json!({ "title": "Mine now", "description": "Taken over" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn delete_returns_no_content() {
        let mut ports = MockPorts::default();
        ports
            .topics
            .expect_delete_topic()
            .withf(|request| request.requester == user_id(2) && request.topic_id.get() == 6)
            .times(1)
            .return_once(|_| Ok(()));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = login_as(&app, 2).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/topics/6")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn get_missing_topic_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .topics_query
            .expect_get_topic()
            .times(1)
            .return_once(|id| Err(Error::not_found(format!("topic {id} not found"))));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/topics/77").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
