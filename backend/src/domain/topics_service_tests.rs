//! Tests for the topic service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockTopicRepository;
use crate::domain::{ErrorCode, TopicDraft, UserId};

fn make_service(repo: MockTopicRepository) -> TopicService<MockTopicRepository> {
    TopicService::new(Arc::new(repo))
}

fn user(id: i64) -> UserId {
    UserId::new(id).expect("valid user id")
}

fn topic_id(id: i64) -> TopicId {
    TopicId::new(id).expect("valid topic id")
}

fn topic(id: i64, owner: i64) -> Topic {
    Topic {
        id: topic_id(id),
        title: "Rust".to_owned(),
        description: "Ownership questions".to_owned(),
        created_by: user(owner),
        created_at: Utc::now(),
    }
}

fn summary(id: i64, owner: i64) -> TopicSummary {
    TopicSummary {
        topic: topic(id, owner),
        created_by_username: "quietfox".to_owned(),
        post_count: 2,
    }
}

fn draft() -> TopicDraft {
    TopicDraft::new("Rust 2024", "Edition chatter").expect("valid draft")
}

#[tokio::test]
async fn create_topic_assigns_requester_as_owner() {
    let mut repo = MockTopicRepository::new();
    repo.expect_create()
        .withf(|owner, draft| owner.get() == 7 && draft.title() == "Rust 2024")
        .times(1)
        .return_once(|_, _| Ok(topic(1, 7)));

    let created = make_service(repo)
        .create_topic(CreateTopicRequest {
            requester: user(7),
            draft: draft(),
        })
        .await
        .expect("topic created");
    assert_eq!(created.created_by, user(7));
}

#[tokio::test]
async fn update_topic_by_owner_writes() {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(summary(3, 7))));
    repo.expect_update()
        .times(1)
        .return_once(|_, _| Ok(Some(topic(3, 7))));

    let updated = make_service(repo)
        .update_topic(UpdateTopicRequest {
            requester: user(7),
            topic_id: topic_id(3),
            draft: draft(),
        })
        .await
        .expect("owner may edit");
    assert_eq!(updated.id, topic_id(3));
}

#[rstest]
#[case::update(true)]
#[case::delete(false)]
#[tokio::test]
async fn non_owner_mutation_is_forbidden_and_writes_nothing(#[case] update: bool) {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(summary(3, 7))));
    repo.expect_update().times(0);
    repo.expect_delete().times(0);
    let service = make_service(repo);

    let result = if update {
        service
            .update_topic(UpdateTopicRequest {
                requester: user(8),
                topic_id: topic_id(3),
                draft: draft(),
            })
            .await
            .map(|_| ())
    } else {
        service
            .delete_topic(DeleteTopicRequest {
                requester: user(8),
                topic_id: topic_id(3),
            })
            .await
    };

    let error = result.expect_err("non-owner rejected");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn delete_missing_topic_is_not_found() {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete().times(0);

    let error = make_service(repo)
        .delete_topic(DeleteTopicRequest {
            requester: user(7),
            topic_id: topic_id(99),
        })
        .await
        .expect_err("missing topic");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_topic_by_owner_removes_row() {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(summary(3, 7))));
    repo.expect_delete()
        .withf(|id| id.get() == 3)
        .times(1)
        .return_once(|_| Ok(true));

    make_service(repo)
        .delete_topic(DeleteTopicRequest {
            requester: user(7),
            topic_id: topic_id(3),
        })
        .await
        .expect("owner may delete");
}

#[tokio::test]
async fn list_topics_maps_query_failure_to_internal() {
    let mut repo = MockTopicRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|_| Err(TopicRepositoryError::query("syntax error")));

    let error = make_service(repo)
        .list_topics(None)
        .await
        .expect_err("query failed");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn get_topic_returns_summary() {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(summary(3, 7))));

    let found = make_service(repo)
        .get_topic(topic_id(3))
        .await
        .expect("topic found");
    assert_eq!(found.post_count, 2);
}
