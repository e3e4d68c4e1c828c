//! Tests for the comment service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    LikeRepositoryError, MockCommentRepository, MockLikeRepository, MockPostRepository,
};
use crate::domain::{
    CommentDraft, ErrorCode, Post, PostView, REDACTED_AUTHOR, REDACTED_CONTENT, TopicId,
};

type Service = CommentService<MockCommentRepository, MockPostRepository, MockLikeRepository>;

fn make_service(
    comments: MockCommentRepository,
    posts: MockPostRepository,
    likes: MockLikeRepository,
) -> Service {
    CommentService::new(Arc::new(comments), Arc::new(posts), Arc::new(likes))
}

fn user(id: i64) -> UserId {
    UserId::new(id).expect("valid user id")
}

fn post_id(id: i64) -> PostId {
    PostId::new(id).expect("valid post id")
}

fn comment_id(id: i64) -> CommentId {
    CommentId::new(id).expect("valid comment id")
}

fn comment(id: i64, post: i64, owner: i64, deleted: bool) -> Comment {
    let now = Utc::now();
    Comment {
        id: comment_id(id),
        post_id: post_id(post),
        user_id: user(owner),
        parent_comment_id: None,
        content: "Try a Box".to_owned(),
        likes: 4,
        deleted,
        created_at: now,
        updated_at: now,
    }
}

fn comment_view(id: i64, post: i64, owner: i64, deleted: bool) -> CommentView {
    CommentView {
        comment: comment(id, post, owner, deleted),
        username: "quietfox".to_owned(),
        liked_by_user: true,
    }
}

fn post_view(id: i64) -> PostView {
    let now = Utc::now();
    PostView {
        post: Post {
            id: post_id(id),
            topic_id: TopicId::new(1).expect("valid topic id"),
            user_id: user(1),
            title: "Recursion".to_owned(),
            content: "Infinite size".to_owned(),
            likes: 0,
            created_at: now,
            updated_at: now,
        },
        username: "quietfox".to_owned(),
        topic_title: "Rust".to_owned(),
        liked_by_user: false,
    }
}

fn draft() -> CommentDraft {
    CommentDraft::new("Use indirection").expect("valid draft")
}

fn posts_with(id: i64) -> MockPostRepository {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .times(1)
        .return_once(move |_, _| Ok(Some(post_view(id))));
    posts
}

#[tokio::test]
async fn create_comment_on_missing_post_is_not_found() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().times(1).return_once(|_, _| Ok(None));
    let mut comments = MockCommentRepository::new();
    comments.expect_create().times(0);

    let error = make_service(comments, posts, MockLikeRepository::new())
        .create_comment(CreateCommentRequest {
            requester: user(2),
            post_id: post_id(5),
            parent_comment_id: None,
            draft: draft(),
        })
        .await
        .expect_err("post missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_reply_checks_parent_post() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(Some(comment_view(8, 6, 3, false))));
    comments.expect_create().times(0);

    let error = make_service(comments, posts_with(5), MockLikeRepository::new())
        .create_comment(CreateCommentRequest {
            requester: user(2),
            post_id: post_id(5),
            parent_comment_id: Some(comment_id(8)),
            draft: draft(),
        })
        .await
        .expect_err("parent on other post");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_reply_with_unknown_parent_is_invalid() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(None));
    comments.expect_create().times(0);

    let error = make_service(comments, posts_with(5), MockLikeRepository::new())
        .create_comment(CreateCommentRequest {
            requester: user(2),
            post_id: post_id(5),
            parent_comment_id: Some(comment_id(8)),
            draft: draft(),
        })
        .await
        .expect_err("parent missing");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_reply_to_comment_on_same_post() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(Some(comment_view(8, 5, 3, false))));
    comments
        .expect_create()
        .withf(|new, draft| {
            new.user_id.get() == 2
                && new.parent_comment_id == Some(comment_id(8))
                && draft.content() == "Use indirection"
        })
        .times(1)
        .return_once(|_, _| {
            let mut created = comment(9, 5, 2, false);
            created.parent_comment_id = Some(comment_id(8));
            created.likes = 0;
            Ok(created)
        });

    let created = make_service(comments, posts_with(5), MockLikeRepository::new())
        .create_comment(CreateCommentRequest {
            requester: user(2),
            post_id: post_id(5),
            parent_comment_id: Some(comment_id(8)),
            draft: draft(),
        })
        .await
        .expect("reply created");
    assert_eq!(created.parent_comment_id, Some(comment_id(8)));
}

#[tokio::test]
async fn update_deleted_comment_is_conflict() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(Some(comment_view(8, 5, 2, true))));
    comments.expect_update_content().times(0);

    let error = make_service(comments, MockPostRepository::new(), MockLikeRepository::new())
        .update_comment(UpdateCommentRequest {
            requester: user(2),
            comment_id: comment_id(8),
            draft: draft(),
        })
        .await
        .expect_err("deleted");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(Some(comment_view(8, 5, 2, false))));
    comments.expect_update_content().times(0);

    let error = make_service(comments, MockPostRepository::new(), MockLikeRepository::new())
        .update_comment(UpdateCommentRequest {
            requester: user(3),
            comment_id: comment_id(8),
            draft: draft(),
        })
        .await
        .expect_err("not owner");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_racing_delete_is_conflict() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(Some(comment_view(8, 5, 2, false))));
    comments
        .expect_update_content()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = make_service(comments, MockPostRepository::new(), MockLikeRepository::new())
        .update_comment(UpdateCommentRequest {
            requester: user(2),
            comment_id: comment_id(8),
            draft: draft(),
        })
        .await
        .expect_err("deleted meanwhile");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case::live(false)]
#[case::already_deleted(true)]
#[tokio::test]
async fn owner_delete_marks_comment(#[case] already_deleted: bool) {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(move |_, _| Ok(Some(comment_view(8, 5, 2, already_deleted))));
    comments
        .expect_mark_deleted()
        .withf(|id| id.get() == 8)
        .times(1)
        .return_once(|_| Ok(()));

    make_service(comments, MockPostRepository::new(), MockLikeRepository::new())
        .delete_comment(DeleteCommentRequest {
            requester: user(2),
            comment_id: comment_id(8),
        })
        .await
        .expect("delete is idempotent");
}

#[tokio::test]
async fn delete_by_non_owner_is_forbidden_even_when_deleted() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(Some(comment_view(8, 5, 2, true))));
    comments.expect_mark_deleted().times(0);

    let error = make_service(comments, MockPostRepository::new(), MockLikeRepository::new())
        .delete_comment(DeleteCommentRequest {
            requester: user(3),
            comment_id: comment_id(8),
        })
        .await
        .expect_err("not owner");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn toggle_like_on_deleted_comment_is_conflict() {
    let mut comments = MockCommentRepository::new();
    comments.expect_find_by_id().times(0);
    let mut likes = MockLikeRepository::new();
    likes
        .expect_toggle()
        .times(1)
        .return_once(|_, _| Err(LikeRepositoryError::target_deleted("comment 8")));

    let error = make_service(comments, MockPostRepository::new(), likes)
        .toggle_comment_like(user(3), comment_id(8))
        .await
        .expect_err("deleted");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "comment 8 has been deleted");
}

#[tokio::test]
async fn toggle_like_on_missing_comment_is_not_found() {
    let mut likes = MockLikeRepository::new();
    likes
        .expect_toggle()
        .times(1)
        .return_once(|_, _| Err(LikeRepositoryError::target_not_found("comment 8")));

    let error = make_service(
        MockCommentRepository::new(),
        MockPostRepository::new(),
        likes,
    )
    .toggle_comment_like(user(3), comment_id(8))
    .await
    .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn toggle_like_on_live_comment_unlikes() {
    let mut likes = MockLikeRepository::new();
    likes
        .expect_toggle()
        .withf(|target, _| *target == LikeTarget::Comment(comment_id(8)))
        .times(1)
        .return_once(|_, _| Ok(LikeToggle::unliked(4)));

    let outcome = make_service(MockCommentRepository::new(), MockPostRepository::new(), likes)
        .toggle_comment_like(user(3), comment_id(8))
        .await
        .expect("toggled");
    assert!(!outcome.liked_by_user);
    assert_eq!(outcome.likes, 3);
}

#[tokio::test]
async fn get_comment_redacts_deleted() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(1)
        .return_once(|_, _| Ok(Some(comment_view(8, 5, 2, true))));

    let view = make_service(comments, MockPostRepository::new(), MockLikeRepository::new())
        .get_comment(None, comment_id(8))
        .await
        .expect("comment found");
    assert_eq!(view.comment.content, REDACTED_CONTENT);
    assert_eq!(view.username, REDACTED_AUTHOR);
    assert_eq!(view.comment.likes, 0);
    assert_eq!(view.comment.id, comment_id(8));
}

#[tokio::test]
async fn list_post_comments_redacts_and_threads() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_list_by_post()
        .times(1)
        .return_once(|_, _| {
            let mut reply = comment_view(9, 5, 3, false);
            reply.comment.parent_comment_id = Some(comment_id(8));
            Ok(vec![comment_view(8, 5, 2, true), reply])
        });

    let listed = make_service(comments, posts_with(5), MockLikeRepository::new())
        .list_post_comments(Some(user(3)), post_id(5))
        .await
        .expect("comments listed");
    assert_eq!(listed.comments.len(), 2);
    assert_eq!(listed.comments[0].comment.content, REDACTED_CONTENT);
    assert_eq!(listed.comments[1].comment.content, "Try a Box");
    assert_eq!(listed.thread.roots(), &[comment_id(8)]);
    assert_eq!(listed.thread.children(comment_id(8)), &[comment_id(9)]);
}

#[tokio::test]
async fn list_comments_for_missing_post_is_not_found() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().times(1).return_once(|_, _| Ok(None));
    let mut comments = MockCommentRepository::new();
    comments.expect_list_by_post().times(0);

    let error = make_service(comments, posts, MockLikeRepository::new())
        .list_post_comments(None, post_id(5))
        .await
        .expect_err("post missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
