//! Forum domain primitives, aggregates, ports, and services.
//!
//! Purpose: define strongly typed forum entities and the use-cases that
//! operate on them. Types here know nothing about HTTP or SQL; inbound
//! adapters call the driving ports and outbound adapters implement the
//! driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Topic, Post, Comment and their read views.
//! - LikeTarget and LikeToggle: the toggle-like contract.
//! - Services implementing the driving ports in [`ports`].

pub mod comment;
pub mod content;
pub mod error;
pub mod ids;
pub mod likes;
pub mod ownership;
pub mod pagination;
pub mod ports;
pub mod post;
pub mod search;
pub mod topic;
pub mod trace_id;
pub mod user;

mod accounts_service;
mod comments_service;
mod posts_service;
mod search_service;
mod topics_service;

pub use self::accounts_service::AccountService;
pub use self::comment::{
    COMMENT_CONTENT_MAX, Comment, CommentDraft, CommentThread, CommentView, PostComments,
    REDACTED_AUTHOR, REDACTED_CONTENT,
};
pub use self::comments_service::CommentService;
pub use self::content::ContentValidationError;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CommentId, IdValidationError, PostId, TopicId, UserId};
pub use self::likes::{LikeTarget, LikeToggle};
pub use self::ownership::{Owned, ensure_owner};
pub use self::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageValidationError};
pub use self::post::{POST_CONTENT_MAX, POST_TITLE_MAX, Post, PostDraft, PostView};
pub use self::posts_service::PostService;
pub use self::search::{SEARCH_RESULT_LIMIT, SEARCH_TERM_MAX, SearchResults, SearchTerm};
pub use self::search_service::SearchService;
pub use self::topic::{TOPIC_DESCRIPTION_MAX, TOPIC_TITLE_MAX, Topic, TopicDraft, TopicSummary};
pub use self::topics_service::TopicService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, USERNAME_MIN, User, UserValidationError, Username};
