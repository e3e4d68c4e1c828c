//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`*Command`, `*Query`) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod comment_repository;
mod comments_command;
mod comments_query;
mod like_repository;
mod post_repository;
mod posts_command;
mod posts_query;
mod search_query;
mod topic_repository;
mod topics_command;
mod topics_query;
mod user_repository;
mod users_query;

pub use accounts_command::AccountsCommand;
#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError, NewComment};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::{
    CommentsCommand, CreateCommentRequest, DeleteCommentRequest, UpdateCommentRequest,
};
pub use comments_query::CommentsQuery;
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
#[cfg(test)]
pub use like_repository::MockLikeRepository;
pub use like_repository::{LikeRepository, LikeRepositoryError};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{CreatePostRequest, DeletePostRequest, PostsCommand, UpdatePostRequest};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use search_query::MockSearchQuery;
pub use search_query::SearchQuery;
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
pub use topic_repository::{TopicRepository, TopicRepositoryError};
#[cfg(test)]
pub use topics_command::MockTopicsCommand;
pub use topics_command::{
    CreateTopicRequest, DeleteTopicRequest, TopicsCommand, UpdateTopicRequest,
};
#[cfg(test)]
pub use topics_query::MockTopicsQuery;
pub use topics_query::TopicsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
