//! Domain services wired to Diesel adapters over a migrated test database.
//!
//! Suites keep synchronous test bodies and drive async calls through the
//! context's own Tokio runtime.

use std::future::Future;
use std::sync::Arc;

use forum_backend::domain::ports::{
    AccountsCommand, CreatePostRequest, CreateTopicRequest, PostsCommand, TopicsCommand,
};
use forum_backend::domain::{
    AccountService, CommentService, Post, PostDraft, PostService, SearchService, Topic,
    TopicDraft, TopicService, User, Username,
};
use forum_backend::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselLikeRepository, DieselPostRepository,
    DieselTopicRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use tokio::runtime::Runtime;

use super::embedded_postgres::{ForumDatabase, provision_forum_database};
use super::{handle_cluster_setup_failure, pg_embedded_enabled};

pub type Accounts = AccountService<DieselUserRepository>;
pub type Topics = TopicService<DieselTopicRepository>;
pub type Posts = PostService<DieselPostRepository, DieselTopicRepository, DieselLikeRepository>;
pub type Comments =
    CommentService<DieselCommentRepository, DieselPostRepository, DieselLikeRepository>;
pub type Search = SearchService<DieselPostRepository, DieselTopicRepository>;

pub struct ForumContext {
    runtime: Runtime,
    pub accounts: Accounts,
    pub topics: Topics,
    pub posts: Posts,
    pub comments: Comments,
    pub search: Search,
    /// Unredacted comment rows, for asserting what is actually stored.
    pub comment_store: Arc<DieselCommentRepository>,
    pub database: ForumDatabase,
}

impl ForumContext {
    fn build() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let database = provision_forum_database()?;
        runtime
            .block_on(run_pending_migrations(database.url()))
            .map_err(|err| err.to_string())?;
        let pool = runtime
            .block_on(DbPool::new(
                PoolConfig::new(database.url())
                    .with_max_size(4)
                    .with_min_idle(Some(1)),
            ))
            .map_err(|err| err.to_string())?;

        let users = Arc::new(DieselUserRepository::new(pool.clone()));
        let topics = Arc::new(DieselTopicRepository::new(pool.clone()));
        let posts = Arc::new(DieselPostRepository::new(pool.clone()));
        let comments = Arc::new(DieselCommentRepository::new(pool.clone()));
        let likes = Arc::new(DieselLikeRepository::new(pool));

        Ok(Self {
            runtime,
            accounts: AccountService::new(users),
            topics: TopicService::new(topics.clone()),
            posts: PostService::new(posts.clone(), topics.clone(), likes.clone()),
            comments: CommentService::new(comments.clone(), posts.clone(), likes),
            search: SearchService::new(posts, topics),
            comment_store: comments,
            database,
        })
    }

    /// Block on `future` using the context runtime.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn register(&self, name: &str) -> User {
        let username = Username::new(name).expect("valid username");
        self.run(self.accounts.register(username))
            .expect("registration succeeds")
    }

    pub fn create_topic(&self, author: &User, title: &str) -> Topic {
        let draft = TopicDraft::new(title, "A place to talk").expect("valid topic draft");
        self.run(self.topics.create_topic(CreateTopicRequest {
            requester: author.id,
            draft,
        }))
        .expect("topic created")
    }

    pub fn create_post(&self, author: &User, topic: &Topic, title: &str, content: &str) -> Post {
        let draft = PostDraft::new(title, content).expect("valid post draft");
        self.run(self.posts.create_post(CreatePostRequest {
            requester: author.id,
            topic_id: topic.id,
            draft,
        }))
        .expect("post created")
    }
}

/// Context for an opted-in database suite, or `None` when skipped.
pub fn forum_context() -> Option<ForumContext> {
    if !pg_embedded_enabled() {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }
    match ForumContext::build() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
