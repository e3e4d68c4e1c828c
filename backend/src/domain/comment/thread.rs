//! Reply threads as an adjacency index.
//!
//! Threads are rebuilt from the flat comment list at read time. Each comment id
//! maps to the ids of its direct replies; nothing holds references to other
//! comments.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Comment;
use crate::domain::CommentId;

/// Parent-to-children index over the comments of one post.
///
/// A comment is a root when it has no parent or when its parent is not part of
/// the indexed set. Roots and children keep the order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentThread {
    roots: Vec<CommentId>,
    children: BTreeMap<CommentId, Vec<CommentId>>,
}

impl CommentThread {
    /// Index `comments` by parent.
    pub fn build<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Self {
        let comments: Vec<&Comment> = comments.into_iter().collect();
        let known: HashSet<CommentId> = comments.iter().map(|comment| comment.id).collect();

        let mut thread = Self::default();
        for comment in comments {
            match comment.parent_comment_id {
                Some(parent) if parent != comment.id && known.contains(&parent) => {
                    thread.children.entry(parent).or_default().push(comment.id);
                }
                _ => thread.roots.push(comment.id),
            }
        }
        thread
    }

    /// Top-level comments.
    pub fn roots(&self) -> &[CommentId] {
        &self.roots
    }

    /// Direct replies to `id`.
    pub fn children(&self, id: CommentId) -> &[CommentId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }
}
