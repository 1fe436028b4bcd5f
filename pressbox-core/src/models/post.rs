//! Post entity: raw row and assembled form
//!
//! `Post` is the row as stored. `PostDetail` is the assembled object the
//! rest of the application consumes: the author id is replaced by an
//! embedded `Author`, and the linked tags are attached.

use serde::Serialize;

use super::tag::{Tag, TagName};
use super::user::Author;

/// Post row as stored
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
}

/// Fully assembled post. Serializes without an `author_id` field.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub tags: Vec<Tag>,
}

/// Input for creating a post. `tags` may be empty.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<TagName>,
}
