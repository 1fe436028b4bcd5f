//! Post repository
//!
//! `get` is the assembly primitive: it fetches the raw row, then the
//! linked tags and the author projection concurrently, and attaches both.
//! List operations fetch post ids first and assemble each post through
//! `get` with a capped fan-out.

use futures::stream::{self, StreamExt, TryStreamExt};
use sqlx::{PgPool, Row};

use pressbox_core::models::{Author, NewPost, Post, PostDetail, PostUpdate, Tag};

use super::tags::{insert_link, upsert_tags};
use super::DbError;

/// Default cap on concurrent `get` calls while assembling a listing.
const ASSEMBLY_CONCURRENCY: usize = 8;

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
    concurrency: usize,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            concurrency: ASSEMBLY_CONCURRENCY,
        }
    }

    /// Override the assembly fan-out cap (e.g. from `DbConfig`).
    pub fn with_concurrency(pool: &'a PgPool, concurrency: usize) -> Self {
        Self {
            pool,
            concurrency: concurrency.max(1),
        }
    }

    /// Create a post, resolving and linking any supplied tags inside one
    /// transaction, and return it fully assembled.
    pub async fn create(&self, new_post: NewPost) -> Result<PostDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO posts (author_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(new_post.author_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .fetch_one(&mut *tx)
        .await?;
        let post_id: i64 = row.get("id");

        if !new_post.tags.is_empty() {
            let tags = upsert_tags(&mut *tx, &new_post.tags).await?;
            for tag in &tags {
                insert_link(&mut *tx, post_id, tag.id).await?;
            }
        }

        tx.commit().await?;

        self.get(post_id).await
    }

    /// Update a post: column changes and tag reconciliation run inside
    /// one transaction, then the current post is returned assembled.
    ///
    /// When `tags` is set the link set is fully replaced: desired tags
    /// are created-or-fetched, stale links deleted, new links inserted.
    pub async fn update(&self, id: i64, update: PostUpdate) -> Result<PostDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let found = if update.has_column_changes() {
            sqlx::query(
                r#"
                UPDATE posts
                SET title   = COALESCE($2, title),
                    content = COALESCE($3, content)
                WHERE id = $1
                RETURNING id
                "#,
            )
            .bind(id)
            .bind(update.title.as_deref())
            .bind(update.content.as_deref())
            .fetch_optional(&mut *tx)
            .await?
            .is_some()
        } else {
            let (exists,): (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
            exists
        };

        if !found {
            return Err(DbError::NotFound {
                resource: "post",
                id: id.to_string(),
            });
        }

        if let Some(names) = &update.tags {
            let desired = upsert_tags(&mut *tx, names).await?;
            let keep: Vec<i64> = desired.iter().map(|t| t.id).collect();

            // An empty desired set deletes every link for this post.
            sqlx::query("DELETE FROM post_tags WHERE post_id = $1 AND tag_id <> ALL($2)")
                .bind(id)
                .bind(&keep)
                .execute(&mut *tx)
                .await?;

            for tag in &desired {
                insert_link(&mut *tx, id, tag.id).await?;
            }

            tracing::debug!(post_id = id, tags = desired.len(), "reconciled tag links");
        }

        tx.commit().await?;

        self.get(id).await
    }

    /// List all posts, fully assembled, in no guaranteed order.
    pub async fn list(&self) -> Result<Vec<PostDetail>, DbError> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM posts")
            .fetch_all(self.pool)
            .await?;

        self.assemble_many(ids).await
    }

    /// List all posts by one author, fully assembled.
    pub async fn list_by_author(&self, author_id: i64) -> Result<Vec<PostDetail>, DbError> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_all(self.pool)
            .await?;

        self.assemble_many(ids).await
    }

    /// List all posts linked to the tag with this name, fully assembled.
    pub async fn list_by_tag_name(&self, name: &str) -> Result<Vec<PostDetail>, DbError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT p.id
            FROM posts p
            JOIN post_tags pt ON p.id = pt.post_id
            JOIN tags t ON t.id = pt.tag_id
            WHERE t.name = $1
            "#,
        )
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        self.assemble_many(ids).await
    }

    /// Get one post, fully assembled.
    ///
    /// The raw row is fetched first; a missing id is an explicit
    /// `NotFound`, never a partially built object. The linked tags and
    /// the author projection have no data dependency on each other and
    /// are fetched concurrently.
    pub async fn get(&self, id: i64) -> Result<PostDetail, DbError> {
        let row = sqlx::query("SELECT id, author_id, title, content FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "post",
                id: id.to_string(),
            })?;

        let post = Post {
            id: row.get("id"),
            author_id: row.get("author_id"),
            title: row.get("title"),
            content: row.get("content"),
        };

        let tags_fut = async {
            let rows = sqlx::query(
                r#"
                SELECT t.id, t.name
                FROM tags t
                JOIN post_tags pt ON t.id = pt.tag_id
                WHERE pt.post_id = $1
                ORDER BY t.name
                "#,
            )
            .bind(post.id)
            .fetch_all(self.pool)
            .await?;

            Ok::<_, DbError>(
                rows.into_iter()
                    .map(|r| Tag {
                        id: r.get("id"),
                        name: r.get("name"),
                    })
                    .collect::<Vec<_>>(),
            )
        };

        let author_fut = async {
            let row = sqlx::query("SELECT id, username, name, location FROM users WHERE id = $1")
                .bind(post.author_id)
                .fetch_optional(self.pool)
                .await?;

            row.map(|r| Author {
                id: r.get("id"),
                username: r.get("username"),
                name: r.get("name"),
                location: r.get("location"),
            })
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: post.author_id.to_string(),
            })
        };

        let (tags, author) = futures::try_join!(tags_fut, author_fut)?;

        Ok(PostDetail {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
            tags,
        })
    }

    /// Assemble posts by id with at most `concurrency` `get` calls in
    /// flight at once.
    async fn assemble_many(&self, ids: Vec<i64>) -> Result<Vec<PostDetail>, DbError> {
        stream::iter(ids)
            .map(|id| self.get(id))
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await
    }
}
