//! Tag repository
//!
//! Batch get-or-create on the unique name, idempotent post/tag linking,
//! and the connection-level helpers the post transactions reuse.

use sqlx::{PgConnection, PgPool, Row};

use pressbox_core::models::{PostDetail, Tag, TagName};

use super::posts::PostRepo;
use super::DbError;

/// Tag repository
pub struct TagRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Batch get-or-create: insert the names that are new, ignoring
    /// unique-name conflicts, then return one row per distinct requested
    /// name. Input duplicates collapse. An empty input returns an empty
    /// vec.
    pub async fn create_many(&self, names: &[TagName]) -> Result<Vec<Tag>, DbError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.acquire().await?;
        upsert_tags(&mut *conn, names).await
    }

    /// Link one tag to one post. Does nothing if that pair already exists.
    pub async fn link(&self, post_id: i64, tag_id: i64) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        insert_link(&mut *conn, post_id, tag_id).await
    }

    /// Link every tag in the list to the post (each link idempotent)
    /// inside one transaction, then return the fully assembled post.
    pub async fn add_to_post(&self, post_id: i64, tags: &[Tag]) -> Result<PostDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        for tag in tags {
            insert_link(&mut *tx, post_id, tag.id).await?;
        }

        tx.commit().await?;

        PostRepo::new(self.pool).get(post_id).await
    }

    /// List all tags as a plain collection.
    pub async fn list(&self) -> Result<Vec<Tag>, DbError> {
        let rows = sqlx::query("SELECT id, name FROM tags ORDER BY name")
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Tag {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }
}

/// Insert all names ignoring unique-name conflicts, then select the rows
/// for every requested name. Takes a connection so the post transactions
/// can run it on their own transaction handle.
pub(crate) async fn upsert_tags(
    conn: &mut PgConnection,
    names: &[TagName],
) -> Result<Vec<Tag>, DbError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<String> = names.iter().map(|n| n.as_str().to_owned()).collect();

    sqlx::query(
        r#"
        INSERT INTO tags (name)
        SELECT name FROM UNNEST($1::text[]) AS incoming(name)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(&names)
    .execute(&mut *conn)
    .await?;

    let rows = sqlx::query("SELECT id, name FROM tags WHERE name = ANY($1) ORDER BY name")
        .bind(&names)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| Tag {
            id: r.get("id"),
            name: r.get("name"),
        })
        .collect())
}

/// Insert one association row, ignoring an existing pair.
pub(crate) async fn insert_link(
    conn: &mut PgConnection,
    post_id: i64,
    tag_id: i64,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO post_tags (post_id, tag_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id, tag_id) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(tag_id)
    .execute(conn)
    .await?;

    Ok(())
}
