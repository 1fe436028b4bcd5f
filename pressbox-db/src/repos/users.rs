//! User repository
//!
//! Conflict-ignore insert on the unique username, typed partial updates
//! bound to static SQL, and listings that never select the password.

use sqlx::{PgPool, Row};

use pressbox_core::models::{NewUser, User, UserSummary, UserUpdate, UserWithPosts};

use super::posts::PostRepo;
use super::DbError;

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a user.
    ///
    /// Returns `None` when the username is already taken: the insert is
    /// skipped via ON CONFLICT and the existing row is left unmodified.
    pub async fn create(&self, new_user: NewUser) -> Result<Option<User>, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password, name, location)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password, name, location, active
            "#,
        )
        .bind(new_user.username.as_str())
        .bind(&new_user.password)
        .bind(&new_user.name)
        .bind(&new_user.location)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
            password: r.get("password"),
            name: r.get("name"),
            location: r.get("location"),
            active: r.get("active"),
        }))
    }

    /// Update only the supplied fields of a user, returning the updated row.
    ///
    /// An empty update returns `Ok(None)` without issuing any SQL.
    pub async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, DbError> {
        if update.is_empty() {
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                password = COALESCE($3, password),
                name     = COALESCE($4, name),
                location = COALESCE($5, location),
                active   = COALESCE($6, active)
            WHERE id = $1
            RETURNING id, username, password, name, location, active
            "#,
        )
        .bind(id)
        .bind(update.username.as_ref().map(|u| u.as_str()))
        .bind(update.password.as_deref())
        .bind(update.name.as_deref())
        .bind(update.location.as_deref())
        .bind(update.active)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })?;

        Ok(Some(User {
            id: row.get("id"),
            username: row.get("username"),
            password: row.get("password"),
            name: row.get("name"),
            location: row.get("location"),
            active: row.get("active"),
        }))
    }

    /// List all users. The password column is never selected.
    pub async fn list(&self) -> Result<Vec<UserSummary>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, name, location, active
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| UserSummary {
                id: r.get("id"),
                username: r.get("username"),
                name: r.get("name"),
                location: r.get("location"),
                active: r.get("active"),
            })
            .collect())
    }

    /// Get a user with all their posts, each fully assembled.
    ///
    /// Returns `Ok(None)` when no such user exists.
    pub async fn get(&self, id: i64) -> Result<Option<UserWithPosts>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, name, location, active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        let posts = PostRepo::new(self.pool).list_by_author(id).await?;

        Ok(Some(UserWithPosts {
            id: row.get("id"),
            username: row.get("username"),
            name: row.get("name"),
            location: row.get("location"),
            active: row.get("active"),
            posts,
        }))
    }
}
