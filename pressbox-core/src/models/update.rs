//! Typed partial-update requests
//!
//! Each recognized column is an explicit Option; unset fields are left
//! untouched by the update. There is no free-form field map, so no SQL
//! fragment is ever built from caller-supplied keys.

use super::tag::TagName;
use super::user::Username;

/// Partial update for a user row
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<Username>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub active: Option<bool>,
}

impl UserUpdate {
    /// True when no field is set; such an update issues no SQL at all.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.name.is_none()
            && self.location.is_none()
            && self.active.is_none()
    }
}

/// Partial update for a post.
///
/// `tags` is carried separately from the column updates: when set, the
/// post's tag links are reconciled to exactly that list.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagName>>,
}

impl PostUpdate {
    /// True when at least one post column (not tags) is set.
    pub fn has_column_changes(&self) -> bool {
        self.title.is_some() || self.content.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_column_changes() && self.tags.is_none()
    }
}
