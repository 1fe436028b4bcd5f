//! pressbox-core: domain layer for the pressbox blogging backend
//!
//! Pure types shared by the data-access layer: entities, input and
//! partial-update requests, field validation, and configuration. No I/O
//! happens in this crate.

pub mod config;
pub mod models;

pub use config::DbConfig;
pub use models::{
    Author, NewPost, NewUser, Post, PostDetail, PostUpdate, Tag, TagName, User, UserSummary,
    UserUpdate, UserWithPosts, Username, ValidationError,
};
