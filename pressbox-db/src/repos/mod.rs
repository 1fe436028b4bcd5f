//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Handles anticipated conflicts via ON CONFLICT (no check-then-insert)
//! - Uses transactions for multi-step mutations
//! - Assembles listings with a bounded concurrent fan-out

pub mod posts;
pub mod tags;
pub mod users;

pub use posts::PostRepo;
pub use tags::TagRepo;
pub use users::UserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
