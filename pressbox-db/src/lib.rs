//! pressbox-db: PostgreSQL data-access layer for the pressbox blogging backend
//!
//! Stateless repositories over a shared connection pool. Each operation
//! either fully succeeds with an assembled result or returns an error;
//! multi-statement mutations run inside a transaction.

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::{DbError, PostRepo, TagRepo, UserRepo};
