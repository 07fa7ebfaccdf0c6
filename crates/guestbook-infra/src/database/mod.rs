//! Database connection management, entities and repositories.

mod connect;
pub mod entity;
pub mod query;
pub mod repo;

pub use connect::{DatabaseConfig, connect};
pub use repo::{TodoRepository, WeddingRepository};
