//! # Guestbook Infrastructure
//!
//! Concrete implementations behind the domain types in `guestbook-core`:
//! SeaORM entities and repositories, the JWT claims codec, the S3 media
//! store and the request rate limiter.

pub mod auth;
pub mod database;
pub mod rate_limit;
pub mod storage;

pub use auth::{IssuedToken, JwtCodec, SecretStore};
pub use database::{DatabaseConfig, connect};
pub use rate_limit::{RateLimitConfig, RequestRateLimiter};
pub use storage::{MediaStorage, StorageConfig, StorageError};
