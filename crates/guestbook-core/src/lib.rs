//! # Guestbook Core
//!
//! The domain layer of the guestbook service.
//! This crate contains pure domain types with zero infrastructure dependencies.

pub mod auth;
pub mod domain;
pub mod error;
pub mod paging;
pub mod text;

pub use error::RepoError;
