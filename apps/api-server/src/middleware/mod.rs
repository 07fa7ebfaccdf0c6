//! Request middleware: auth gates, error mapping and rate limiting.

pub mod auth;
pub mod error;
pub mod rate_limit;
