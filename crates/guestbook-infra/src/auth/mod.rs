//! Signed session tokens.

mod jwt;

pub use jwt::{IssuedToken, JwtCodec, SecretStore};
