//! Session claim types shared by the token codec and the auth gates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Caller class a token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            _ => Err(()),
        }
    }
}

/// Token kind fixed at issuance.
///
/// Only `Access` tokens are accepted on protected routes; `Refresh`
/// tokens exist solely for the renewal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }

    /// Validity window counted from issuance.
    pub fn lifetime(&self) -> TimeDelta {
        match self {
            TokenKind::Access => TimeDelta::hours(2),
            TokenKind::Refresh => TimeDelta::hours(10),
        }
    }
}

impl FromStr for TokenKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access_token" => Ok(TokenKind::Access),
            "refresh_token" => Ok(TokenKind::Refresh),
            _ => Err(()),
        }
    }
}

/// Decoded payload of a verified session token.
#[derive(Debug, Clone)]
pub struct Claims {
    pub subject: Uuid,
    pub role: Role,
    pub kind: TokenKind,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Failures of the claims codec and the auth gate.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("authorization header is not a bearer token")]
    InvalidFormat,

    #[error("token role does not match this endpoint")]
    InvalidRole,

    #[error("only access tokens are accepted on protected routes")]
    UnsupportedTokenKind,

    #[error("token expired")]
    TokenExpired,

    #[error("token signature rejected")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_wire_values() {
        assert_eq!("admin".parse(), Ok(Role::Admin));
        assert_eq!("manager".parse(), Ok(Role::Manager));
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn token_kind_parses_wire_values() {
        assert_eq!("access_token".parse(), Ok(TokenKind::Access));
        assert_eq!("refresh_token".parse(), Ok(TokenKind::Refresh));
        assert!(TokenKind::from_str("id_token").is_err());
    }

    #[test]
    fn lifetimes_are_fixed_per_kind() {
        assert_eq!(TokenKind::Access.lifetime(), TimeDelta::hours(2));
        assert_eq!(TokenKind::Refresh.lifetime(), TimeDelta::hours(10));
    }
}
