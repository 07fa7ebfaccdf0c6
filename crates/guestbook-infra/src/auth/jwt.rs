//! JWT claims codec with per-(role, kind) signing secrets.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guestbook_core::auth::{AuthError, Claims, Role, TokenKind};

/// Lookup table from `(role, kind)` to the signing secret, injected at
/// construction. Every combination maps to a distinct configured secret.
#[derive(Clone)]
pub struct SecretStore {
    secrets: HashMap<(Role, TokenKind), String>,
}

impl SecretStore {
    pub fn new(
        admin_access: impl Into<String>,
        admin_refresh: impl Into<String>,
        manager_access: impl Into<String>,
        manager_refresh: impl Into<String>,
    ) -> Self {
        let mut secrets = HashMap::new();
        secrets.insert((Role::Admin, TokenKind::Access), admin_access.into());
        secrets.insert((Role::Admin, TokenKind::Refresh), admin_refresh.into());
        secrets.insert((Role::Manager, TokenKind::Access), manager_access.into());
        secrets.insert((Role::Manager, TokenKind::Refresh), manager_refresh.into());
        Self { secrets }
    }

    fn get(&self, role: Role, kind: TokenKind) -> &str {
        // Both keys are closed enums, so every combination is present.
        self.secrets
            .get(&(role, kind))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Claims as they travel on the wire. Role and kind are plain strings
/// here and parsed into the closed enums during decoding.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    id: Uuid,
    role: String,
    token_type: String,
    iat: i64,
    exp: i64,
}

/// A freshly signed token plus its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
}

/// Encodes and decodes role-scoped session tokens (HS256).
pub struct JwtCodec {
    secrets: SecretStore,
}

impl JwtCodec {
    pub fn new(secrets: SecretStore) -> Self {
        Self { secrets }
    }

    /// Signs a token for `subject` with the secret selected by
    /// `(role, kind)` and the fixed expiry offset of the kind.
    pub fn issue(&self, subject: Uuid, role: Role, kind: TokenKind) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + kind.lifetime();

        let claims = WireClaims {
            id: subject,
            role: role.as_str().to_owned(),
            token_type: kind.as_str().to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let secret = self.secrets.get(role, kind);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::Malformed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            kind,
            expires_at,
        })
    }

    /// Verifies a token for the given endpoint class.
    ///
    /// The first parse skips signature validation because the verification
    /// secret itself depends on the claimed role and kind. Those unverified
    /// claims select the secret and nothing else; the second parse
    /// re-checks the signature against that secret, so a forged claim
    /// simply fails verification.
    pub fn decode(&self, token: &str, expected_role: Role) -> Result<Claims, AuthError> {
        let mut unsigned = Validation::new(Algorithm::HS256);
        unsigned.insecure_disable_signature_validation();
        unsigned.validate_exp = false;
        unsigned.required_spec_claims.clear();

        let unverified = decode::<WireClaims>(token, &DecodingKey::from_secret(&[]), &unsigned)
            .map_err(|e| AuthError::Malformed(e.to_string()))?;

        let role: Role = unverified
            .claims
            .role
            .parse()
            .map_err(|_| AuthError::InvalidRole)?;
        if role != expected_role {
            return Err(AuthError::InvalidRole);
        }

        let kind: TokenKind = unverified
            .claims
            .token_type
            .parse()
            .map_err(|_| AuthError::UnsupportedTokenKind)?;
        if kind != TokenKind::Access {
            return Err(AuthError::UnsupportedTokenKind);
        }

        let secret = self.secrets.get(role, kind);
        let validation = Validation::new(Algorithm::HS256);
        let verified = decode::<WireClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed(e.to_string()),
        })?;

        let claims = verified.claims;
        Ok(Claims {
            subject: claims.id,
            role,
            kind,
            issued_at: DateTime::<Utc>::from_timestamp(claims.iat, 0)
                .ok_or_else(|| AuthError::Malformed("iat out of range".into()))?,
            expires_at: DateTime::<Utc>::from_timestamp(claims.exp, 0)
                .ok_or_else(|| AuthError::Malformed("exp out of range".into()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> JwtCodec {
        JwtCodec::new(SecretStore::new(
            "admin-access-secret",
            "admin-refresh-secret",
            "manager-access-secret",
            "manager-refresh-secret",
        ))
    }

    #[test]
    fn round_trip_restores_subject_role_and_kind() {
        let codec = test_codec();
        let subject = Uuid::new_v4();

        let issued = codec
            .issue(subject, Role::Manager, TokenKind::Access)
            .unwrap();
        let claims = codec.decode(&issued.token, Role::Manager).unwrap();

        assert_eq!(claims.subject, subject);
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.expires_at.timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn manager_token_is_rejected_by_the_admin_decoder() {
        let codec = test_codec();
        let issued = codec
            .issue(Uuid::new_v4(), Role::Manager, TokenKind::Access)
            .unwrap();

        let err = codec.decode(&issued.token, Role::Admin).unwrap_err();
        assert!(matches!(err, AuthError::InvalidRole));
    }

    #[test]
    fn refresh_tokens_never_pass_a_protected_decode() {
        let codec = test_codec();
        let issued = codec
            .issue(Uuid::new_v4(), Role::Admin, TokenKind::Refresh)
            .unwrap();

        let err = codec.decode(&issued.token, Role::Admin).unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedTokenKind));
    }

    #[test]
    fn wrong_secret_fails_with_a_signature_error() {
        let codec = test_codec();
        let other = JwtCodec::new(SecretStore::new(
            "admin-access-secret",
            "admin-refresh-secret",
            "a-different-manager-secret",
            "manager-refresh-secret",
        ));

        let issued = other
            .issue(Uuid::new_v4(), Role::Manager, TokenKind::Access)
            .unwrap();
        let err = codec.decode(&issued.token, Role::Manager).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn expired_tokens_fail_regardless_of_valid_signature() {
        let codec = test_codec();
        let now = Utc::now();

        // Hand-rolled token: correctly signed, but expired an hour ago.
        let claims = WireClaims {
            id: Uuid::new_v4(),
            role: "manager".to_owned(),
            token_type: "access_token".to_owned(),
            iat: (now - chrono::TimeDelta::hours(3)).timestamp(),
            exp: (now - chrono::TimeDelta::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"manager-access-secret"),
        )
        .unwrap();

        let err = codec.decode(&token, Role::Manager).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn unknown_role_claim_is_rejected_before_verification() {
        let codec = test_codec();
        let now = Utc::now();

        let claims = WireClaims {
            id: Uuid::new_v4(),
            role: "superuser".to_owned(),
            token_type: "access_token".to_owned(),
            iat: now.timestamp(),
            exp: (now + chrono::TimeDelta::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"whatever"),
        )
        .unwrap();

        let err = codec.decode(&token, Role::Admin).unwrap_err();
        assert!(matches!(err, AuthError::InvalidRole));
    }

    #[test]
    fn garbage_input_is_malformed() {
        let codec = test_codec();
        let err = codec.decode("not-a-token", Role::Admin).unwrap_err();
        assert!(matches!(err, AuthError::Malformed(_)));
    }
}
