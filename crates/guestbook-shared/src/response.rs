//! Response envelope and error-code taxonomy.
//!
//! Success: `{ "meta": { "traceId", "success": true }, "data": ... }`.
//! Failure: `{ "meta": { "traceId" }, "error": { "code", "message" } }`.

use serde::{Deserialize, Serialize};

/// Metadata attached to every successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "traceId")]
    pub trace_id: String,
    pub success: bool,
}

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: Meta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(trace_id: impl Into<String>, data: T) -> Self {
        Self {
            meta: Meta {
                trace_id: trace_id.into(),
                success: true,
            },
            data,
        }
    }
}

/// Stable error codes exposed to clients.
///
/// The HTTP status is derived from the code; anything unrecognized maps
/// to 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    NotAuthenticated,
    UnAuthorized,
    AccountNotFound,
    MissingRequiredFields,
    BadRequest,
    MissingAuthorizationHeader,
    InvalidAuthorizationFormat,
    TokenInvalid,
    PermissionDenied,
    TooManyRequests,
    UnknownError,
    InternalServerError,
}

impl ErrorCode {
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::NotFound | ErrorCode::AccountNotFound => 404,
            ErrorCode::ValidationError
            | ErrorCode::MissingRequiredFields
            | ErrorCode::BadRequest
            | ErrorCode::MissingAuthorizationHeader
            | ErrorCode::InvalidAuthorizationFormat
            | ErrorCode::TokenInvalid => 400,
            ErrorCode::NotAuthenticated => 401,
            ErrorCode::UnAuthorized | ErrorCode::PermissionDenied => 403,
            ErrorCode::TooManyRequests => 429,
            ErrorCode::UnknownError | ErrorCode::InternalServerError => 500,
        }
    }
}

/// Error payload inside the failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMeta {
    #[serde(rename = "traceId")]
    pub trace_id: String,
}

/// Standard failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub meta: ErrorMeta,
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    pub fn new(trace_id: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            meta: ErrorMeta {
                trace_id: trace_id.into(),
            },
            error: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let envelope = Envelope::ok("trace-1", serde_json::json!({"n": 1}));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["meta"]["traceId"], "trace-1");
        assert_eq!(json["meta"]["success"], true);
        assert_eq!(json["data"]["n"], 1);
    }

    #[test]
    fn error_codes_serialize_as_their_names() {
        let envelope = ErrorEnvelope::new("trace-2", ErrorCode::UnAuthorized, "no access");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["error"]["code"], "UnAuthorized");
        assert_eq!(json["error"]["message"], "no access");
        assert_eq!(json["meta"]["traceId"], "trace-2");
    }

    #[test]
    fn status_mapping_follows_the_taxonomy() {
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::ValidationError.http_status(), 400);
        assert_eq!(ErrorCode::NotAuthenticated.http_status(), 401);
        assert_eq!(ErrorCode::PermissionDenied.http_status(), 403);
        assert_eq!(ErrorCode::MissingAuthorizationHeader.http_status(), 400);
        assert_eq!(ErrorCode::UnknownError.http_status(), 500);
    }
}
