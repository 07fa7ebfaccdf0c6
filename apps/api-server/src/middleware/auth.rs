//! Authentication gates as extractors.
//!
//! Handlers state their required caller class in the signature:
//! `AdminIdentity` for back-office endpoints, `ManagerIdentity` for the
//! todo workspace. The token is verified against the secret selected by
//! the role the endpoint demands.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header, web};
use uuid::Uuid;

use guestbook_core::auth::{AuthError, Role};
use guestbook_shared::{ErrorCode, ErrorEnvelope};

use crate::observability::trace::TraceId;
use crate::state::AppState;

/// Verified caller identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

/// Requires a valid admin access token.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

/// Requires a valid manager access token.
#[derive(Debug, Clone)]
pub struct ManagerIdentity(pub Identity);

/// Authentication failure rendered through the error envelope, carrying
/// the trace id of the request it aborted.
#[derive(Debug)]
pub struct GateError {
    error: AuthError,
    trace_id: TraceId,
}

impl GateError {
    fn new(error: AuthError, trace_id: TraceId) -> Self {
        Self { error, trace_id }
    }

    fn code(&self) -> ErrorCode {
        match self.error {
            AuthError::MissingHeader => ErrorCode::MissingAuthorizationHeader,
            AuthError::InvalidFormat => ErrorCode::InvalidAuthorizationFormat,
            AuthError::InvalidRole => ErrorCode::PermissionDenied,
            _ => ErrorCode::TokenInvalid,
        }
    }
}

impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl actix_web::ResponseError for GateError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(self.code().http_status())
            .unwrap_or(actix_web::http::StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope::new(
            self.trace_id.as_str(),
            self.code(),
            self.error.to_string(),
        ))
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidFormat)
}

fn authenticate(req: &HttpRequest, role: Role) -> Result<Identity, GateError> {
    let trace_id = TraceId::of(req);
    let fail = |error: AuthError| GateError::new(error, trace_id.clone());

    let token = bearer_token(req).map_err(fail)?;

    let state = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state,
        None => {
            tracing::error!("application state not registered");
            return Err(fail(AuthError::Malformed(
                "server configuration error".to_string(),
            )));
        }
    };

    let claims = state.codec.decode(token, role).map_err(fail)?;

    Ok(Identity {
        id: claims.subject,
        role: claims.role,
    })
}

impl FromRequest for AdminIdentity {
    type Error = GateError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req, Role::Admin).map(AdminIdentity))
    }
}

impl FromRequest for ManagerIdentity {
    type Error = GateError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req, Role::Manager).map(ManagerIdentity))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn absent_header_is_reported_as_missing() {
        let req = TestRequest::default().to_http_request();
        let err = bearer_token(&req).unwrap_err();
        assert!(matches!(err, AuthError::MissingHeader));
    }

    #[test]
    fn non_bearer_scheme_is_a_format_error() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        let err = bearer_token(&req).unwrap_err();
        assert!(matches!(err, AuthError::InvalidFormat));
    }

    #[test]
    fn empty_bearer_token_is_a_format_error() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();
        let err = bearer_token(&req).unwrap_err();
        assert!(matches!(err, AuthError::InvalidFormat));
    }

    #[test]
    fn bearer_token_is_extracted_verbatim() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn gate_error_codes_follow_the_taxonomy() {
        let trace = || TraceId::of(&TestRequest::default().to_http_request());
        assert_eq!(
            GateError::new(AuthError::MissingHeader, trace()).code(),
            ErrorCode::MissingAuthorizationHeader
        );
        assert_eq!(
            GateError::new(AuthError::InvalidRole, trace()).code(),
            ErrorCode::PermissionDenied
        );
        assert_eq!(
            GateError::new(AuthError::TokenExpired, trace()).code(),
            ErrorCode::TokenInvalid
        );
    }

    #[actix_web::test]
    async fn gate_failures_echo_the_request_trace_id() {
        use actix_web::{App, HttpResponse, test};

        use crate::observability::trace::{TRACE_ID_HEADER, TraceIdMiddleware};

        let app = test::init_service(App::new().wrap(TraceIdMiddleware).route(
            "/guarded",
            actix_web::web::post().to(|_: ManagerIdentity| async { HttpResponse::Ok().finish() }),
        ))
        .await;

        let req = test::TestRequest::post()
            .uri("/guarded")
            .insert_header((TRACE_ID_HEADER, "trace-42"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["meta"]["traceId"], "trace-42");
        assert_eq!(body["error"]["code"], "MissingAuthorizationHeader");
    }
}
