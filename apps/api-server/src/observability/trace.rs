//! Trace id propagation.
//!
//! Every request carries one trace id end to end: taken from the
//! client's `X-Request-ID` header when present, minted otherwise. The id
//! tags the request span, comes back as a response header and is the
//! `traceId` field of every envelope, success or failure.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-request-id";

/// The trace id of the current request.
#[derive(Debug, Clone)]
pub struct TraceId(String);

impl TraceId {
    fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Trace id recorded for `req`. Falls back to a fresh id on paths
    /// the middleware never saw.
    pub fn of(req: &HttpRequest) -> Self {
        req.extensions()
            .get::<TraceId>()
            .cloned()
            .unwrap_or_else(TraceId::fresh)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl actix_web::FromRequest for TraceId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(TraceId::of(req)))
    }
}

/// Middleware that records the trace id before anything else looks at
/// the request.
pub struct TraceIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TraceIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = TraceIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceIdService { service }))
    }
}

pub struct TraceIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| TraceId(v.to_owned()))
            .unwrap_or_else(TraceId::fresh);
        req.extensions_mut().insert(trace_id.clone());

        let span = tracing::info_span!("http_request", trace_id = %trace_id.as_str());
        let fut = {
            let _guard = span.enter();
            self.service.call(req)
        };

        Box::pin(async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(trace_id.as_str()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};

    use super::*;

    #[actix_web::test]
    async fn client_supplied_id_flows_through_extractor_and_header() {
        let app = test::init_service(App::new().wrap(TraceIdMiddleware).route(
            "/echo",
            web::get().to(|trace: TraceId| async move {
                HttpResponse::Ok().body(trace.as_str().to_owned())
            }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/echo")
            .insert_header((TRACE_ID_HEADER, "trace-abc"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.headers().get(TRACE_ID_HEADER).unwrap(), "trace-abc");
        assert_eq!(test::read_body(res).await, "trace-abc");
    }

    #[actix_web::test]
    async fn an_id_is_minted_when_the_client_sends_none() {
        let app = test::init_service(
            App::new()
                .wrap(TraceIdMiddleware)
                .route("/echo", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get().uri("/echo").to_request();
        let res = test::call_service(&app, req).await;

        let header = res.headers().get(TRACE_ID_HEADER).unwrap();
        assert!(!header.is_empty());
    }

    #[actix_web::test]
    async fn extractor_falls_back_outside_the_middleware() {
        let req = test::TestRequest::default().to_http_request();
        let trace = TraceId::of(&req);
        assert!(!trace.as_str().is_empty());
    }
}
