//! Rate limiting middleware.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};

use guestbook_infra::RequestRateLimiter;
use guestbook_shared::{ErrorCode, ErrorEnvelope};

use crate::observability::trace::TraceId;

/// Rate limiting middleware factory.
pub struct RateLimitMiddleware {
    limiter: RequestRateLimiter,
}

impl RateLimitMiddleware {
    pub fn new(limiter: RequestRateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: RequestRateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.limiter.check() {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(wait) => {
                tracing::warn!(wait_secs = wait.as_secs(), "rate limit exceeded");

                let trace_id = TraceId::of(req.request());

                let envelope = ErrorEnvelope::new(
                    trace_id.as_str(),
                    ErrorCode::TooManyRequests,
                    format!(
                        "Rate limit exceeded. Try again in {} seconds.",
                        wait.as_secs().max(1)
                    ),
                );
                let response = HttpResponse::TooManyRequests()
                    .insert_header(("Retry-After", wait.as_secs().max(1).to_string()))
                    .json(envelope);

                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);
                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}
