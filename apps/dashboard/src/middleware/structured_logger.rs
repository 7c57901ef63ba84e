use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use super::request_trace::TraceId;
use crate::extractors::AuthId;

/// Severity of the `request_completed` event for a response status.
pub fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Emits one `request_completed` event per request.
///
/// The `auth_id` field carries the caller once the bearer token verified, or
/// `-` for anonymous and rejected requests.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, auth_id) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request().extensions().get::<AuthId>().map(|a| a.0.clone()),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };
            let auth_id = auth_id.as_deref().unwrap_or("-");
            let duration_us = start.elapsed().as_micros() as u64;

            macro_rules! completed {
                ($level:expr) => {
                    tracing::event!(
                        $level,
                        http.method = %method,
                        url.path = %path,
                        http.status_code = status.as_u16(),
                        duration_us,
                        trace_id = %trace_id,
                        auth_id,
                        "request_completed"
                    )
                };
            }

            let level = completion_level(status);
            if level == Level::ERROR {
                completed!(Level::ERROR);
            } else if level == Level::WARN {
                completed!(Level::WARN);
            } else {
                completed!(Level::INFO);
            }

            result
        })
    }
}
