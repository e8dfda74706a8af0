use std::sync::Arc;
use std::time::Instant;

use actix_web::body::BoxBody;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use colored::Colorize;
use futures::future::{LocalBoxFuture, Ready, ready};
use log::info;

pub struct LoggerMiddleware {}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Arc::new(service),
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();

        // opaque identity-provider id, if the caller sent one
        let user_id = req
            .headers()
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        let srv = Arc::clone(&self.service);
        let started = Instant::now();

        Box::pin(async move {
            let res = srv.call(req).await?;
            let status = res.status();
            let elapsed_ms = started.elapsed().as_millis();

            let status_str = if status.is_success() {
                status.as_u16().to_string().green()
            } else if status.is_client_error() {
                status.as_u16().to_string().yellow()
            } else {
                status.as_u16().to_string().red()
            };
            info!(
                "{} {} {} {}ms user={}",
                method, path, status_str, elapsed_ms, user_id
            );

            Ok(res.map_into_boxed_body())
        })
    }
}
