use std::{rc::Rc, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::error::AppError;
use futures::future::{LocalBoxFuture, Ready, ok};

/// Header-authenticated admin gate: the `X-Admin-Id` header must match one
/// of the identifiers on the configured allow-list. The matched id is added
/// to the request extensions for audit logging.
pub struct AdminGuard {
    allowed_ids: Rc<Vec<String>>,
}

impl AdminGuard {
    pub fn new(allowed_ids: Vec<String>) -> Self {
        AdminGuard {
            allowed_ids: Rc::new(allowed_ids),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AdminGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminGuardService {
            service: Arc::new(service),
            allowed_ids: self.allowed_ids.clone(),
        })
    }
}

pub struct AdminGuardService<S> {
    service: Arc<S>,
    allowed_ids: Rc<Vec<String>>,
}

/// Identifier of the administrator driving the current request.
#[derive(Debug, Clone)]
pub struct AdminId(pub String);

impl<S, B> Service<ServiceRequest> for AdminGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let admin_id = req
            .headers()
            .get("X-Admin-Id")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let srv = Arc::clone(&self.service);
        let allowed = self.allowed_ids.clone();

        Box::pin(async move {
            let Some(admin_id) = admin_id else {
                return Ok(req
                    .error_response(AppError::Unauthorized(
                        "missing X-Admin-Id header".to_string(),
                    ))
                    .map_into_boxed_body());
            };

            if !allowed.iter().any(|id| id == &admin_id) {
                log::warn!("admin API refused for unknown id '{}'", admin_id);
                return Ok(req
                    .error_response(AppError::Forbidden(
                        "identifier is not on the admin allow-list".to_string(),
                    ))
                    .map_into_boxed_body());
            }

            req.extensions_mut().insert(AdminId(admin_id));
            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}
