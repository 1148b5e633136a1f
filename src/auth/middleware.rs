use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;

use crate::{auth::JwtService, errors::AppError, models::domain::Principal};

/// Rejects requests without a valid bearer token and stores the caller's
/// [`Principal`] in the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let principal = match authenticate(&req) {
                Ok(principal) => principal,
                Err(err) => {
                    log::debug!("Rejected {} {}: {}", req.method(), req.path(), err);
                    let response = req.error_response(err).map_into_right_body();
                    return Ok(response);
                }
            };

            req.extensions_mut().insert(principal);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Principal, AppError> {
    let jwt_service = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    let claims = jwt_service.validate_token(token)?;
    Ok(claims.principal())
}

/// Extractor for the authenticated caller in handlers.
pub struct AuthenticatedUser(pub Principal);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let principal = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(principal.map(AuthenticatedUser))
    }
}
