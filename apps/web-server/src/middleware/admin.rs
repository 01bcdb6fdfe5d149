//! Admin gate for the post management routes.
//!
//! Runs before the handler's extractors touch the request body, so anyone
//! but the administrator is sent to login whatever the body holds.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, FromRequest, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::LocalBoxFuture;

use quill_core::guard::require_admin;

use super::error::AppError;
use super::identity::CurrentUser;

/// Resource middleware that lets only the administrator through.
pub struct AdminOnly;

impl<S, B> Transform<S, ServiceRequest> for AdminOnly
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AdminOnlyService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminOnlyService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminOnlyService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminOnlyService<S>
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
            // Extracting from the head alone leaves the payload unread.
            let rejection = match CurrentUser::extract(req.request()).await {
                Ok(current) => require_admin(current.user()).err().map(AppError::from),
                Err(err) => Some(err),
            };

            if let Some(err) = rejection {
                tracing::debug!(path = %req.path(), error = %err, "Admin route refused");
                let res = err.error_response();
                return Ok(req.into_response(res).map_into_right_body());
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
