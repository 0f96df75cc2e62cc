//! 이중 모드 인증 미들웨어
//!
//! 보호된 스코프 앞에서 [`AuthGate`]로 요청 사용자를 확정합니다.
//! 확정되면 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를
//! request extension에 저장하고, 아니면 거부 응답을 바로 돌려줍니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::AuthGate;

/// 인증 미들웨어
#[derive(Clone)]
pub struct AuthMiddleware {
    gate: Arc<AuthGate>,
}

impl AuthMiddleware {
    pub fn new(gate: Arc<AuthGate>) -> Self {
        Self { gate }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}
