//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 토큰을 검증하고, 토큰 주체의 현재 계정 정보를
//! Request Extensions에 저장합니다.
//!
//! ```rust,ignore
//! web::scope("/recipes").wrap(AuthMiddleware::required())
//! web::scope("/admin").wrap(AuthMiddleware::required_with_role("admin"))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::auth::authentication_request::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 유효한 토큰과 활성 계정이 없으면 401
    pub fn required() -> Self {
        Self { required_role: None }
    }

    /// 유효한 토큰과 활성 계정이 없으면 401, 역할이 없으면 403
    pub fn required_with_role(role: &str) -> Self {
        Self {
            required_role: Some(RequiredRole(role.to_string())),
        }
    }
}

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
            required_role: self.required_role.clone(),
        }))
    }
}
