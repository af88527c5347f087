//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::auth::authentication_request::RequiredRole;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let user = match authenticate_request(&req).await {
                Ok(user) => user,
                Err(err @ AppError::AuthenticationError(_)) => {
                    log::warn!("인증 실패: {}", err);
                    return Ok(reject(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "authentication_required",
                        "message": "유효한 인증 토큰이 필요합니다"
                    }))));
                }
                Err(err) => return Ok(reject(req, err.error_response())),
            };

            if let Some(ref required) = required_role {
                if !required.is_satisfied(&user.roles) {
                    log::warn!(
                        "권한 부족: 사용자 ID {} ({:?}), 필요 권한: {:?}",
                        user.user_id,
                        user.roles,
                        required
                    );
                    return Ok(reject(req, HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "insufficient_permissions",
                        "message": "접근 권한이 부족합니다"
                    }))));
                }
            }

            log::debug!("인증 성공: 사용자 ID {}", user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// Authorization 헤더의 토큰을 검증하고, 토큰 주체의 현재 계정으로 요청 사용자를 만듭니다.
///
/// 삭제되었거나 비활성화된 계정의 토큰은 거부되며, 역할은 저장된 `is_staff` 값에서 다시 계산됩니다.
/// `TokenService`와 `UserService`는 애플리케이션 데이터(`web::Data`)에서 가져옵니다.
async fn authenticate_request(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("TokenService가 등록되지 않았습니다".to_string()))?;
    let user_service = req
        .app_data::<web::Data<UserService>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("UserService가 등록되지 않았습니다".to_string()))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let user_id = token_service.subject(token)?;
    let user = user_service.current_user(user_id).await?;

    Ok(AuthenticatedUser::from(&user))
}
