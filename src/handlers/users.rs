//! # User Account HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/user/create` | 회원가입 | 201 Created |
//! | `POST` | `/api/user/token` | 토큰 발급 | 200 OK |
//! | `GET` | `/api/user/me` | 내 정보 조회 | 200 OK |
//! | `PATCH` | `/api/user/me` | 내 정보 부분 수정 | 200 OK |
//! | `PUT` | `/api/user/me` | 내 정보 전체 수정 | 200 OK |

use actix_web::{get, patch, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::users::request::{AuthTokenRequest, CreateUserRequest, ReplaceMeRequest, UpdateMeRequest};
use crate::services::auth::TokenService;
use crate::services::users::UserService;

#[post("/create")]
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 이메일/비밀번호로 액세스 토큰을 발급합니다.
#[post("/token")]
pub async fn create_token(
    payload: web::Json<AuthTokenRequest>,
    users: web::Data<UserService>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = users.authenticate(&payload.email, &payload.password).await?;
    let response = tokens.generate_access_token(&user)?;

    log::info!("토큰 발급: 사용자 ID {}", user.id);
    Ok(HttpResponse::Ok().json(response))
}

#[get("")]
pub async fn get_me(
    user: AuthenticatedUser,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let profile = service.get_profile(user.user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[patch("")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateMeRequest>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let profile = service.update_me(user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[put("")]
pub async fn replace_me(
    user: AuthenticatedUser,
    payload: web::Json<ReplaceMeRequest>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let profile = service
        .update_me(user.user_id, payload.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}
