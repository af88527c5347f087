//! # Admin HTTP Handlers
//!
//! 스태프(`admin` 역할) 전용 사용자 관리 API입니다. 역할 검사는 라우트의
//! `AuthMiddleware::required_with_role("admin")`이 담당합니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::users::request::{AdminCreateUserRequest, AdminUpdateUserRequest};
use crate::services::users::UserService;

#[get("")]
pub async fn list_users(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    let users = service.list_users().await?;

    Ok(HttpResponse::Ok().json(users))
}

#[post("")]
pub async fn create_user(
    admin: AuthenticatedUser,
    payload: web::Json<AdminCreateUserRequest>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = service.admin_create_user(payload.into_inner()).await?;
    log::info!("관리자 {} → 사용자 생성 ID {}", admin.email, user.id);

    Ok(HttpResponse::Created().json(user))
}

#[get("/{user_id}")]
pub async fn get_user(
    user_id: web::Path<i64>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let user = service.get_user(*user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[patch("/{user_id}")]
pub async fn update_user(
    admin: AuthenticatedUser,
    user_id: web::Path<i64>,
    payload: web::Json<AdminUpdateUserRequest>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = service
        .admin_update_user(*user_id, payload.into_inner())
        .await?;
    log::info!("관리자 {} → 사용자 수정 ID {}", admin.email, user.id);

    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    admin: AuthenticatedUser,
    user_id: web::Path<i64>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    service.delete_user(*user_id).await?;
    log::info!("관리자 {} → 사용자 삭제 ID {}", admin.email, user_id);

    Ok(HttpResponse::NoContent().finish())
}
