//! # Tag HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/recipe/tags` | 목록 (`?assigned_only=1`) | 200 OK |
//! | `PATCH`/`PUT` | `/api/recipe/tags/{id}` | 이름 변경 | 200 OK |
//! | `DELETE` | `/api/recipe/tags/{id}` | 삭제 | 204 No Content |

use actix_web::{delete, get, patch, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::recipes::request::{TagListQuery, UpdateTagRequest};
use crate::services::recipes::TagService;

#[get("/tags")]
pub async fn list_tags(
    user: AuthenticatedUser,
    query: web::Query<TagListQuery>,
    service: web::Data<TagService>,
) -> Result<HttpResponse, AppError> {
    let tags = service.list_tags(user.user_id, query.assigned_only()).await?;

    Ok(HttpResponse::Ok().json(tags))
}

#[patch("/tags/{tag_id}")]
pub async fn update_tag(
    user: AuthenticatedUser,
    tag_id: web::Path<i64>,
    payload: web::Json<UpdateTagRequest>,
    service: web::Data<TagService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tag = service
        .update_tag(user.user_id, *tag_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(tag))
}

// 태그는 name 하나뿐이라 PUT과 PATCH의 본문이 같다
#[put("/tags/{tag_id}")]
pub async fn replace_tag(
    user: AuthenticatedUser,
    tag_id: web::Path<i64>,
    payload: web::Json<UpdateTagRequest>,
    service: web::Data<TagService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tag = service
        .update_tag(user.user_id, *tag_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(tag))
}

#[delete("/tags/{tag_id}")]
pub async fn delete_tag(
    user: AuthenticatedUser,
    tag_id: web::Path<i64>,
    service: web::Data<TagService>,
) -> Result<HttpResponse, AppError> {
    service.delete_tag(user.user_id, *tag_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
