//! # Recipe HTTP Handlers
//!
//! 모든 엔드포인트는 인증이 필요하며, 요청 사용자 소유의 레시피만 다룹니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/recipe/recipes` | 목록 (`?tags=1,2`) | 200 OK |
//! | `POST` | `/api/recipe/recipes` | 생성 | 201 Created |
//! | `GET` | `/api/recipe/recipes/{id}` | 상세 | 200 OK |
//! | `PATCH` | `/api/recipe/recipes/{id}` | 부분 수정 | 200 OK |
//! | `PUT` | `/api/recipe/recipes/{id}` | 전체 수정 | 200 OK |
//! | `DELETE` | `/api/recipe/recipes/{id}` | 삭제 | 204 No Content |

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::recipes::request::{
    CreateRecipeRequest, RecipeListQuery, ReplaceRecipeRequest, UpdateRecipeRequest,
};
use crate::services::recipes::RecipeService;

#[get("/recipes")]
pub async fn list_recipes(
    user: AuthenticatedUser,
    query: web::Query<RecipeListQuery>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    let tag_ids = query.tag_ids()?;
    let recipes = service.list_recipes(user.user_id, &tag_ids).await?;

    Ok(HttpResponse::Ok().json(recipes))
}

#[post("/recipes")]
pub async fn create_recipe(
    user: AuthenticatedUser,
    payload: web::Json<CreateRecipeRequest>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let recipe = service.create_recipe(user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(recipe))
}

#[get("/recipes/{recipe_id}")]
pub async fn get_recipe(
    user: AuthenticatedUser,
    recipe_id: web::Path<i64>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    let recipe = service.get_recipe(user.user_id, *recipe_id).await?;

    Ok(HttpResponse::Ok().json(recipe))
}

#[patch("/recipes/{recipe_id}")]
pub async fn update_recipe(
    user: AuthenticatedUser,
    recipe_id: web::Path<i64>,
    payload: web::Json<UpdateRecipeRequest>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let recipe = service
        .update_recipe(user.user_id, *recipe_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(recipe))
}

#[put("/recipes/{recipe_id}")]
pub async fn replace_recipe(
    user: AuthenticatedUser,
    recipe_id: web::Path<i64>,
    payload: web::Json<ReplaceRecipeRequest>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let recipe = service
        .update_recipe(user.user_id, *recipe_id, payload.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(recipe))
}

#[delete("/recipes/{recipe_id}")]
pub async fn delete_recipe(
    user: AuthenticatedUser,
    recipe_id: web::Path<i64>,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, AppError> {
    service.delete_recipe(user.user_id, *recipe_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
