//! # Routes Module
//!
//! URL 스코프와 미들웨어를 핸들러에 연결합니다.
//!
//! | 스코프 | 인증 |
//! |--------|------|
//! | `/api/user/me` | 필수 |
//! | `/api/user` | 공개 (`create`, `token`) |
//! | `/api/recipe` | 필수 |
//! | `/api/admin/users` | 필수 + `admin` 역할 |
//! | `/health` | 공개 |

use actix_web::{error, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_recipe_routes(cfg);
    configure_admin_routes(cfg);
}

/// 본문/쿼리 파싱 실패도 `{"error": ...}` 형식의 400 응답으로 통일합니다.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // `/api/user` 스코프보다 먼저 등록해야 한다
    cfg.service(
        web::scope("/api/user/me")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::replace_me),
    );

    cfg.service(
        web::scope("/api/user")
            .service(handlers::users::create_user)
            .service(handlers::users::create_token),
    );
}

fn configure_recipe_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/recipe")
            .wrap(AuthMiddleware::required())
            .service(handlers::recipes::list_recipes)
            .service(handlers::recipes::create_recipe)
            .service(handlers::recipes::get_recipe)
            .service(handlers::recipes::update_recipe)
            .service(handlers::recipes::replace_recipe)
            .service(handlers::recipes::delete_recipe)
            .service(handlers::tags::list_tags)
            .service(handlers::tags::update_tag)
            .service(handlers::tags::replace_tag)
            .service(handlers::tags::delete_tag),
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin/users")
            .wrap(AuthMiddleware::required_with_role("admin"))
            .service(handlers::admin::list_users)
            .service(handlers::admin::create_user)
            .service(handlers::admin::get_user)
            .service(handlers::admin::update_user)
            .service(handlers::admin::delete_user),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "recipe_app_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "PostgreSQL",
            "authentication": "JWT"
        }
    }))
}
