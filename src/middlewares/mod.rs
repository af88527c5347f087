//! 미들웨어 모듈
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <token>` 또는 `Token <token>` 헤더의 JWT 검증
//! - 사용자 정보를 request extension에 저장
//! - 필수/선택 인증 모드와 역할 요구 지원
//!
//! ```rust,ignore
//! App::new()
//!     .service(
//!         web::scope("/api/recipe")
//!             .wrap(AuthMiddleware::required())
//!             .service(list_recipes)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
