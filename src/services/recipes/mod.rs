//! 레시피/태그 서비스 모듈
//!
//! 모든 연산은 인증된 사용자 ID를 받아 해당 사용자 소유의 데이터만 다룹니다.

pub mod recipe_service;
pub mod tag_service;

pub use recipe_service::RecipeService;
pub use tag_service::TagService;
