//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 요청/응답 본문을 표현하는 구조체들입니다.
//! 엔티티를 그대로 노출하지 않고, 요청은 `validator`로 검증한 뒤 서비스 계층에 전달합니다.

pub mod users;
pub mod recipes;

pub use users::*;
pub use recipes::*;
