//! HTTP 요청 핸들러 모듈
//!
//! 핸들러는 요청 본문 검증 후 서비스 계층을 호출하고, 에러는 `AppError`로 반환합니다.

pub mod users;
pub mod recipes;
pub mod tags;
pub mod admin;
