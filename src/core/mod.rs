//! # Core Module
//!
//! 애플리케이션 전역에서 쓰이는 기반 기능입니다.
//!
//! - [`errors`] - `AppError`와 HTTP 응답 매핑
//! - [`registry`] - 리포지토리/서비스 조립과 `web::Data` 등록

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::ServiceRegistry;
