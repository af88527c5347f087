//! 사용자 관리 서비스 모듈
//!
//! 사용자 등록, 인증, 프로필 관리, 관리자 사용자 관리를 담당합니다.

pub mod user_service;

pub use user_service::UserService;
