//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 리포지토리 trait 객체(`Arc<dyn ...>`)를 주입받아 생성되며,
//! [`ServiceRegistry`](crate::core::registry::ServiceRegistry)가 애플리케이션 기동 시 한 번 조립합니다.
//!
//! - [`users`] - 사용자 등록, 인증, 프로필, 관리자 사용자 관리
//! - [`auth`] - JWT 토큰 발급/검증
//! - [`recipes`] - 레시피와 태그

pub mod users;
pub mod auth;
pub mod recipes;
