//! # Domain Entities
//!
//! 데이터베이스 테이블과 1:1로 대응하는 도메인 엔티티들입니다.
//!
//! - [`users`] - 이메일 기반 사용자
//! - [`recipes`] - 레시피와 태그

pub mod users;
pub mod recipes;
