//! # Domain Layer Module
//!
//! - [`entities`] - 데이터베이스에 저장되는 엔티티
//! - [`dto`] - HTTP 요청/응답 구조체
//! - [`models`] - 인증 컨텍스트와 토큰 클레임

pub mod entities;
pub mod dto;
pub mod models;

pub use models::{auth, token};
