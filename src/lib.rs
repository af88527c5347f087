//! 레시피 앱 백엔드
//!
//! 이메일 기반 사용자 계정, 레시피와 태그 REST API, 스태프 전용 관리자 API,
//! 그리고 기동 시 데이터베이스 준비를 기다리는 관리 명령을 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 계정 생성, 토큰 발급, 내 정보 조회/수정
//! - **레시피/태그**: 소유자 범위로 제한된 CRUD, 태그 필터링
//! - **관리자 API**: 스태프 전용 사용자 관리
//! - **JWT 인증**: `Authorization: Bearer <token>` 기반 상태 없는 인증
//! - **PostgreSQL**: sqlx 연결 풀과 내장 마이그레이션
//!
//! # Architecture
//!
//! ```text
//! routes ──► middlewares (AuthMiddleware) ──► handlers
//!                                                │
//!                          ServiceRegistry ──► services ──► repositories ──► PostgreSQL
//!                                                              └──► InMemoryStore (tests)
//!
//! commands: wait-for-db ──► db::readiness::ReadinessGate
//!           migrate ──────► db::Database::migrate
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use recipe_app_backend::{core::ServiceRegistry, db::Database};
//!
//! let database = Database::new().await?;
//! let registry = ServiceRegistry::from_database(&database);
//!
//! let user = registry.users.register(request).await?;
//! let token = registry.tokens.generate_access_token(&user)?;
//! ```

pub mod commands;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
