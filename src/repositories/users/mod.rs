//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`](user_repo::UserRepository) trait과 PostgreSQL 구현체를 제공합니다.

pub mod user_repo;

pub use user_repo::{PgUserRepository, UserRepository};
