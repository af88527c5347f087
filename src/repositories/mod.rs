//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 `async_trait` 기반 trait으로 정의되고, PostgreSQL 구현체(`Pg*`)와
//! 테스트/로컬 실행용 인메모리 구현체([`memory::InMemoryStore`])를 가집니다.
//! 서비스 계층은 `Arc<dyn ...Repository>`만 알고 있습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{PgUserRepository, UserRepository};
//!
//! let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod recipes;
pub mod memory;

use crate::core::errors::AppError;

/// sqlx 에러를 애플리케이션 에러로 변환합니다.
///
/// 유니크 제약 위반은 주어진 메시지의 `ConflictError`로, 나머지는
/// `From<sqlx::Error>` 변환을 그대로 따릅니다.
pub(crate) fn map_sqlx_error(err: sqlx::Error, conflict_message: &str) -> AppError {
    match AppError::from(err) {
        AppError::ConflictError(_) => AppError::ConflictError(conflict_message.to_string()),
        other => other,
    }
}
