//! # 사용자 리포지토리 구현
//!
//! `users` 테이블에 대한 데이터 액세스를 담당합니다.
//! 이메일 유니크 제약 위반은 `ConflictError`로 변환되어 409 응답이 됩니다.
//! 사용자를 삭제하면 외래 키의 `ON DELETE CASCADE`로 레시피와 태그도 함께 삭제됩니다.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    core::errors::AppError,
    domain::entities::users::{NewUser, User},
    repositories::map_sqlx_error,
};

const DUPLICATE_EMAIL: &str = "이미 사용 중인 이메일입니다";

const USER_COLUMNS: &str = "id, email, name, password_hash, is_active, is_staff, is_superuser, last_login, created_at";

/// 사용자 데이터 액세스 포트
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 새 사용자를 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 중복
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// 정규화된 이메일과 정확히 일치하는 사용자를 찾습니다.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 전체 사용자 목록 (ID 오름차순)
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// 변경 가능한 컬럼을 모두 덮어씁니다.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// 삭제된 행이 있으면 `true`
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// 마지막 로그인 시각을 현재 시각으로 갱신합니다.
    async fn touch_last_login(&self, id: i64) -> Result<(), AppError>;
}

/// PostgreSQL 기반 사용자 리포지토리
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let query = format!(
            "INSERT INTO users (email, name, password_hash, is_staff, is_superuser) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );

        let created = sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.is_staff)
            .bind(user.is_superuser)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, DUPLICATE_EMAIL))?;

        log::info!("사용자 생성: {} (ID {})", created.email, created.id);
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");

        sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let query = format!(
            "UPDATE users SET email = $2, name = $3, password_hash = $4, \
             is_active = $5, is_staff = $6, is_superuser = $7 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.is_staff)
            .bind(user.is_superuser)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, DUPLICATE_EMAIL))?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch_last_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
