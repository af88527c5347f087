//! # 태그 리포지토리 구현
//!
//! 태그 이름은 `(user_id, name)` 유니크 제약으로 소유자 안에서만 유일합니다.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{core::errors::AppError, domain::entities::recipes::Tag, repositories::map_sqlx_error};

const DUPLICATE_TAG: &str = "이미 같은 이름의 태그가 있습니다";

/// 태그 데이터 액세스 포트
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// 소유자의 같은 이름 태그를 반환하고, 없으면 새로 만듭니다.
    async fn get_or_create(&self, user_id: i64, name: &str) -> Result<Tag, AppError>;

    /// 소유자의 태그 목록 (이름 내림차순)
    ///
    /// `assigned_only`이면 레시피에 하나 이상 연결된 태그만 반환합니다.
    async fn list_for_user(&self, user_id: i64, assigned_only: bool) -> Result<Vec<Tag>, AppError>;

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Tag>, AppError>;

    /// 이름을 변경합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 같은 소유자에게 같은 이름의 태그가 이미 있는 경우
    async fn update(&self, tag: &Tag) -> Result<Tag, AppError>;

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError>;
}

/// PostgreSQL 기반 태그 리포지토리
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn get_or_create(&self, user_id: i64, name: &str) -> Result<Tag, AppError> {
        // DO UPDATE를 써야 기존 행도 RETURNING 된다
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2) \
             ON CONFLICT (user_id, name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, user_id, name",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn list_for_user(&self, user_id: i64, assigned_only: bool) -> Result<Vec<Tag>, AppError> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.user_id, t.name FROM tags t \
             WHERE t.user_id = $1 \
               AND ($2 = FALSE OR EXISTS ( \
                   SELECT 1 FROM recipe_tags rt WHERE rt.tag_id = t.id)) \
             ORDER BY t.name DESC",
        )
        .bind(user_id)
        .bind(assigned_only)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Tag>, AppError> {
        sqlx::query_as::<_, Tag>("SELECT id, user_id, name FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, tag: &Tag) -> Result<Tag, AppError> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $3 WHERE id = $1 AND user_id = $2 \
             RETURNING id, user_id, name",
        )
        .bind(tag.id)
        .bind(tag.user_id)
        .bind(&tag.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, DUPLICATE_TAG))?
        .ok_or_else(|| AppError::NotFound("태그를 찾을 수 없습니다".to_string()))
    }

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
