//! # 레시피 리포지토리 구현
//!
//! `recipes` 테이블과 `recipe_tags` 조인 테이블을 다룹니다.
//! 모든 조회/수정/삭제는 소유자 ID를 조건에 포함하므로, 다른 사용자의 레시피는
//! 존재하지 않는 것처럼 보입니다.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{postgres::PgConnection, FromRow, PgPool};

use crate::{
    core::errors::AppError,
    domain::entities::recipes::{NewRecipe, Recipe, Tag},
};

const RECIPE_COLUMNS: &str =
    "id, user_id, title, time_minutes, price, description, link, created_at, updated_at";

/// 레시피 데이터 액세스 포트
///
/// 본문 저장과 태그 연결은 하나의 작업으로 처리되어, 실패하면 둘 다 반영되지 않습니다.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// 새 레시피를 저장하고 `tag_ids`를 연결합니다.
    async fn create(&self, recipe: NewRecipe, tag_ids: &[i64]) -> Result<Recipe, AppError>;

    /// 소유자의 레시피 목록 (ID 내림차순, 태그 포함)
    ///
    /// `tag_ids`가 비어 있지 않으면 그중 하나라도 연결된 레시피만 반환합니다.
    async fn list_for_user(&self, user_id: i64, tag_ids: &[i64]) -> Result<Vec<Recipe>, AppError>;

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Recipe>, AppError>;

    /// 본문 필드를 덮어쓰고 `updated_at`을 갱신합니다.
    ///
    /// `tag_ids`가 `Some`이면 연결된 태그 집합을 그 목록으로 교체합니다.
    async fn update(&self, recipe: &Recipe, tag_ids: Option<&[i64]>) -> Result<Recipe, AppError>;

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError>;
}

/// 조인 테이블 조회 결과 행
#[derive(Debug, FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    id: i64,
    user_id: i64,
    name: String,
}

/// PostgreSQL 기반 레시피 리포지토리
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 레시피들의 태그를 한 번의 쿼리로 로드하여 채웁니다.
    async fn attach_tags(&self, mut recipes: Vec<Recipe>) -> Result<Vec<Recipe>, AppError> {
        if recipes.is_empty() {
            return Ok(recipes);
        }

        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        let rows = sqlx::query_as::<_, RecipeTagRow>(
            "SELECT rt.recipe_id, t.id, t.user_id, t.name \
             FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.recipe_id = ANY($1) ORDER BY t.id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_recipe.entry(row.recipe_id).or_default().push(Tag {
                id: row.id,
                user_id: row.user_id,
                name: row.name,
            });
        }

        for recipe in &mut recipes {
            recipe.tags = by_recipe.remove(&recipe.id).unwrap_or_default();
        }
        Ok(recipes)
    }

    /// 트랜잭션 안에서 레시피의 태그 연결을 `tag_ids`로 교체합니다.
    async fn replace_tags(
        conn: &mut PgConnection,
        recipe_id: i64,
        tag_ids: &[i64],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO recipe_tags (recipe_id, tag_id) \
             SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
        )
        .bind(recipe_id)
        .bind(tag_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn with_tags(&self, recipe: Recipe) -> Result<Recipe, AppError> {
        self.attach_tags(vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("레시피 태그 로드 실패".to_string()))
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, recipe: NewRecipe, tag_ids: &[i64]) -> Result<Recipe, AppError> {
        let query = format!(
            "INSERT INTO recipes (user_id, title, time_minutes, price, description, link) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {RECIPE_COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Recipe>(&query)
            .bind(recipe.user_id)
            .bind(&recipe.title)
            .bind(recipe.time_minutes)
            .bind(recipe.price)
            .bind(&recipe.description)
            .bind(&recipe.link)
            .fetch_one(&mut *tx)
            .await?;

        if !tag_ids.is_empty() {
            Self::replace_tags(&mut *tx, created.id, tag_ids).await?;
        }

        tx.commit().await?;

        self.with_tags(created).await
    }

    async fn list_for_user(&self, user_id: i64, tag_ids: &[i64]) -> Result<Vec<Recipe>, AppError> {
        let query = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r \
             WHERE r.user_id = $1 \
               AND (cardinality($2::BIGINT[]) = 0 OR EXISTS ( \
                   SELECT 1 FROM recipe_tags rt \
                   WHERE rt.recipe_id = r.id AND rt.tag_id = ANY($2))) \
             ORDER BY r.id DESC"
        );

        let recipes = sqlx::query_as::<_, Recipe>(&query)
            .bind(user_id)
            .bind(tag_ids)
            .fetch_all(&self.pool)
            .await?;

        self.attach_tags(recipes).await
    }

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Recipe>, AppError> {
        let query = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2");

        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match recipe {
            Some(recipe) => Ok(Some(self.with_tags(recipe).await?)),
            None => Ok(None),
        }
    }

    async fn update(&self, recipe: &Recipe, tag_ids: Option<&[i64]>) -> Result<Recipe, AppError> {
        let query = format!(
            "UPDATE recipes SET title = $3, time_minutes = $4, price = $5, \
             description = $6, link = $7, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {RECIPE_COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Recipe>(&query)
            .bind(recipe.id)
            .bind(recipe.user_id)
            .bind(&recipe.title)
            .bind(recipe.time_minutes)
            .bind(recipe.price)
            .bind(&recipe.description)
            .bind(&recipe.link)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("레시피를 찾을 수 없습니다".to_string()))?;

        if let Some(tag_ids) = tag_ids {
            Self::replace_tags(&mut *tx, updated.id, tag_ids).await?;
        }

        tx.commit().await?;

        self.with_tags(updated).await
    }

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
