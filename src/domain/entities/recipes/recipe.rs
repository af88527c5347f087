//! Recipe Entity Implementation
//!
//! 사용자가 소유하는 레시피 엔티티와 생성/수정용 값 객체를 정의합니다.
//! 태그는 `recipe_tags` 조인 테이블을 통해 다대다로 연결되며,
//! 리포지토리가 조회 시 [`Recipe::tags`]를 채워줍니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::tag::Tag;

/// 레시피 엔티티
///
/// `recipes` 테이블의 한 행과 연결된 태그 목록입니다.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Recipe {
    pub id: i64,
    /// 소유자 ID
    pub user_id: i64,
    pub title: String,
    /// 조리 시간 (분)
    pub time_minutes: i32,
    /// 가격 (최대 5자리, 소수점 2자리)
    pub price: Decimal,
    pub description: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 연결된 태그 (조인 테이블에서 별도로 로드)
    #[sqlx(skip)]
    pub tags: Vec<Tag>,
}

impl Recipe {
    /// 변경 사항을 적용합니다. `None` 필드는 기존 값을 유지합니다.
    ///
    /// 태그 변경은 조인 테이블에서 처리되므로 여기서는 다루지 않습니다.
    pub fn apply(&mut self, changes: RecipeChanges) {
        let RecipeChanges {
            title,
            time_minutes,
            price,
            description,
            link,
        } = changes;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(time_minutes) = time_minutes {
            self.time_minutes = time_minutes;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(link) = link {
            self.link = link;
        }
    }

    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|tag| tag.id).collect()
    }
}

/// 저장 전 레시피 데이터
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub link: String,
}

/// 레시피 부분 수정 데이터
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
}
