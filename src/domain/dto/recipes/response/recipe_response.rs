//! 레시피/태그 응답 DTO
//!
//! 목록 응답은 `description`을 생략하고, 상세 응답은 목록 표현에 `description`을 더합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::recipes::{Recipe, Tag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// 레시피 목록 표현
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    /// 문자열로 직렬화됩니다 (`"5.25"`)
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<TagResponse>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

/// 레시피 상세 표현
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub description: String,
}

impl From<Recipe> for RecipeDetailResponse {
    fn from(mut recipe: Recipe) -> Self {
        let description = std::mem::take(&mut recipe.description);
        Self {
            recipe: RecipeResponse::from(recipe),
            description,
        }
    }
}
