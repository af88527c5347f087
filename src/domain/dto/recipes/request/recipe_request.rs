//! # 레시피/태그 요청 DTO
//!
//! 레시피 생성, 부분 수정(PATCH), 전체 수정(PUT)과 태그 수정 요청 본문입니다.
//! 태그는 `[{"name": "Vegan"}]` 형태로 전달되며, 서비스 계층에서
//! 요청 사용자 소유의 태그로 get-or-create 됩니다.
//!
//! ## JSON 예제
//!
//! ```json
//! {
//!   "title": "Thai Prawn Curry",
//!   "time_minutes": 30,
//!   "price": "2.50",
//!   "tags": [{"name": "Thai"}, {"name": "Dinner"}]
//! }
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::recipes::RecipeChanges;

/// 가격의 최대 소수 자릿수
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// 태그 이름 페이로드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TagPayload {
    #[validate(
        length(min = 1, max = 255, message = "태그 이름은 1-255자여야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

/// 레시피 생성 요청 (`POST /api/recipe/recipes`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(
        length(min = 1, max = 255, message = "제목은 1-255자여야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(range(min = 0, message = "조리 시간은 0 이상이어야 합니다"))]
    pub time_minutes: i32,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "링크는 255자 이하여야 합니다"))]
    pub link: String,

    #[serde(default)]
    #[validate(nested)]
    pub tags: Vec<TagPayload>,
}

/// 레시피 부분 수정 요청 (`PATCH /api/recipe/recipes/{id}`)
///
/// 전달된 필드만 반영합니다. `tags`가 있으면 태그 목록 전체를 교체하며,
/// 빈 배열은 모든 태그를 해제합니다. 소유자 필드는 받지 않습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(
        length(min = 1, max = 255, message = "제목은 1-255자여야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(range(min = 0, message = "조리 시간은 0 이상이어야 합니다"))]
    pub time_minutes: Option<i32>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,

    pub description: Option<String>,

    #[validate(length(max = 255, message = "링크는 255자 이하여야 합니다"))]
    pub link: Option<String>,

    #[validate(nested)]
    pub tags: Option<Vec<TagPayload>>,
}

impl UpdateRecipeRequest {
    /// 엔티티에 적용할 변경 사항과 태그 교체 목록으로 분리합니다.
    pub fn into_parts(self) -> (RecipeChanges, Option<Vec<TagPayload>>) {
        let changes = RecipeChanges {
            title: self.title,
            time_minutes: self.time_minutes,
            price: self.price,
            description: self.description,
            link: self.link,
        };
        (changes, self.tags)
    }
}

/// 레시피 전체 수정 요청 (`PUT /api/recipe/recipes/{id}`)
///
/// `title`, `time_minutes`, `price`는 필수입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplaceRecipeRequest {
    #[validate(
        length(min = 1, max = 255, message = "제목은 1-255자여야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(range(min = 0, message = "조리 시간은 0 이상이어야 합니다"))]
    pub time_minutes: i32,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    pub description: Option<String>,

    #[validate(length(max = 255, message = "링크는 255자 이하여야 합니다"))]
    pub link: Option<String>,

    #[validate(nested)]
    pub tags: Option<Vec<TagPayload>>,
}

impl From<ReplaceRecipeRequest> for UpdateRecipeRequest {
    fn from(request: ReplaceRecipeRequest) -> Self {
        Self {
            title: Some(request.title),
            time_minutes: Some(request.time_minutes),
            price: Some(request.price),
            description: request.description,
            link: request.link,
            tags: request.tags,
        }
    }
}

/// 태그 이름 수정 요청 (`PATCH`/`PUT /api/recipe/tags/{id}`)
pub type UpdateTagRequest = TagPayload;

/// 공백만으로 이루어진 문자열을 거부합니다.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 가격은 최대 5자리, 소수점 이하 2자리까지 허용합니다 (0.00 ~ 999.99).
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price_negative"));
    }
    if price.normalize().scale() > PRICE_DECIMAL_PLACES {
        return Err(ValidationError::new("price_decimal_places"));
    }
    if price.trunc() >= Decimal::from(1000) {
        return Err(ValidationError::new("price_max_digits"));
    }
    Ok(())
}
