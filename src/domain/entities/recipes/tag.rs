//! Tag Entity
//!
//! 레시피를 분류하기 위한 사용자별 태그입니다. 이름은 소유자 안에서만 유일합니다.

use sqlx::FromRow;

/// 태그 엔티티 (`tags` 테이블)
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Tag {
    pub id: i64,
    /// 소유자 ID
    pub user_id: i64,
    pub name: String,
}
