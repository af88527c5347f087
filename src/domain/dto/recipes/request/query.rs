//! 목록 조회 쿼리 파라미터

use serde::Deserialize;

use crate::core::errors::AppError;
use crate::utils::string_utils::{parse_flag, parse_id_list};

/// `GET /api/recipe/recipes?tags=1,2`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListQuery {
    pub tags: Option<String>,
}

impl RecipeListQuery {
    /// 필터링할 태그 ID 목록. 비어 있으면 필터를 적용하지 않습니다.
    pub fn tag_ids(&self) -> Result<Vec<i64>, AppError> {
        match &self.tags {
            Some(tags) => parse_id_list(tags, "tags"),
            None => Ok(Vec::new()),
        }
    }
}

/// `GET /api/recipe/tags?assigned_only=1`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListQuery {
    pub assigned_only: Option<String>,
}

impl TagListQuery {
    pub fn assigned_only(&self) -> bool {
        self.assigned_only.as_deref().is_some_and(parse_flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_query_tag_ids() {
        let query = RecipeListQuery {
            tags: Some("4,7".to_string()),
        };
        assert_eq!(query.tag_ids().unwrap(), vec![4, 7]);
        assert!(RecipeListQuery::default().tag_ids().unwrap().is_empty());
    }

    #[test]
    fn test_tag_query_assigned_only() {
        let query = TagListQuery {
            assigned_only: Some("1".to_string()),
        };
        assert!(query.assigned_only());
        assert!(!TagListQuery::default().assigned_only());
    }
}
