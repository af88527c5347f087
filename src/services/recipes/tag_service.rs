//! 태그 서비스 구현

use std::sync::Arc;

use crate::{
    core::errors::AppError,
    domain::dto::recipes::{request::UpdateTagRequest, response::TagResponse},
    repositories::recipes::TagRepository,
    utils::string_utils::validate_required_string,
};

/// 소유자 범위의 태그 조회/수정/삭제
pub struct TagService {
    tag_repo: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tag_repo: Arc<dyn TagRepository>) -> Self {
        Self { tag_repo }
    }

    /// 이름 내림차순 태그 목록
    pub async fn list_tags(&self, user_id: i64, assigned_only: bool) -> Result<Vec<TagResponse>, AppError> {
        let tags = self.tag_repo.list_for_user(user_id, assigned_only).await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    pub async fn update_tag(
        &self,
        user_id: i64,
        id: i64,
        request: UpdateTagRequest,
    ) -> Result<TagResponse, AppError> {
        let mut tag = self
            .tag_repo
            .find_for_user(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("태그를 찾을 수 없습니다".to_string()))?;

        tag.name = validate_required_string(&request.name, "name")?;
        let updated = self.tag_repo.update(&tag).await?;
        Ok(TagResponse::from(updated))
    }

    pub async fn delete_tag(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        if !self.tag_repo.delete_for_user(user_id, id).await? {
            return Err(AppError::NotFound("태그를 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::dto::recipes::request::TagPayload,
        domain::entities::users::NewUser,
        repositories::{memory::InMemoryStore, users::UserRepository},
    };

    async fn setup() -> (TagService, Arc<InMemoryStore>, i64, i64) {
        let store = Arc::new(InMemoryStore::new());
        let owner = UserRepository::create(
            store.as_ref(),
            NewUser::new("owner@example.com", "", None).unwrap(),
        )
        .await
        .unwrap();
        let other = UserRepository::create(
            store.as_ref(),
            NewUser::new("other@example.com", "", None).unwrap(),
        )
        .await
        .unwrap();

        (TagService::new(store.clone()), store, owner.id, other.id)
    }

    #[actix_web::test]
    async fn test_tags_ordered_by_name_descending() {
        let (service, store, owner, other) = setup().await;
        store.get_or_create(owner, "Vegan").await.unwrap();
        store.get_or_create(owner, "Dessert").await.unwrap();
        store.get_or_create(other, "Fruity").await.unwrap();

        let names: Vec<String> = service
            .list_tags(owner, false)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Vegan", "Dessert"]);
    }

    #[actix_web::test]
    async fn test_rename_conflict_and_cross_owner() {
        let (service, store, owner, other) = setup().await;
        let lunch = store.get_or_create(owner, "Lunch").await.unwrap();
        store.get_or_create(owner, "Dinner").await.unwrap();

        let conflict = service
            .update_tag(owner, lunch.id, TagPayload { name: "Dinner".to_string() })
            .await;
        assert!(matches!(conflict, Err(AppError::ConflictError(_))));

        let foreign = service
            .update_tag(other, lunch.id, TagPayload { name: "Mine".to_string() })
            .await;
        assert!(matches!(foreign, Err(AppError::NotFound(_))));

        let renamed = service
            .update_tag(owner, lunch.id, TagPayload { name: " Brunch ".to_string() })
            .await
            .unwrap();
        assert_eq!(renamed.name, "Brunch");
    }

    #[actix_web::test]
    async fn test_delete_scoped_to_owner() {
        let (service, store, owner, other) = setup().await;
        let tag = store.get_or_create(owner, "Breakfast").await.unwrap();

        assert!(matches!(
            service.delete_tag(other, tag.id).await,
            Err(AppError::NotFound(_))
        ));
        service.delete_tag(owner, tag.id).await.unwrap();
        assert!(service.list_tags(owner, false).await.unwrap().is_empty());
    }
}
