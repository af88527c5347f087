//! # 레시피 서비스 구현
//!
//! 소유자 범위의 레시피 CRUD와 태그 연결을 담당합니다.
//!
//! - 생성 시 소유자는 항상 요청 사용자입니다.
//! - 다른 사용자의 레시피는 `NotFound`로 처리됩니다.
//! - 요청의 `tags: [{name}]`은 요청 사용자의 태그로 get-or-create 된 뒤 연결됩니다.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    core::errors::AppError,
    domain::{
        dto::recipes::{
            request::{CreateRecipeRequest, TagPayload, UpdateRecipeRequest, PRICE_DECIMAL_PLACES},
            response::{RecipeDetailResponse, RecipeResponse},
        },
        entities::recipes::{NewRecipe, Recipe},
    },
    repositories::recipes::{RecipeRepository, TagRepository},
    utils::string_utils::validate_required_string,
};

/// 레시피 비즈니스 로직 서비스
pub struct RecipeService {
    recipe_repo: Arc<dyn RecipeRepository>,
    tag_repo: Arc<dyn TagRepository>,
}

impl RecipeService {
    pub fn new(recipe_repo: Arc<dyn RecipeRepository>, tag_repo: Arc<dyn TagRepository>) -> Self {
        Self {
            recipe_repo,
            tag_repo,
        }
    }

    /// 소유자의 레시피 목록 (ID 내림차순)
    pub async fn list_recipes(
        &self,
        user_id: i64,
        tag_ids: &[i64],
    ) -> Result<Vec<RecipeResponse>, AppError> {
        let recipes = self.recipe_repo.list_for_user(user_id, tag_ids).await?;
        Ok(recipes.into_iter().map(RecipeResponse::from).collect())
    }

    pub async fn get_recipe(&self, user_id: i64, id: i64) -> Result<RecipeDetailResponse, AppError> {
        self.find_owned(user_id, id).await.map(RecipeDetailResponse::from)
    }

    /// 요청 사용자를 소유자로 레시피를 생성합니다.
    ///
    /// 입력 검증이 모두 끝난 뒤에만 저장하며, 레시피 행과 태그 연결은 함께 저장됩니다.
    pub async fn create_recipe(
        &self,
        user_id: i64,
        request: CreateRecipeRequest,
    ) -> Result<RecipeDetailResponse, AppError> {
        let tag_names = normalize_tag_names(&request.tags)?;
        let new_recipe = NewRecipe {
            user_id,
            title: validate_required_string(&request.title, "title")?,
            time_minutes: request.time_minutes,
            price: normalize_price(request.price),
            description: request.description,
            link: request.link.trim().to_string(),
        };

        let tag_ids = self.resolve_tags(user_id, &tag_names).await?;
        let recipe = self.recipe_repo.create(new_recipe, &tag_ids).await?;
        log::info!("레시피 생성: ID {} (소유자 {})", recipe.id, user_id);

        Ok(RecipeDetailResponse::from(recipe))
    }

    /// 레시피를 수정합니다. `PUT` 요청도 [`UpdateRecipeRequest`]로 변환되어 이 경로를 탑니다.
    ///
    /// `tags`가 `Some`이면 연결된 태그 전체를 교체합니다.
    pub async fn update_recipe(
        &self,
        user_id: i64,
        id: i64,
        request: UpdateRecipeRequest,
    ) -> Result<RecipeDetailResponse, AppError> {
        let (mut changes, tags) = request.into_parts();

        if let Some(title) = changes.title.take() {
            changes.title = Some(validate_required_string(&title, "title")?);
        }
        changes.price = changes.price.map(normalize_price);
        changes.link = changes.link.map(|link| link.trim().to_string());
        let tag_names = tags.as_deref().map(normalize_tag_names).transpose()?;

        let mut recipe = self.find_owned(user_id, id).await?;
        let tag_ids = match tag_names {
            Some(names) => Some(self.resolve_tags(user_id, &names).await?),
            None => None,
        };

        recipe.apply(changes);
        let updated = self.recipe_repo.update(&recipe, tag_ids.as_deref()).await?;

        Ok(RecipeDetailResponse::from(updated))
    }

    pub async fn delete_recipe(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        if !self.recipe_repo.delete_for_user(user_id, id).await? {
            return Err(AppError::NotFound("레시피를 찾을 수 없습니다".to_string()));
        }

        log::info!("레시피 삭제: ID {} (소유자 {})", id, user_id);
        Ok(())
    }

    async fn find_owned(&self, user_id: i64, id: i64) -> Result<Recipe, AppError> {
        self.recipe_repo
            .find_for_user(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("레시피를 찾을 수 없습니다".to_string()))
    }

    /// 검증된 태그 이름들을 소유자의 태그 ID로 변환합니다.
    async fn resolve_tags(&self, user_id: i64, names: &[String]) -> Result<Vec<i64>, AppError> {
        let mut tag_ids = Vec::with_capacity(names.len());
        for name in names {
            let tag = self.tag_repo.get_or_create(user_id, name).await?;
            tag_ids.push(tag.id);
        }
        Ok(tag_ids)
    }
}

/// 태그 이름의 공백을 정리하고 중복을 제거합니다. 빈 이름이 있으면 아무것도 저장하지 않고 실패합니다.
fn normalize_tag_names(tags: &[TagPayload]) -> Result<Vec<String>, AppError> {
    let mut names: Vec<String> = Vec::with_capacity(tags.len());
    for payload in tags {
        let name = validate_required_string(&payload.name, "name")?;
        if !names.contains(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// 저장 전 가격을 소수점 2자리로 맞춥니다 (`5.5` → `5.50`).
fn normalize_price(mut price: Decimal) -> Decimal {
    price.rescale(PRICE_DECIMAL_PLACES);
    price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::entities::users::NewUser,
        repositories::{memory::InMemoryStore, users::UserRepository},
    };
    use std::str::FromStr;

    async fn setup() -> (RecipeService, Arc<InMemoryStore>, i64, i64) {
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

        let service = RecipeService::new(store.clone(), store.clone());
        (service, store, owner.id, other.id)
    }

    fn create_request(title: &str, tags: &[&str]) -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: title.to_string(),
            time_minutes: 30,
            price: Decimal::from_str("5.5").unwrap(),
            description: String::new(),
            link: String::new(),
            tags: tags
                .iter()
                .map(|name| TagPayload {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    #[actix_web::test]
    async fn test_create_recipe_with_new_tags() {
        let (service, _store, owner, _) = setup().await;

        let recipe = service
            .create_recipe(owner, create_request("Thai Prawn Curry", &["Thai", "Dinner"]))
            .await
            .unwrap();

        assert_eq!(recipe.recipe.tags.len(), 2);
        assert_eq!(recipe.recipe.price.to_string(), "5.50");
    }

    #[actix_web::test]
    async fn test_create_recipe_reuses_existing_tag() {
        let (service, store, owner, _) = setup().await;
        let existing = store.get_or_create(owner, "Indian").await.unwrap();

        let recipe = service
            .create_recipe(owner, create_request("Pongal", &["Indian", "Breakfast", "Indian"]))
            .await
            .unwrap();

        let names: Vec<&str> = recipe.recipe.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(recipe.recipe.tags.len(), 2);
        assert!(names.contains(&"Indian"));
        assert!(recipe.recipe.tags.iter().any(|t| t.id == existing.id));
    }

    #[actix_web::test]
    async fn test_update_replaces_and_clears_tags() {
        let (service, _store, owner, _) = setup().await;
        let recipe = service
            .create_recipe(owner, create_request("Toast", &["Breakfast"]))
            .await
            .unwrap();
        let id = recipe.recipe.id;

        let updated = service
            .update_recipe(
                owner,
                id,
                UpdateRecipeRequest {
                    tags: Some(vec![TagPayload {
                        name: "Lunch".to_string(),
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.recipe.tags.len(), 1);
        assert_eq!(updated.recipe.tags[0].name, "Lunch");

        let cleared = service
            .update_recipe(
                owner,
                id,
                UpdateRecipeRequest {
                    tags: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.recipe.tags.is_empty());
        assert_eq!(cleared.recipe.title, "Toast");
    }

    #[actix_web::test]
    async fn test_blank_tag_name_stores_nothing() {
        let (service, store, owner, _) = setup().await;

        let result = service
            .create_recipe(owner, create_request("Thai Prawn Curry", &["Thai", "   "]))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(service.list_recipes(owner, &[]).await.unwrap().is_empty());
        assert!(TagRepository::list_for_user(store.as_ref(), owner, false)
            .await
            .unwrap()
            .is_empty());

        let recipe = service
            .create_recipe(owner, create_request("Toast", &["Breakfast"]))
            .await
            .unwrap();
        let result = service
            .update_recipe(
                owner,
                recipe.recipe.id,
                UpdateRecipeRequest {
                    title: Some("Changed".to_string()),
                    tags: Some(vec![TagPayload {
                        name: " ".to_string(),
                    }]),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let unchanged = service.get_recipe(owner, recipe.recipe.id).await.unwrap();
        assert_eq!(unchanged.recipe.title, "Toast");
        assert_eq!(unchanged.recipe.tags.len(), 1);
    }

    #[actix_web::test]
    async fn test_other_users_recipe_is_not_found() {
        let (service, _store, owner, other) = setup().await;
        let recipe = service
            .create_recipe(owner, create_request("Private", &[]))
            .await
            .unwrap();
        let id = recipe.recipe.id;

        assert!(matches!(
            service.get_recipe(other, id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_recipe(other, id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(service.get_recipe(owner, id).await.is_ok());
    }

    #[actix_web::test]
    async fn test_tags_created_for_recipe_belong_to_owner() {
        let (service, store, owner, other) = setup().await;
        service
            .create_recipe(owner, create_request("Curry", &["Spicy"]))
            .await
            .unwrap();

        let owner_tags = TagRepository::list_for_user(store.as_ref(), owner, false)
            .await
            .unwrap();
        let other_tags = TagRepository::list_for_user(store.as_ref(), other, false)
            .await
            .unwrap();
        assert_eq!(owner_tags.len(), 1);
        assert!(other_tags.is_empty());
    }
}
