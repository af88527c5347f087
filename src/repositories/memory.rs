//! # 인메모리 저장소
//!
//! PostgreSQL 없이 서비스와 HTTP 핸들러를 실행하기 위한 저장소입니다.
//! 하나의 [`InMemoryStore`]가 사용자/레시피/태그 리포지토리 trait을 모두 구현하며,
//! 외래 키의 `ON DELETE CASCADE`와 유니크 제약을 PostgreSQL 스키마와 같게 흉내냅니다.
//!
//! ```rust,ignore
//! let store = Arc::new(InMemoryStore::new());
//! let registry = ServiceRegistry::in_memory(store, 4);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    core::errors::AppError,
    domain::entities::{
        recipes::{NewRecipe, Recipe, Tag},
        users::{NewUser, User},
    },
    repositories::{
        recipes::{RecipeRepository, TagRepository},
        users::UserRepository,
    },
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    recipes: BTreeMap<i64, Recipe>,
    tags: BTreeMap<i64, Tag>,
    /// (recipe_id, tag_id)
    recipe_tags: BTreeSet<(i64, i64)>,
    next_user_id: i64,
    next_recipe_id: i64,
    next_tag_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn tags_of(&self, recipe_id: i64) -> Vec<Tag> {
        self.recipe_tags
            .range((recipe_id, i64::MIN)..=(recipe_id, i64::MAX))
            .filter_map(|(_, tag_id)| self.tags.get(tag_id).cloned())
            .collect()
    }

    fn with_tags(&self, recipe: &Recipe) -> Recipe {
        Recipe {
            tags: self.tags_of(recipe.id),
            ..recipe.clone()
        }
    }

    fn remove_recipe(&mut self, recipe_id: i64) {
        self.recipes.remove(&recipe_id);
        self.recipe_tags.retain(|(r, _)| *r != recipe_id);
    }

    /// 외래 키 검사: 없는 태그 ID가 있으면 아무것도 쓰지 않고 실패합니다.
    fn ensure_tags_exist(&self, tag_ids: &[i64]) -> Result<(), AppError> {
        match tag_ids.iter().find(|id| !self.tags.contains_key(id)) {
            Some(missing) => Err(AppError::DatabaseError(format!(
                "존재하지 않는 태그 ID: {}",
                missing
            ))),
            None => Ok(()),
        }
    }

    fn replace_tags(&mut self, recipe_id: i64, tag_ids: &[i64]) {
        self.recipe_tags.retain(|(r, _)| *r != recipe_id);
        for tag_id in tag_ids {
            self.recipe_tags.insert((recipe_id, *tag_id));
        }
    }

    fn remove_tag(&mut self, tag_id: i64) {
        self.tags.remove(&tag_id);
        self.recipe_tags.retain(|(_, t)| *t != tag_id);
    }
}

/// 프로세스 메모리에 데이터를 보관하는 저장소
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::InternalError("인메모리 저장소 잠금 실패".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::InternalError("인메모리 저장소 잠금 실패".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.write()?;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError(
                "이미 사용 중인 이메일입니다".to_string(),
            ));
        }

        let id = Tables::next_id(&mut tables.next_user_id);
        let created = User {
            id,
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            is_active: true,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            last_login: None,
            created_at: Utc::now(),
        };
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.write()?;
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AppError::ConflictError(
                "이미 사용 중인 이메일입니다".to_string(),
            ));
        }

        match tables.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = User {
                    last_login: stored.last_login,
                    created_at: stored.created_at,
                    ..user.clone()
                };
                Ok(stored.clone())
            }
            None => Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string())),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        let recipe_ids: Vec<i64> = tables
            .recipes
            .values()
            .filter(|r| r.user_id == id)
            .map(|r| r.id)
            .collect();
        for recipe_id in recipe_ids {
            tables.remove_recipe(recipe_id);
        }

        let tag_ids: Vec<i64> = tables
            .tags
            .values()
            .filter(|t| t.user_id == id)
            .map(|t| t.id)
            .collect();
        for tag_id in tag_ids {
            tables.remove_tag(tag_id);
        }

        Ok(true)
    }

    async fn touch_last_login(&self, id: i64) -> Result<(), AppError> {
        if let Some(user) = self.write()?.users.get_mut(&id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn create(&self, recipe: NewRecipe, tag_ids: &[i64]) -> Result<Recipe, AppError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&recipe.user_id) {
            return Err(AppError::DatabaseError(format!(
                "존재하지 않는 사용자 ID: {}",
                recipe.user_id
            )));
        }
        tables.ensure_tags_exist(tag_ids)?;

        let id = Tables::next_id(&mut tables.next_recipe_id);
        let now = Utc::now();
        let created = Recipe {
            id,
            user_id: recipe.user_id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            description: recipe.description,
            link: recipe.link,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
        };
        tables.recipes.insert(id, created.clone());
        tables.replace_tags(id, tag_ids);

        Ok(tables.with_tags(&created))
    }

    async fn list_for_user(&self, user_id: i64, tag_ids: &[i64]) -> Result<Vec<Recipe>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .recipes
            .values()
            .rev()
            .filter(|r| r.user_id == user_id)
            .filter(|r| {
                tag_ids.is_empty()
                    || tag_ids
                        .iter()
                        .any(|tag_id| tables.recipe_tags.contains(&(r.id, *tag_id)))
            })
            .map(|r| tables.with_tags(r))
            .collect())
    }

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Recipe>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .recipes
            .get(&id)
            .filter(|r| r.user_id == user_id)
            .map(|r| tables.with_tags(r)))
    }

    async fn update(&self, recipe: &Recipe, tag_ids: Option<&[i64]>) -> Result<Recipe, AppError> {
        let mut tables = self.write()?;
        if let Some(tag_ids) = tag_ids {
            tables.ensure_tags_exist(tag_ids)?;
        }

        let stored = tables
            .recipes
            .get_mut(&recipe.id)
            .filter(|r| r.user_id == recipe.user_id)
            .ok_or_else(|| AppError::NotFound("레시피를 찾을 수 없습니다".to_string()))?;

        *stored = Recipe {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            tags: Vec::new(),
            ..recipe.clone()
        };
        let updated = stored.clone();

        if let Some(tag_ids) = tag_ids {
            tables.replace_tags(updated.id, tag_ids);
        }
        Ok(tables.with_tags(&updated))
    }

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let owned = tables
            .recipes
            .get(&id)
            .is_some_and(|r| r.user_id == user_id);
        if owned {
            tables.remove_recipe(id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn get_or_create(&self, user_id: i64, name: &str) -> Result<Tag, AppError> {
        let mut tables = self.write()?;
        if let Some(existing) = tables
            .tags
            .values()
            .find(|t| t.user_id == user_id && t.name == name)
        {
            return Ok(existing.clone());
        }

        let id = Tables::next_id(&mut tables.next_tag_id);
        let tag = Tag {
            id,
            user_id,
            name: name.to_string(),
        };
        tables.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn list_for_user(&self, user_id: i64, assigned_only: bool) -> Result<Vec<Tag>, AppError> {
        let tables = self.read()?;
        let mut tags: Vec<Tag> = tables
            .tags
            .values()
            .filter(|t| t.user_id == user_id)
            .filter(|t| !assigned_only || tables.recipe_tags.iter().any(|(_, id)| *id == t.id))
            .cloned()
            .collect();

        tags.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(tags)
    }

    async fn find_for_user(&self, user_id: i64, id: i64) -> Result<Option<Tag>, AppError> {
        Ok(self
            .read()?
            .tags
            .get(&id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    async fn update(&self, tag: &Tag) -> Result<Tag, AppError> {
        let mut tables = self.write()?;
        if tables
            .tags
            .values()
            .any(|t| t.id != tag.id && t.user_id == tag.user_id && t.name == tag.name)
        {
            return Err(AppError::ConflictError(
                "이미 같은 이름의 태그가 있습니다".to_string(),
            ));
        }

        let stored = tables
            .tags
            .get_mut(&tag.id)
            .filter(|t| t.user_id == tag.user_id)
            .ok_or_else(|| AppError::NotFound("태그를 찾을 수 없습니다".to_string()))?;
        stored.name = tag.name.clone();
        Ok(stored.clone())
    }

    async fn delete_for_user(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let owned = tables.tags.get(&id).is_some_and(|t| t.user_id == user_id);
        if owned {
            tables.remove_tag(id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    async fn seed_user(store: &InMemoryStore, email: &str) -> User {
        UserRepository::create(store, NewUser::new(email, "", None).unwrap())
            .await
            .unwrap()
    }

    fn new_recipe(user_id: i64, title: &str) -> NewRecipe {
        NewRecipe {
            user_id,
            title: title.to_string(),
            time_minutes: 5,
            price: Decimal::new(500, 2),
            description: String::new(),
            link: String::new(),
        }
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        seed_user(&store, "user@example.com").await;

        let result = UserRepository::create(
            &store,
            NewUser::new("user@example.com", "", None).unwrap(),
        )
        .await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_user_delete_cascades() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "user@example.com").await;
        let tag = store.get_or_create(user.id, "Vegan").await.unwrap();
        let recipe = RecipeRepository::create(&store, new_recipe(user.id, "Soup"), &[tag.id])
            .await
            .unwrap();

        assert!(UserRepository::delete(&store, user.id).await.unwrap());

        assert!(RecipeRepository::find_for_user(&store, user.id, recipe.id)
            .await
            .unwrap()
            .is_none());
        assert!(TagRepository::list_for_user(&store, user.id, false)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn test_tag_get_or_create_is_scoped_per_owner() {
        let store = InMemoryStore::new();
        let first = seed_user(&store, "first@example.com").await;
        let second = seed_user(&store, "second@example.com").await;

        let a = store.get_or_create(first.id, "Breakfast").await.unwrap();
        let b = store.get_or_create(first.id, "Breakfast").await.unwrap();
        let c = store.get_or_create(second.id, "Breakfast").await.unwrap();

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[actix_web::test]
    async fn test_recipe_list_filters_by_tags() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "user@example.com").await;
        let vegan = store.get_or_create(user.id, "Vegan").await.unwrap();
        let veggie = store.get_or_create(user.id, "Vegetarian").await.unwrap();
        RecipeRepository::create(&store, new_recipe(user.id, "Curry"), &[vegan.id])
            .await
            .unwrap();
        RecipeRepository::create(&store, new_recipe(user.id, "Tahini"), &[veggie.id])
            .await
            .unwrap();
        RecipeRepository::create(&store, new_recipe(user.id, "Fish"), &[])
            .await
            .unwrap();

        let all = RecipeRepository::list_for_user(&store, user.id, &[])
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id > w[1].id));

        let filtered = RecipeRepository::list_for_user(&store, user.id, &[vegan.id, veggie.id])
            .await
            .unwrap();
        let titles: Vec<&str> = filtered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Tahini", "Curry"]);
    }

    #[actix_web::test]
    async fn test_failed_recipe_write_leaves_no_trace() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "user@example.com").await;

        let result = RecipeRepository::create(&store, new_recipe(user.id, "Ghost"), &[999]).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert!(RecipeRepository::list_for_user(&store, user.id, &[])
            .await
            .unwrap()
            .is_empty());

        let recipe = RecipeRepository::create(&store, new_recipe(user.id, "Soup"), &[])
            .await
            .unwrap();
        let renamed = Recipe {
            title: "Stew".to_string(),
            ..recipe.clone()
        };
        let result = RecipeRepository::update(&store, &renamed, Some(&[999][..])).await;
        assert!(result.is_err());

        let stored = RecipeRepository::find_for_user(&store, user.id, recipe.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, "Soup");
    }
}
