//! PostgreSQL 리포지토리 통합 테스트
//!
//! 실제 SQL(`UNNEST`, `cardinality`, `ON CONFLICT`)을 실행하므로 데이터베이스가 필요합니다.
//! `TEST_DATABASE_URL`을 지정하고 `cargo test -- --ignored`로 실행합니다.

use rust_decimal::Decimal;
use sqlx::{PgPool, postgres::PgPoolOptions};

use recipe_app_backend::{
    core::errors::AppError,
    db::Database,
    domain::entities::{
        recipes::{NewRecipe, Tag},
        users::{NewUser, User},
    },
    repositories::{
        recipes::{PgRecipeRepository, PgTagRepository, RecipeRepository, TagRepository},
        users::{PgUserRepository, UserRepository},
    },
};

const SKIP_MESSAGE: &str = "SKIP-PG-REPOSITORIES: set TEST_DATABASE_URL to run";

/// 마이그레이션이 적용된 풀. 환경 변수가 없으면 `None`
async fn migrated_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("TEST_DATABASE_URL should be reachable");
    Database::from_pool(pool.clone())
        .migrate()
        .await
        .expect("migrations should apply");
    Some(pool)
}

async fn create_user(users: &PgUserRepository, prefix: &str) -> User {
    let email = format!(
        "{}-{}@example.com",
        prefix,
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );
    users
        .create(NewUser::new(&email, "", None).unwrap())
        .await
        .unwrap()
}

fn new_recipe(user_id: i64, title: &str) -> NewRecipe {
    NewRecipe {
        user_id,
        title: title.to_string(),
        time_minutes: 10,
        price: Decimal::new(525, 2),
        description: String::new(),
        link: String::new(),
    }
}

fn tag_names(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|tag| tag.name.as_str()).collect()
}

#[actix_web::test]
#[ignore = "requires PostgreSQL; opt-in via TEST_DATABASE_URL"]
async fn test_pg_tags_and_recipes_round_trip() {
    let Some(pool) = migrated_pool().await else {
        eprintln!("{}", SKIP_MESSAGE);
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let recipes = PgRecipeRepository::new(pool.clone());
    let tags = PgTagRepository::new(pool.clone());
    let user = create_user(&users, "pg-recipes").await;

    // 같은 이름은 같은 행을 돌려준다
    let vegan = tags.get_or_create(user.id, "Vegan").await.unwrap();
    let again = tags.get_or_create(user.id, "Vegan").await.unwrap();
    assert_eq!(vegan.id, again.id);
    let dessert = tags.get_or_create(user.id, "Dessert").await.unwrap();
    let unused = tags.get_or_create(user.id, "Unused").await.unwrap();

    let curry = recipes
        .create(new_recipe(user.id, "Curry"), &[vegan.id, dessert.id, vegan.id])
        .await
        .unwrap();
    assert_eq!(tag_names(&curry.tags), vec!["Vegan", "Dessert"]);
    assert_eq!(curry.price, Decimal::new(525, 2));
    let soup = recipes.create(new_recipe(user.id, "Soup"), &[]).await.unwrap();

    let all = recipes.list_for_user(user.id, &[]).await.unwrap();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![soup.id, curry.id]);

    let filtered = recipes.list_for_user(user.id, &[dessert.id]).await.unwrap();
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![curry.id]);

    let assigned = tags.list_for_user(user.id, true).await.unwrap();
    assert_eq!(tag_names(&assigned), vec!["Vegan", "Dessert"]);
    let everything = tags.list_for_user(user.id, false).await.unwrap();
    assert_eq!(tag_names(&everything), vec!["Vegan", "Unused", "Dessert"]);

    // 태그 교체
    let mut edited = curry.clone();
    edited.title = "Green curry".to_string();
    let updated = recipes.update(&edited, Some(&[unused.id][..])).await.unwrap();
    assert_eq!(updated.title, "Green curry");
    assert_eq!(tag_names(&updated.tags), vec!["Unused"]);

    // None이면 태그는 그대로
    let kept = recipes.update(&updated, None).await.unwrap();
    assert_eq!(tag_names(&kept.tags), vec!["Unused"]);

    users.delete(user.id).await.unwrap();
}

#[actix_web::test]
#[ignore = "requires PostgreSQL; opt-in via TEST_DATABASE_URL"]
async fn test_pg_failed_recipe_write_is_rolled_back() {
    let Some(pool) = migrated_pool().await else {
        eprintln!("{}", SKIP_MESSAGE);
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let recipes = PgRecipeRepository::new(pool.clone());
    let tags = PgTagRepository::new(pool.clone());
    let user = create_user(&users, "pg-rollback").await;
    let tag = tags.get_or_create(user.id, "Kept").await.unwrap();

    let result = recipes.create(new_recipe(user.id, "Ghost"), &[i64::MAX]).await;
    assert!(result.is_err());
    assert!(recipes.list_for_user(user.id, &[]).await.unwrap().is_empty());

    let recipe = recipes
        .create(new_recipe(user.id, "Stable"), &[tag.id])
        .await
        .unwrap();
    let mut edited = recipe.clone();
    edited.title = "Changed".to_string();
    assert!(recipes.update(&edited, Some(&[i64::MAX][..])).await.is_err());

    let stored = recipes.find_for_user(user.id, recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Stable");
    assert_eq!(tag_names(&stored.tags), vec!["Kept"]);

    users.delete(user.id).await.unwrap();
}

#[actix_web::test]
#[ignore = "requires PostgreSQL; opt-in via TEST_DATABASE_URL"]
async fn test_pg_tag_rename_conflict_and_user_cascade() {
    let Some(pool) = migrated_pool().await else {
        eprintln!("{}", SKIP_MESSAGE);
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let recipes = PgRecipeRepository::new(pool.clone());
    let tags = PgTagRepository::new(pool.clone());
    let user = create_user(&users, "pg-cascade").await;
    let other = create_user(&users, "pg-cascade-other").await;

    tags.get_or_create(user.id, "Lunch").await.unwrap();
    let mut dinner = tags.get_or_create(user.id, "Dinner").await.unwrap();
    // 다른 소유자는 같은 이름을 가질 수 있다
    tags.get_or_create(other.id, "Lunch").await.unwrap();

    dinner.name = "Lunch".to_string();
    let err = tags.update(&dinner).await.unwrap_err();
    assert!(matches!(err, AppError::ConflictError(_)));

    let duplicate = NewUser::new(&user.email, "", None).unwrap();
    let err = users.create(duplicate).await.unwrap_err();
    assert!(matches!(err, AppError::ConflictError(_)));

    let recipe = recipes
        .create(new_recipe(user.id, "Cascade"), &[dinner.id])
        .await
        .unwrap();

    assert!(users.delete(user.id).await.unwrap());
    assert!(recipes.find_for_user(user.id, recipe.id).await.unwrap().is_none());
    assert!(tags.list_for_user(user.id, false).await.unwrap().is_empty());
    assert_eq!(tags.list_for_user(other.id, false).await.unwrap().len(), 1);

    users.delete(other.id).await.unwrap();
}
