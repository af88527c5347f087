//! # Service Registry
//!
//! 애플리케이션 기동 시 리포지토리와 서비스를 한 번 조립하고,
//! Actix-Web의 `web::Data`로 등록하는 의존성 컨테이너입니다.
//!
//! ```text
//! Database(PgPool) ──► PgUserRepository ─┐
//!                  ──► PgRecipeRepository ├─► UserService / RecipeService / TagService
//!                  ──► PgTagRepository ───┘
//! JwtConfig ─────────► TokenService
//! ```
//!
//! 테스트에서는 [`ServiceRegistry::in_memory`]로 PostgreSQL 없이 같은 서비스 그래프를 만듭니다.
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::from_database(&database);
//! HttpServer::new(move || App::new().configure(|cfg| registry.configure(cfg)))
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::{
    config::PasswordConfig,
    db::Database,
    repositories::{
        memory::InMemoryStore,
        recipes::{PgRecipeRepository, PgTagRepository, RecipeRepository, TagRepository},
        users::{PgUserRepository, UserRepository},
    },
    services::{
        auth::TokenService,
        recipes::{RecipeService, TagService},
        users::UserService,
    },
    utils::display_terminal::{print_boxed_title, print_final_summary, print_step_complete, print_sub_task},
};

/// 조립된 서비스 핸들 모음
#[derive(Clone)]
pub struct ServiceRegistry {
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenService>,
    pub recipes: Arc<RecipeService>,
    pub tags: Arc<TagService>,
}

impl ServiceRegistry {
    /// 리포지토리 구현과 토큰 서비스로 서비스 그래프를 조립합니다.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        recipe_repo: Arc<dyn RecipeRepository>,
        tag_repo: Arc<dyn TagRepository>,
        tokens: TokenService,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(user_repo, bcrypt_cost)),
            tokens: Arc::new(tokens),
            recipes: Arc::new(RecipeService::new(recipe_repo, tag_repo.clone())),
            tags: Arc::new(TagService::new(tag_repo)),
        }
    }

    /// PostgreSQL 리포지토리와 환경 변수 설정으로 조립합니다.
    pub fn from_database(database: &Database) -> Self {
        let pool = database.pool().clone();

        let registry = Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgRecipeRepository::new(pool.clone())),
            Arc::new(PgTagRepository::new(pool)),
            TokenService::from_env(),
            PasswordConfig::bcrypt_cost(),
        );
        registry.print_summary();
        registry
    }

    /// 하나의 인메모리 저장소를 모든 리포지토리로 사용합니다.
    pub fn in_memory(store: Arc<InMemoryStore>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self::new(store.clone(), store.clone(), store, tokens, bcrypt_cost)
    }

    /// 서비스들을 애플리케이션 데이터로 등록합니다.
    ///
    /// 핸들러는 `web::Data<UserService>` 등으로 주입받습니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::from(self.recipes.clone()))
            .app_data(web::Data::from(self.tags.clone()));
    }

    fn print_summary(&self) {
        print_boxed_title("🔧 Initializing Service Registry");
        print_sub_task("UserRepository", "PostgreSQL");
        print_sub_task("RecipeRepository", "PostgreSQL");
        print_sub_task("TagRepository", "PostgreSQL");
        print_step_complete(1, "Repositories", 3);
        print_sub_task("UserService", "ready");
        print_sub_task("TokenService", "ready");
        print_sub_task("RecipeService", "ready");
        print_sub_task("TagService", "ready");
        print_step_complete(2, "Services", 4);
        print_final_summary(3, 4);
    }
}
