//! 레시피/태그 데이터 액세스 계층

pub mod recipe_repo;
pub mod tag_repo;

pub use recipe_repo::{PgRecipeRepository, RecipeRepository};
pub use tag_repo::{PgTagRepository, TagRepository};
