//! 레시피와 태그 엔티티 모듈

pub mod recipe;
pub mod tag;

pub use recipe::{NewRecipe, Recipe, RecipeChanges};
pub use tag::Tag;
