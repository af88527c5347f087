pub mod recipe_response;

pub use recipe_response::{RecipeDetailResponse, RecipeResponse, TagResponse};
