pub mod recipe_request;
pub mod query;

pub use query::{RecipeListQuery, TagListQuery};
pub use recipe_request::*;
