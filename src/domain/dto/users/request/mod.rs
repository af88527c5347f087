pub mod create_user;

pub use create_user::*;
