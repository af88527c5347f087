//! 인증 서비스 모듈
//!
//! HS256 JWT 액세스 토큰의 발급과 검증을 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::from_env();
//! let response = token_service.generate_access_token(&user)?;
//! let claims = token_service.verify_token(&response.token)?;
//! ```

pub mod token_service;

pub use token_service::TokenService;
