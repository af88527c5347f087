//! 인증된 요청 사용자
//!
//! 인증 미들웨어가 토큰을 검증하고 현재 계정을 조회한 뒤 Request Extensions에 저장하며,
//! 핸들러는 인자로 [`AuthenticatedUser`]를 받아 꺼내 씁니다.

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::User;

/// 요청 시점의 계정 상태로 만든 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 ID
    pub user_id: i64,

    pub email: String,

    /// 사용자 역할 목록 (`is_staff`이면 `admin` 포함)
    pub roles: Vec<String>,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            roles: user.roles(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}
