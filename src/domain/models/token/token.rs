//! JWT 클레임 구조체
//!
//! RFC 7519 표준 클레임(`sub`, `iat`, `exp`)과 애플리케이션 클레임을 담습니다.

use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 ID 문자열)
    pub sub: String,
    pub email: String,
    /// 사용자 역할 목록 (`user`, 스태프는 `admin` 추가)
    pub roles: Vec<String>,
    /// 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 만료 시간 (Unix timestamp)
    pub exp: i64,
}
