//! # 사용자 요청 DTO
//!
//! 회원가입, 토큰 발급, 내 정보 수정, 관리자 사용자 관리에 쓰이는 요청 본문입니다.
//! 모든 구조체는 `validator::Validate`를 구현하며, 핸들러에서 `validate()` 후
//! 서비스 계층으로 전달됩니다.
//!
//! ## JSON 예제
//!
//! ```json
//! {
//!   "email": "test@example.com",
//!   "password": "testpass123",
//!   "name": "Test Name"
//! }
//! ```

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 비밀번호 최소 길이
pub const MIN_PASSWORD_LENGTH: u64 = 5;

/// 새 사용자 생성 요청 (`POST /api/user/create`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// 로그인 식별자. 저장 시 도메인 부분이 소문자로 정규화됩니다.
    #[validate(
        email(message = "유효한 이메일 주소를 입력해주세요"),
        length(max = 255, message = "이메일은 255자 이하여야 합니다")
    )]
    pub email: String,

    /// 응답에 포함되지 않는 쓰기 전용 필드
    #[validate(length(min = 5, message = "비밀번호는 5자 이상이어야 합니다"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "이름은 255자 이하여야 합니다"))]
    pub name: String,
}

/// 토큰 발급 요청 (`POST /api/user/token`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthTokenRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 내 정보 수정 요청 (`PATCH`/`PUT /api/user/me`)
///
/// 전달된 필드만 반영합니다. 비밀번호가 있으면 새로 해싱하여 저장합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(
        email(message = "유효한 이메일 주소를 입력해주세요"),
        length(max = 255, message = "이메일은 255자 이하여야 합니다")
    )]
    pub email: Option<String>,

    #[validate(length(min = 5, message = "비밀번호는 5자 이상이어야 합니다"))]
    pub password: Option<String>,

    #[validate(length(max = 255, message = "이름은 255자 이하여야 합니다"))]
    pub name: Option<String>,
}

/// 내 정보 전체 수정 요청 (`PUT /api/user/me`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplaceMeRequest {
    #[validate(
        email(message = "유효한 이메일 주소를 입력해주세요"),
        length(max = 255, message = "이메일은 255자 이하여야 합니다")
    )]
    pub email: String,

    #[validate(length(min = 5, message = "비밀번호는 5자 이상이어야 합니다"))]
    pub password: String,

    #[validate(length(max = 255, message = "이름은 255자 이하여야 합니다"))]
    pub name: String,
}

impl From<ReplaceMeRequest> for UpdateMeRequest {
    fn from(request: ReplaceMeRequest) -> Self {
        Self {
            email: Some(request.email),
            password: Some(request.password),
            name: Some(request.name),
        }
    }
}

/// 관리자 사용자 생성 요청 (`POST /api/admin/users`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminCreateUserRequest {
    #[validate(
        email(message = "유효한 이메일 주소를 입력해주세요"),
        length(max = 255, message = "이메일은 255자 이하여야 합니다")
    )]
    pub email: String,

    #[validate(length(min = 5, message = "비밀번호는 5자 이상이어야 합니다"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "이름은 255자 이하여야 합니다"))]
    pub name: String,

    #[serde(default)]
    pub is_staff: bool,

    #[serde(default)]
    pub is_superuser: bool,
}

/// 관리자 사용자 수정 요청 (`PATCH /api/admin/users/{id}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(max = 255, message = "이름은 255자 이하여야 합니다"))]
    pub name: Option<String>,

    pub is_active: Option<bool>,

    pub is_staff: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_validation() {
        let valid = CreateUserRequest {
            email: "test@example.com".to_string(),
            password: "testpass123".to_string(),
            name: "Test Name".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = CreateUserRequest {
            password: "pw".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let bad_email = CreateUserRequest {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_name_defaults_to_empty() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"email": "test@example.com", "password": "testpass123"}"#,
        )
        .unwrap();

        assert_eq!(request.name, "");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_me_request_allows_partial_payload() {
        let request: UpdateMeRequest = serde_json::from_str(r#"{"name": "New"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.password.is_none());

        let request: UpdateMeRequest = serde_json::from_str(r#"{"password": "123"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
