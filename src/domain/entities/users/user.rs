//! User Entity Implementation
//!
//! 이메일을 식별자로 사용하는 사용자 엔티티입니다.
//! 레시피와 태그의 소유자이며, 스태프/슈퍼유저 플래그로 관리자 API 접근을 제어합니다.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::core::errors::AppError;

/// 사용자 엔티티
///
/// `users` 테이블의 한 행을 표현합니다.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    /// 정규화된 이메일 (unique)
    pub email: String,
    /// 표시 이름
    pub name: String,
    /// bcrypt 해시. `None`이면 비밀번호 로그인이 불가능한 계정입니다.
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 토큰에 담기는 역할 목록. 스태프는 `admin` 역할을 추가로 가집니다.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec!["user".to_string()];
        if self.is_staff {
            roles.push("admin".to_string());
        }
        roles
    }

    pub fn has_usable_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// 평문 비밀번호가 저장된 해시와 일치하는지 확인합니다.
    pub fn check_password(&self, raw_password: &str) -> bool {
        match &self.password_hash {
            Some(hash) => bcrypt::verify(raw_password, hash).unwrap_or_else(|e| {
                log::warn!("비밀번호 해시 검증 실패 (사용자 ID {}): {}", self.id, e);
                false
            }),
            None => false,
        }
    }
}

/// 저장 전 사용자 데이터
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl NewUser {
    /// 이메일을 정규화하여 일반 사용자 데이터를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이메일이 비어 있는 경우
    pub fn new(email: &str, name: &str, password_hash: Option<String>) -> Result<Self, AppError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::ValidationError(
                "The user must have an email address".to_string(),
            ));
        }

        Ok(Self {
            email,
            name: name.trim().to_string(),
            password_hash,
            is_staff: false,
            is_superuser: false,
        })
    }

    /// 스태프 + 슈퍼유저 권한을 부여합니다.
    pub fn into_superuser(self) -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
            ..self
        }
    }
}

/// 이메일 도메인 부분만 소문자로 바꿉니다.
///
/// 로컬 파트는 대소문자를 구분하므로 그대로 둡니다. 마지막 `@`를 기준으로 나누며,
/// `@`가 없는 문자열은 앞뒤 공백만 제거하고 그대로 반환합니다.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_hash(password_hash: Option<String>) -> User {
        User {
            id: 1,
            email: "test@example.com".to_string(),
            name: String::new(),
            password_hash,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_normalization() {
        let samples = [
            ("test1@EXAMPLE.com", "test1@example.com"),
            ("Test2@example.com", "Test2@example.com"),
            ("TEST3@EXAMPLE.COM", "TEST3@example.com"),
            ("test4@example.COM", "test4@example.com"),
            ("  spaced@Example.org ", "spaced@example.org"),
            ("weird@name@HOST.io", "weird@name@host.io"),
            ("no-at-sign", "no-at-sign"),
        ];

        for (raw, expected) in samples {
            assert_eq!(normalize_email(raw), expected, "normalizing {raw}");
        }
    }

    #[test]
    fn test_new_user_without_email_is_rejected() {
        assert!(matches!(
            NewUser::new("", "name", None),
            Err(AppError::ValidationError(_))
        ));
        assert!(NewUser::new("   ", "name", None).is_err());
    }

    #[test]
    fn test_superuser_flags() {
        let user = NewUser::new("admin@example.com", "", None).unwrap().into_superuser();
        assert!(user.is_staff);
        assert!(user.is_superuser);
    }

    #[test]
    fn test_check_password() {
        let hash = bcrypt::hash("testpass123", 4).unwrap();
        let user = user_with_hash(Some(hash));

        assert!(user.check_password("testpass123"));
        assert!(!user.check_password("wrong"));
    }

    #[test]
    fn test_unusable_password_never_matches() {
        let user = user_with_hash(None);
        assert!(!user.has_usable_password());
        assert!(!user.check_password(""));
    }

    #[test]
    fn test_roles_follow_staff_flag() {
        let mut user = user_with_hash(None);
        assert_eq!(user.roles(), vec!["user"]);

        user.is_staff = true;
        assert_eq!(user.roles(), vec!["user", "admin"]);
    }
}
