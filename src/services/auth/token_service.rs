//! JWT 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명 액세스 토큰을 생성하고 검증합니다.
//! 토큰은 서버에 저장되지 않으며, 만료 시간까지 유효합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    config::JwtConfig,
    core::errors::{AppError, ErrorContext},
    domain::{
        dto::users::response::TokenResponse,
        entities::users::User,
        models::token::TokenClaims,
    },
};

/// 허용되는 Authorization 헤더 스킴
const AUTH_SCHEMES: [&str; 2] = ["Bearer ", "Token "];

/// JWT 토큰 관리 서비스
pub struct TokenService {
    secret: String,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// `JWT_SECRET`, `JWT_EXPIRATION_HOURS` 환경 변수로 생성합니다.
    pub fn from_env() -> Self {
        Self::new(JwtConfig::secret(), JwtConfig::expiration_hours())
    }

    /// 사용자를 위한 액세스 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let response = token_service.generate_access_token(&user)?;
    /// assert_eq!(response.token_type, "Bearer");
    /// ```
    pub fn generate_access_token(&self, user: &User) -> Result<TokenResponse, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            roles: user.roles(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());
        let token = encode(&Header::default(), &claims, &encoding_key)
            .with_context(|| format!("JWT 토큰 생성 실패 (사용자 ID {})", user.id))?;

        Ok(TokenResponse::bearer(token, self.expiration_hours * 3600))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// 토큰을 검증하고 주체(사용자 ID)를 반환합니다.
    ///
    /// 클레임의 역할은 발급 시점의 값이므로 권한 판단에는 쓰지 않습니다.
    /// 현재 계정 상태는 `UserService::current_user`로 확인합니다.
    pub fn subject(&self, token: &str) -> Result<i64, AppError> {
        self.verify_token(token)?.sub.parse::<i64>().map_err(|_| {
            AppError::AuthenticationError("토큰 주체가 올바르지 않습니다".to_string())
        })
    }

    /// Authorization 헤더에서 토큰 부분 추출
    ///
    /// `Bearer {token}`과 `Token {token}` 형식을 모두 허용합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        AUTH_SCHEMES
            .iter()
            .find_map(|scheme| auth_header.strip_prefix(scheme))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_staff: bool) -> User {
        User {
            id: 42,
            email: "user@example.com".to_string(),
            name: String::new(),
            password_hash: None,
            is_active: true,
            is_staff,
            is_superuser: false,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip_carries_identity() {
        let service = TokenService::new("test-secret", 1);
        let response = service.generate_access_token(&user(true)).unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);

        assert_eq!(service.subject(&response.token).unwrap(), 42);

        let claims = service.verify_token(&response.token).unwrap();
        assert_eq!(claims.email, "user@example.com");
        assert!(claims.roles.contains(&"admin".to_string()));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issued = TokenService::new("secret-a", 1)
            .generate_access_token(&user(false))
            .unwrap();

        let result = TokenService::new("secret-b", 1).verify_token(&issued.token);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new("test-secret", -2);
        let issued = service.generate_access_token(&user(false)).unwrap();

        assert!(matches!(
            service.verify_token(&issued.token),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_extract_token_accepts_both_schemes() {
        let service = TokenService::new("test-secret", 1);

        assert_eq!(service.extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(service.extract_bearer_token("Token abc").unwrap(), "abc");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
