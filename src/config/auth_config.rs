//! # Authentication Configuration Module
//!
//! 토큰 인증 관련 설정을 관리합니다.
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```

use std::env;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .ok()
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_hours_is_positive() {
        assert!(JwtConfig::expiration_hours() > 0);
    }

    #[test]
    fn test_secret_is_never_empty() {
        assert!(!JwtConfig::secret().is_empty());
    }
}
