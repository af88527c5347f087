//! 인증 미들웨어 동작 설정

/// 스코프 접근에 필요한 역할
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRole(pub String);

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        user_roles.contains(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role() {
        let required = RequiredRole("admin".to_string());

        assert!(required.is_satisfied(&["user".to_string(), "admin".to_string()]));
        assert!(!required.is_satisfied(&["user".to_string()]));
        assert!(!required.is_satisfied(&[]));
    }
}
