//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::env;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수로 현재 환경을 결정합니다. 기본값은 Production입니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost. `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|workers| *workers > 0)
            .unwrap_or(4)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// PostgreSQL 연결 설정
///
/// `DATABASE_URL`이 있으면 그 값을 우선 사용하고, 없으면 컨테이너 환경에서 주입되는
/// `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASS`로 연결 옵션을 조립합니다.
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn url() -> Option<String> {
        env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty())
    }

    pub fn host() -> String {
        env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string())
    }

    pub fn port() -> u16 {
        env::var("DB_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(5432)
    }

    pub fn name() -> String {
        env::var("DB_NAME").unwrap_or_else(|_| "recipe_app".to_string())
    }

    pub fn user() -> String {
        env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string())
    }

    pub fn password() -> String {
        env::var("DB_PASS").unwrap_or_default()
    }

    pub fn max_connections() -> u32 {
        env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|max| *max > 0)
            .unwrap_or(10)
    }

    /// 연결 옵션을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `sqlx::Error::Configuration` - `DATABASE_URL` 형식이 잘못된 경우
    pub fn connect_options() -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = Self::url() {
            return PgConnectOptions::from_str(&url);
        }

        Ok(PgConnectOptions::new()
            .host(&Self::host())
            .port(Self::port())
            .database(&Self::name())
            .username(&Self::user())
            .password(&Self::password()))
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self { per_second, burst_size }
    }
}

pub struct CorsConfig;

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분). 없으면 로컬 개발용 Origin을 허용합니다.
    pub fn allowed_origins() -> Vec<String> {
        Self::parse_origins(env::var("CORS_ALLOWED_ORIGINS").ok().as_deref())
    }

    fn parse_origins(raw: Option<&str>) -> Vec<String> {
        let origins: Vec<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ]
        } else {
            origins
        }
    }
}
