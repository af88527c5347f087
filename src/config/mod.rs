//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값을 정적 접근자로 제공합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경, Rate Limiting, CORS 설정
//! - [`auth_config`] - JWT 토큰 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 데이터베이스 (DATABASE_URL이 있으면 우선)
//! export DB_HOST="db"
//! export DB_NAME="devdb"
//! export DB_USER="devuser"
//! export DB_PASS="changeme"
//!
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8000"
//!
//! # 토큰
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 환경 (development, test, staging, production)
//! export ENVIRONMENT="production"
//! export BCRYPT_COST="12"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
