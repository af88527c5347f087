//! 레시피 앱 백엔드 메인 애플리케이션
//!
//! 관리 명령(`wait-for-db`, `migrate`, `create-superuser`)을 처리하거나,
//! 기본값으로 Actix-web HTTP 서버를 구동합니다.

use std::error::Error;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use recipe_app_backend::commands::{self, Cli, Command};
use recipe_app_backend::config::{CorsConfig, RateLimitConfig, ServerConfig};
use recipe_app_backend::core::ServiceRegistry;
use recipe_app_backend::db::Database;
use recipe_app_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    match cli.command() {
        Command::Serve => serve().await,
        Command::WaitForDb => {
            commands::wait_for_db().await?;
            Ok(())
        }
        Command::Migrate => commands::run_migrations().await,
        Command::CreateSuperuser { email, password, name } => {
            let database = Database::new().await?;
            let registry = ServiceRegistry::from_database(&database);
            commands::create_superuser(&registry, &email, &password, &name).await?;
            Ok(())
        }
    }
}

/// 데이터베이스와 서비스를 초기화한 뒤 HTTP 서버를 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * 데이터베이스 연결 실패
/// * 포트 바인딩 실패 또는 서버 실행 오류
async fn serve() -> Result<(), Box<dyn Error>> {
    info!("🚀 레시피 앱 서비스 시작중...");
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await?;
    let registry = ServiceRegistry::from_database(&database);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or("Rate Limiting 설정이 올바르지 않습니다")?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let origins = CorsConfig::allowed_origins();

    HttpServer::new(move || {
        let registry = registry.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| registry.configure(cfg))
            .configure(configure_all_routes)
    })
    .bind(&bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await?;

    Ok(())
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr로 남깁니다
    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("[{}] env 파일을 로드하지 못했습니다: {}", profile, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=recipe_app_backend::db=debug cargo run -- wait-for-db
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 허용 Origin은 `CORS_ALLOWED_ORIGINS`에서 읽습니다.
fn configure_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
