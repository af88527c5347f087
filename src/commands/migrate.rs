//! `migrate` 명령

use log::info;

use crate::db::Database;

/// 연결 풀을 열고 내장 마이그레이션을 적용합니다.
pub async fn run_migrations() -> Result<(), Box<dyn std::error::Error>> {
    info!("📦 마이그레이션 실행 중...");

    let database = Database::new().await?;
    database.migrate().await?;

    Ok(())
}
