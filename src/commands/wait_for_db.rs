//! `wait-for-db` 명령
//!
//! 데이터베이스가 연결을 받을 때까지 1초 간격으로 확인합니다.

use std::io;

use log::info;

use crate::db::readiness::{PostgresProbe, ReadinessError, ReadinessGate, RuntimePause, WaitReport};

/// 환경 변수 설정으로 PostgreSQL probe를 만들고 게이트를 통과할 때까지 대기합니다.
///
/// 상태 메시지는 stdout으로 출력됩니다.
///
/// # Errors
///
/// * 연결 설정을 만들 수 없는 경우
/// * 재시도 대상이 아닌 데이터베이스 에러 (인증 실패 등)
pub async fn wait_for_db() -> Result<WaitReport, ReadinessError<sqlx::Error>> {
    info!("⏳ 데이터베이스 준비 대기 시작");

    let mut probe = PostgresProbe::from_env().map_err(ReadinessError::Check)?;
    let mut pause = RuntimePause;
    let mut out = io::stdout().lock();

    ReadinessGate::default()
        .wait(&mut probe, &mut pause, &mut out)
        .await
}
