//! # Database Readiness Gate
//!
//! 데이터베이스가 연결을 받을 수 있을 때까지 프로세스 기동을 막는 대기 루프입니다.
//! 컨테이너 환경에서 애플리케이션이 데이터베이스 초기화보다 먼저 떠서
//! 연결에 실패하는 경쟁 상태를 막기 위해 `wait-for-db` 명령에서 사용합니다.
//!
//! ## 동작
//!
//! ```text
//! waiting for database to be available
//!   ├─ check() 실패 (재시도 대상) → "Database is unavailable ...waiting for 1 second" → 1초 대기 → 재시도
//!   ├─ check() 실패 (그 외)       → 에러 전파, 프로세스 비정상 종료
//!   └─ check() 성공               → "Database available!"
//! ```
//!
//! 재시도 대상 에러는 [`UnavailableKind`]의 두 가지뿐입니다.
//!
//! - [`UnavailableKind::Operational`]: 서버가 응답했지만 아직 요청을 받을 수 없다고 알린 경우
//!   (SQLSTATE `08xxx`, `57P03`, `53300`, 풀 타임아웃)
//! - [`UnavailableKind::Driver`]: 드라이버가 서버에 도달하지 못한 경우 (I/O, TLS, 닫힌 풀)
//!
//! 인증 실패나 잘못된 설정은 재시도해도 해결되지 않으므로 즉시 전파합니다.
//! 재시도 횟수 상한은 없습니다. 데이터베이스가 끝내 뜨지 않으면 오케스트레이터가
//! 프로세스를 정리합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use recipe_app_backend::db::readiness::{PostgresProbe, ReadinessGate, RuntimePause};
//!
//! let mut probe = PostgresProbe::from_env()?;
//! let report = ReadinessGate::default()
//!     .wait(&mut probe, &mut RuntimePause, &mut std::io::stdout())
//!     .await?;
//! ```

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// 재시도 사이의 고정 대기 시간
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

pub const WAITING_MESSAGE: &str = "waiting for database to be available";
pub const UNAVAILABLE_MESSAGE: &str = "Database is unavailable ...waiting for 1 second";
pub const AVAILABLE_MESSAGE: &str = "Database available!";

/// "아직 준비되지 않음"으로 취급하는 에러 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableKind {
    /// 데이터베이스가 응답했지만 아직 서비스할 수 없는 상태
    Operational,
    /// 드라이버 수준에서 서버에 도달하지 못한 상태
    Driver,
}

/// 에러가 재시도 대상인지 판별하는 능력
pub trait Retryable {
    /// 재시도 대상이면 해당 종류를, 아니면 `None`을 반환합니다.
    fn unavailable_kind(&self) -> Option<UnavailableKind>;

    fn is_retryable(&self) -> bool {
        self.unavailable_kind().is_some()
    }
}

impl Retryable for sqlx::Error {
    fn unavailable_kind(&self) -> Option<UnavailableKind> {
        match self {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
                Some(UnavailableKind::Driver)
            }
            sqlx::Error::PoolTimedOut => Some(UnavailableKind::Operational),
            sqlx::Error::Database(db_error) => db_error
                .code()
                .and_then(|code| classify_sqlstate(&code)),
            _ => None,
        }
    }
}

/// SQLSTATE 코드 중 "서버가 아직 연결을 받을 수 없음"에 해당하는 것만 골라냅니다.
fn classify_sqlstate(code: &str) -> Option<UnavailableKind> {
    match code {
        "57P03" | "53300" => Some(UnavailableKind::Operational),
        code if code.starts_with("08") => Some(UnavailableKind::Operational),
        _ => None,
    }
}

/// 가벼운 연결 확인 한 번을 수행하는 대상
#[async_trait]
pub trait ReadinessProbe: Send {
    type Error: Retryable + std::error::Error + Send + Sync + 'static;

    async fn check(&mut self) -> Result<(), Self::Error>;
}

/// 재시도 사이의 대기
#[async_trait]
pub trait Pause: Send {
    async fn pause(&mut self, delay: Duration);
}

/// 런타임 타이머로 실제로 대기합니다.
pub struct RuntimePause;

#[async_trait]
impl Pause for RuntimePause {
    async fn pause(&mut self, delay: Duration) {
        actix_web::rt::time::sleep(delay).await;
    }
}

/// 단일 PostgreSQL 연결을 열고 ping으로 확인하는 probe
///
/// 풀을 만들지 않으므로 연결 실패가 풀 타임아웃으로 뭉개지지 않고
/// 드라이버 에러 그대로 드러납니다.
pub struct PostgresProbe {
    options: PgConnectOptions,
}

impl PostgresProbe {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    /// 환경 변수 설정으로 probe를 생성합니다.
    pub fn from_env() -> Result<Self, sqlx::Error> {
        Ok(Self::new(DatabaseConfig::connect_options()?))
    }
}

#[async_trait]
impl ReadinessProbe for PostgresProbe {
    type Error = sqlx::Error;

    async fn check(&mut self) -> Result<(), sqlx::Error> {
        let mut connection = PgConnection::connect_with(&self.options).await?;
        connection.ping().await?;
        connection.close().await?;
        Ok(())
    }
}

/// 게이트 실패 원인
#[derive(Debug, Error)]
pub enum ReadinessError<E: std::error::Error + 'static> {
    /// 재시도 대상이 아닌 확인 실패
    #[error("database check failed: {0}")]
    Check(#[source] E),

    /// 상태 메시지 출력 실패
    #[error("failed to write readiness status: {0}")]
    Output(#[from] std::io::Error),
}

/// 게이트 통과 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitReport {
    /// 성공한 시도를 포함한 총 확인 횟수
    pub attempts: u64,
}

/// 데이터베이스 준비 대기 루프
#[derive(Debug, Clone, Copy)]
pub struct ReadinessGate {
    delay: Duration,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new(RETRY_DELAY)
    }
}

impl ReadinessGate {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// probe가 성공할 때까지 확인과 대기를 반복합니다.
    ///
    /// # Errors
    ///
    /// * `ReadinessError::Check` - 재시도 대상이 아닌 에러. 추가 시도 없이 즉시 반환됩니다.
    /// * `ReadinessError::Output` - 상태 메시지를 쓰지 못한 경우
    pub async fn wait<P, S, W>(
        &self,
        probe: &mut P,
        pause: &mut S,
        out: &mut W,
    ) -> Result<WaitReport, ReadinessError<P::Error>>
    where
        P: ReadinessProbe,
        S: Pause,
        W: Write,
    {
        writeln!(out, "{}", WAITING_MESSAGE)?;

        let mut attempts: u64 = 0;
        loop {
            attempts = attempts.saturating_add(1);

            let err = match probe.check().await {
                Ok(()) => break,
                Err(err) => err,
            };

            let Some(kind) = err.unavailable_kind() else {
                log::error!("데이터베이스 확인 실패 (재시도 불가): {}", err);
                return Err(ReadinessError::Check(err));
            };

            log::debug!("데이터베이스 미준비 ({:?}, 시도 {}): {}", kind, attempts, err);
            writeln!(out, "{}", UNAVAILABLE_MESSAGE)?;
            out.flush()?;
            pause.pause(self.delay).await;
        }

        writeln!(out, "{}", AVAILABLE_MESSAGE)?;
        out.flush()?;
        log::info!("✅ 데이터베이스 준비 완료 ({}회 시도)", attempts);

        Ok(WaitReport { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    enum FakeError {
        #[error("unavailable: {0:?}")]
        Unavailable(UnavailableKind),
        #[error("password authentication failed")]
        Broken,
    }

    impl Retryable for FakeError {
        fn unavailable_kind(&self) -> Option<UnavailableKind> {
            match self {
                FakeError::Unavailable(kind) => Some(*kind),
                FakeError::Broken => None,
            }
        }
    }

    /// `failures` 만큼 정해진 에러를 낸 뒤 성공하는 probe
    struct ScriptedProbe {
        failures: Vec<FakeError>,
        calls: usize,
    }

    impl ScriptedProbe {
        fn new(failures: Vec<FakeError>) -> Self {
            Self { failures, calls: 0 }
        }
    }

    #[async_trait]
    impl ReadinessProbe for ScriptedProbe {
        type Error = FakeError;

        async fn check(&mut self) -> Result<(), FakeError> {
            self.calls += 1;
            if self.failures.is_empty() {
                Ok(())
            } else {
                Err(self.failures.remove(0))
            }
        }
    }

    #[derive(Default)]
    struct CountingPause {
        delays: Vec<Duration>,
    }

    #[async_trait]
    impl Pause for CountingPause {
        async fn pause(&mut self, delay: Duration) {
            self.delays.push(delay);
        }
    }

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out).lines().map(str::to_string).collect()
    }

    #[actix_web::test]
    async fn test_first_attempt_success() {
        let mut probe = ScriptedProbe::new(vec![]);
        let mut pause = CountingPause::default();
        let mut out = Vec::new();

        let report = ReadinessGate::default()
            .wait(&mut probe, &mut pause, &mut out)
            .await
            .unwrap();

        assert_eq!(report.attempts, 1);
        assert_eq!(probe.calls, 1);
        assert!(pause.delays.is_empty());
        assert_eq!(lines(&out), vec![WAITING_MESSAGE, AVAILABLE_MESSAGE]);
    }

    #[actix_web::test]
    async fn test_driver_errors_twice_then_success() {
        let mut probe = ScriptedProbe::new(vec![
            FakeError::Unavailable(UnavailableKind::Driver),
            FakeError::Unavailable(UnavailableKind::Driver),
        ]);
        let mut pause = CountingPause::default();
        let mut out = Vec::new();

        let report = ReadinessGate::default()
            .wait(&mut probe, &mut pause, &mut out)
            .await
            .unwrap();

        assert_eq!(report.attempts, 3);
        assert_eq!(probe.calls, 3);
        assert_eq!(pause.delays, vec![RETRY_DELAY, RETRY_DELAY]);
        assert_eq!(
            lines(&out),
            vec![WAITING_MESSAGE, UNAVAILABLE_MESSAGE, UNAVAILABLE_MESSAGE, AVAILABLE_MESSAGE]
        );
    }

    #[actix_web::test]
    async fn test_n_transient_failures_mixed_kinds() {
        let failures: Vec<FakeError> = (0..7)
            .map(|i| {
                if i % 2 == 0 {
                    FakeError::Unavailable(UnavailableKind::Operational)
                } else {
                    FakeError::Unavailable(UnavailableKind::Driver)
                }
            })
            .collect();
        let mut probe = ScriptedProbe::new(failures);
        let mut pause = CountingPause::default();
        let mut out = Vec::new();

        let report = ReadinessGate::default()
            .wait(&mut probe, &mut pause, &mut out)
            .await
            .unwrap();

        assert_eq!(report.attempts, 8);
        assert_eq!(pause.delays.len(), 7);
        let printed = lines(&out);
        assert_eq!(printed.iter().filter(|l| *l == AVAILABLE_MESSAGE).count(), 1);
        assert_eq!(printed.iter().filter(|l| *l == UNAVAILABLE_MESSAGE).count(), 7);
    }

    #[actix_web::test]
    async fn test_fatal_error_propagates_without_retry() {
        let mut probe = ScriptedProbe::new(vec![FakeError::Broken]);
        let mut pause = CountingPause::default();
        let mut out = Vec::new();

        let result = ReadinessGate::default()
            .wait(&mut probe, &mut pause, &mut out)
            .await;

        assert!(matches!(result, Err(ReadinessError::Check(FakeError::Broken))));
        assert_eq!(probe.calls, 1);
        assert!(pause.delays.is_empty());
        assert!(!lines(&out).iter().any(|l| l == AVAILABLE_MESSAGE));
    }

    #[actix_web::test]
    async fn test_fatal_error_after_transient_ones() {
        let mut probe = ScriptedProbe::new(vec![
            FakeError::Unavailable(UnavailableKind::Operational),
            FakeError::Broken,
            FakeError::Unavailable(UnavailableKind::Driver),
        ]);
        let mut pause = CountingPause::default();
        let mut out = Vec::new();

        let result = ReadinessGate::new(Duration::from_millis(5))
            .wait(&mut probe, &mut pause, &mut out)
            .await;

        assert!(result.is_err());
        assert_eq!(probe.calls, 2);
        assert_eq!(pause.delays, vec![Duration::from_millis(5)]);
    }

    #[test]
    fn test_sqlx_error_classification() {
        let refused = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(refused.unavailable_kind(), Some(UnavailableKind::Driver));
        assert_eq!(sqlx::Error::PoolClosed.unavailable_kind(), Some(UnavailableKind::Driver));
        assert_eq!(
            sqlx::Error::PoolTimedOut.unavailable_kind(),
            Some(UnavailableKind::Operational)
        );

        assert!(!sqlx::Error::RowNotFound.is_retryable());
        assert!(!sqlx::Error::Configuration("bad url".into()).is_retryable());
    }

    #[test]
    fn test_sqlstate_classification() {
        assert_eq!(classify_sqlstate("57P03"), Some(UnavailableKind::Operational));
        assert_eq!(classify_sqlstate("08006"), Some(UnavailableKind::Operational));
        assert_eq!(classify_sqlstate("08001"), Some(UnavailableKind::Operational));
        assert_eq!(classify_sqlstate("53300"), Some(UnavailableKind::Operational));
        // invalid_password, undefined_table
        assert_eq!(classify_sqlstate("28P01"), None);
        assert_eq!(classify_sqlstate("42P01"), None);
    }
}
