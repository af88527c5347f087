//! # 관리 명령
//!
//! 컨테이너 기동 순서(`wait-for-db && migrate && serve`)에서 쓰이는
//! 서브커맨드 정의와 구현입니다. HTTP 서버 구동(`serve`)은 바이너리 쪽에 있습니다.

use clap::{Parser, Subcommand};

pub mod create_superuser;
pub mod migrate;
pub mod wait_for_db;

pub use create_superuser::create_superuser;
pub use migrate::run_migrations;
pub use wait_for_db::wait_for_db;

#[derive(Debug, Parser)]
#[command(name = "recipe_app_backend")]
#[command(version)]
#[command(about = "Recipe app REST API server and management commands", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,

    /// Block until the database accepts connections
    WaitForDb,

    /// Apply the embedded SQL migrations
    Migrate,

    /// Create a staff + superuser account
    CreateSuperuser {
        /// Login email of the new account
        #[arg(long)]
        email: String,

        /// Plain-text password, hashed before storage
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long, default_value = "")]
        name: String,
    },
}

impl Cli {
    /// 서브커맨드가 없으면 `serve`로 취급합니다.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
