//! `create-superuser` 명령

use log::info;

use crate::{
    core::{errors::AppError, ServiceRegistry},
    domain::entities::users::User,
};

/// 관리자(staff + superuser) 계정을 생성합니다.
///
/// 이메일이 이미 존재하면 `AppError::ConflictError`를 반환합니다.
pub async fn create_superuser(
    registry: &ServiceRegistry,
    email: &str,
    password: &str,
    name: &str,
) -> Result<User, AppError> {
    let user = registry.users.create_superuser(email, password, name).await?;

    info!("👑 Superuser 생성 완료: {} (id={})", user.email, user.id);

    Ok(user)
}
