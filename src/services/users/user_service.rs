//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생명주기(생성, 인증, 프로필 수정, 관리자 관리)를 담당합니다.
//!
//! ## 서비스 아키텍처
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       UserService                        │
//! │  • create_user / create_superuser (이메일 정규화, 해싱)  │
//! │  • authenticate (비밀번호 검증, 활성 상태, last_login)   │
//! │  • profile / update_me                                   │
//! │  • 관리자: list / get / create / update / delete         │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │              Arc<dyn UserRepository>                     │
//! │  PostgreSQL 또는 인메모리 구현                           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 보안
//!
//! - **bcrypt 해싱**: 환경별 cost ([`PasswordConfig`](crate::config::PasswordConfig))
//! - **민감 정보 제거**: 응답 DTO에는 비밀번호 해시가 포함되지 않습니다.
//! - **동일한 실패 메시지**: 없는 이메일과 틀린 비밀번호를 구분하지 않습니다.

use std::sync::Arc;

use bcrypt::hash;

use crate::{
    core::errors::{AppError, ErrorContext},
    domain::{
        dto::users::{
            request::{AdminCreateUserRequest, AdminUpdateUserRequest, CreateUserRequest, UpdateMeRequest},
            response::{AdminUserResponse, UserResponse},
        },
        entities::users::{normalize_email, NewUser, User},
    },
    repositories::users::UserRepository,
};

const INVALID_CREDENTIALS: &str = "Unable to authenticate with provided credentials";

/// 사용자 관리 비즈니스 로직 서비스
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<dyn UserRepository>,

    /// bcrypt 해싱 cost
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    fn hash_password(&self, raw_password: &str) -> Result<String, AppError> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(raw_password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }

    /// 일반 사용자를 생성합니다.
    ///
    /// 비밀번호가 `None`이면 비밀번호 로그인이 불가능한 계정이 됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이메일이 비어 있는 경우
    /// * `AppError::ConflictError` - 이메일 중복
    pub async fn create_user(
        &self,
        email: &str,
        password: Option<&str>,
        name: &str,
    ) -> Result<User, AppError> {
        let password_hash = password.map(|p| self.hash_password(p)).transpose()?;
        let new_user = NewUser::new(email, name, password_hash)?;

        self.user_repo.create(new_user).await
    }

    /// 스태프 + 슈퍼유저 계정을 생성합니다.
    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AppError> {
        let password_hash = self.hash_password(password)?;
        let new_user = NewUser::new(email, name, Some(password_hash))?.into_superuser();

        let user = self.user_repo.create(new_user).await?;
        log::info!("👑 슈퍼유저 생성: {}", user.email);
        Ok(user)
    }

    /// 공개 회원가입 (`POST /api/user/create`)
    pub async fn register(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        let start_time = std::time::Instant::now();

        let user = self
            .create_user(&request.email, Some(&request.password), &request.name)
            .await?;

        log::info!("Total user creation took: {:?}", start_time.elapsed());
        Ok(UserResponse::from(user))
    }

    /// 이메일/비밀번호로 사용자를 인증하고 `last_login`을 갱신합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 사용자 없음, 비밀번호 불일치, 비활성 계정
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        if !user.check_password(password) {
            log::warn!("인증 실패: {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            log::warn!("비활성 계정 로그인 시도: {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        self.user_repo.touch_last_login(user.id).await?;
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 토큰 주체의 현재 사용자 엔티티
    ///
    /// 토큰 발급 이후 삭제되었거나 비활성화된 계정은 인증 실패로 처리합니다.
    pub async fn current_user(&self, id: i64) -> Result<User, AppError> {
        match self.user_repo.find_by_id(id).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AppError::AuthenticationError(
                "사용자 계정을 사용할 수 없습니다".to_string(),
            )),
        }
    }

    pub async fn get_profile(&self, id: i64) -> Result<UserResponse, AppError> {
        self.current_user(id).await.map(UserResponse::from)
    }

    /// 인증된 사용자 본인의 정보를 수정합니다.
    pub async fn update_me(&self, id: i64, request: UpdateMeRequest) -> Result<UserResponse, AppError> {
        let mut user = self.current_user(id).await?;

        if let Some(email) = request.email {
            let email = normalize_email(&email);
            if email.is_empty() {
                return Err(AppError::ValidationError(
                    "The user must have an email address".to_string(),
                ));
            }
            user.email = email;
        }
        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(password) = request.password {
            user.password_hash = Some(self.hash_password(&password)?);
        }

        let updated = self.user_repo.update(&user).await?;
        Ok(UserResponse::from(updated))
    }

    /// 전체 사용자 목록 (ID 오름차순)
    pub async fn list_users(&self) -> Result<Vec<AdminUserResponse>, AppError> {
        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(AdminUserResponse::from).collect())
    }

    pub async fn get_user(&self, id: i64) -> Result<AdminUserResponse, AppError> {
        self.find_user(id).await.map(AdminUserResponse::from)
    }

    pub async fn admin_create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> Result<AdminUserResponse, AppError> {
        let password_hash = self.hash_password(&request.password)?;
        let mut new_user = NewUser::new(&request.email, &request.name, Some(password_hash))?;
        new_user.is_staff = request.is_staff || request.is_superuser;
        new_user.is_superuser = request.is_superuser;

        let user = self.user_repo.create(new_user).await?;
        log::info!("관리자에 의해 사용자 생성: {} (ID {})", user.email, user.id);
        Ok(AdminUserResponse::from(user))
    }

    pub async fn admin_update_user(
        &self,
        id: i64,
        request: AdminUpdateUserRequest,
    ) -> Result<AdminUserResponse, AppError> {
        let mut user = self.find_user(id).await?;

        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }
        if let Some(is_staff) = request.is_staff {
            user.is_staff = is_staff;
        }

        let updated = self.user_repo.update(&user).await?;
        Ok(AdminUserResponse::from(updated))
    }

    /// 사용자와 소유한 레시피/태그를 함께 삭제합니다.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.user_repo.delete(id).await?;

        if !deleted {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("사용자 삭제: ID {}", id);
        Ok(())
    }
}
